//! Validated, immutable snapshot of a [`GridSource`].
//!
//! A snapshot is taken once per reload. Validation happens here, before any
//! layout is built, so a bad configuration never replaces a working one.

use crate::error::{GridError, Result};
use crate::source::{CircularScrolling, GridSource};
use crate::types::{GridStyle, Size, SpanRect};

/// Materialized grid definition: counts, sizes, frozen bands, spans, and
/// style, all read from the source and checked.
#[derive(Debug, Clone)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub frozen_columns: u32,
    pub frozen_rows: u32,
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    pub spans: Vec<SpanRect>,
    pub intercell_spacing: Size,
    pub grid_style: GridStyle,
    pub circular: CircularScrolling,
}

impl GridSpec {
    /// Read and validate the source.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for invalid counts, sizes, or spacing
    /// and [`GridError::SpanOutOfBounds`] for spans outside the grid.
    /// Overlapping spans are reported when the merge index is built.
    pub fn build(source: &GridSource) -> Result<Self> {
        let columns = (source.column_count)();
        let rows = (source.row_count)();
        let frozen_columns = (source.frozen_columns)();
        let frozen_rows = (source.frozen_rows)();

        if frozen_columns > columns {
            return Err(GridError::Config(format!(
                "frozen columns ({frozen_columns}) exceed column count ({columns})"
            )));
        }
        if frozen_rows > rows {
            return Err(GridError::Config(format!(
                "frozen rows ({frozen_rows}) exceed row count ({rows})"
            )));
        }

        let spacing = source.intercell_spacing;
        if !is_valid_length(spacing.width) || !is_valid_length(spacing.height) {
            return Err(GridError::Config(format!(
                "intercell spacing must be finite and non-negative, got {}x{}",
                spacing.width, spacing.height
            )));
        }

        let column_widths = collect_sizes(columns, source.column_width.as_ref(), "column")?;
        let row_heights = collect_sizes(rows, source.row_height.as_ref(), "row")?;

        let spans = (source.merged_spans)();
        for span in &spans {
            if span.column_count == 0 || span.row_count == 0 {
                return Err(GridError::Config(format!(
                    "merged span {span} covers no cells"
                )));
            }
            let end_column = span.column.checked_add(span.column_count);
            let end_row = span.row.checked_add(span.row_count);
            match (end_column, end_row) {
                (Some(ec), Some(er)) if ec <= columns && er <= rows => {}
                _ => {
                    return Err(GridError::SpanOutOfBounds {
                        span: *span,
                        columns,
                        rows,
                    })
                }
            }
        }

        Ok(Self {
            columns,
            rows,
            frozen_columns,
            frozen_rows,
            column_widths,
            row_heights,
            spans,
            intercell_spacing: spacing,
            grid_style: source.grid_style,
            circular: source.circular,
        })
    }
}

fn is_valid_length(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn collect_sizes(
    count: u32,
    size_of: &(dyn Fn(u32) -> f32 + Send + Sync),
    what: &str,
) -> Result<Vec<f32>> {
    let mut sizes = Vec::with_capacity(count as usize);
    for index in 0..count {
        let size = size_of(index);
        if !is_valid_length(size) {
            return Err(GridError::Config(format!(
                "{what} {index} has invalid size {size}"
            )));
        }
        sizes.push(size);
    }
    Ok(sizes)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_build_uniform() {
        let source = GridSource::uniform(10, 20, 64.0, 20.0).with_frozen(2, 3);
        let spec = GridSpec::build(&source).unwrap();

        assert_eq!(spec.columns, 10);
        assert_eq!(spec.rows, 20);
        assert_eq!(spec.frozen_columns, 2);
        assert_eq!(spec.frozen_rows, 3);
        assert_eq!(spec.column_widths.len(), 10);
        assert_eq!(spec.row_heights.len(), 20);
        assert_eq!(spec.column_widths[7], 64.0);
    }

    #[test]
    fn test_frozen_exceeding_count_fails() {
        let source = GridSource::uniform(3, 3, 10.0, 10.0).with_frozen(4, 0);
        let err = GridSpec::build(&source).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_invalid_size_fails() {
        let source =
            GridSource::uniform(3, 3, 10.0, 10.0).with_column_width(|c| if c == 1 { f32::NAN } else { 10.0 });
        let err = GridSpec::build(&source).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));

        let source = GridSource::uniform(3, 3, 10.0, 10.0).with_row_height(|_| -5.0);
        assert!(GridSpec::build(&source).is_err());
    }

    #[test]
    fn test_zero_size_is_legal() {
        // Zero-width columns are the hidden-column idiom, not an error
        let source = GridSource::uniform(3, 3, 10.0, 10.0).with_column_width(|c| if c == 1 { 0.0 } else { 10.0 });
        let spec = GridSpec::build(&source).unwrap();
        assert_eq!(spec.column_widths[1], 0.0);
    }

    #[test]
    fn test_span_out_of_bounds_fails() {
        let source =
            GridSource::uniform(5, 5, 10.0, 10.0).with_spans(vec![SpanRect::new(4, 0, 2, 1)]);
        let err = GridSpec::build(&source).unwrap_err();
        assert!(matches!(err, GridError::SpanOutOfBounds { .. }));
    }

    #[test]
    fn test_empty_span_fails() {
        let source =
            GridSource::uniform(5, 5, 10.0, 10.0).with_spans(vec![SpanRect::new(0, 0, 0, 2)]);
        let err = GridSpec::build(&source).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_negative_spacing_fails() {
        let source = GridSource::uniform(5, 5, 10.0, 10.0).with_spacing(Size::new(-1.0, 0.0));
        assert!(GridSpec::build(&source).is_err());
    }
}
