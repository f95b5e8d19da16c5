//! Assembled layout for one grid: both axis tables plus the merge index.
//!
//! Built once per reload from a validated [`GridSpec`] and never mutated;
//! scroll state lives in the viewport, not here.

use crate::error::Result;
use crate::source::CircularScrolling;
use crate::spec::GridSpec;
use crate::types::{Band, CellCoord, GridStyle, Rect, Size, SpanRect};

use super::axis::AxisLayout;
use super::circular::CircularMapper;
use super::merges::MergeIndex;

/// Pre-computed layout data for a grid.
#[derive(Debug, Clone)]
pub struct GridLayout {
    columns: AxisLayout,
    rows: AxisLayout,
    merges: MergeIndex,
    grid_style: GridStyle,
    circular: CircularScrolling,
}

impl GridLayout {
    /// Assemble the layout.
    ///
    /// # Errors
    /// Returns [`GridError::SpanOverlap`](crate::GridError::SpanOverlap) if
    /// the spec's spans cover a common cell.
    pub fn new(spec: &GridSpec) -> Result<Self> {
        let columns = AxisLayout::new(
            &spec.column_widths,
            spec.intercell_spacing.width,
            spec.frozen_columns,
        );
        let rows = AxisLayout::new(
            &spec.row_heights,
            spec.intercell_spacing.height,
            spec.frozen_rows,
        );
        let merges = MergeIndex::build(&spec.spans, spec.columns, spec.rows)?;

        Ok(Self {
            columns,
            rows,
            merges,
            grid_style: spec.grid_style,
            circular: spec.circular,
        })
    }

    /// Column-axis geometry.
    pub fn columns(&self) -> &AxisLayout {
        &self.columns
    }

    /// Row-axis geometry.
    pub fn rows(&self) -> &AxisLayout {
        &self.rows
    }

    /// Merged-span index.
    pub fn merges(&self) -> &MergeIndex {
        &self.merges
    }

    /// Grid-line style.
    pub fn grid_style(&self) -> GridStyle {
        self.grid_style
    }

    /// Circular-scrolling axes.
    pub fn circular(&self) -> CircularScrolling {
        self.circular
    }

    /// The band a coordinate belongs to.
    pub fn band_of(&self, coord: CellCoord) -> Band {
        Band::from_frozen(
            coord.column < self.columns.frozen(),
            coord.row < self.rows.frozen(),
        )
    }

    /// Total content size including all gaps.
    pub fn total_size(&self) -> Size {
        Size::new(self.columns.total_extent(), self.rows.total_extent())
    }

    /// Size of the frozen corner region (band extents per axis).
    pub fn frozen_size(&self) -> Size {
        Size::new(self.columns.band_extent(), self.rows.band_extent())
    }

    /// Content-space frame of a cell. Coordinates covered by a span resolve
    /// to the span's full frame, including interior gaps.
    pub fn cell_rect(&self, coord: CellCoord) -> Option<Rect> {
        if let Some(span) = self.merges.span_containing(coord) {
            return self.span_rect(span);
        }
        let x = self.columns.offset_of(coord.column)?;
        let y = self.rows.offset_of(coord.row)?;
        let width = self.columns.size_of(coord.column)?;
        let height = self.rows.size_of(coord.row)?;
        Some(Rect::new(x, y, width, height))
    }

    /// Content-space frame of a span: anchor cell start to last cell end on
    /// both axes.
    pub fn span_rect(&self, span: &SpanRect) -> Option<Rect> {
        if span.column_count == 0 || span.row_count == 0 {
            return None;
        }
        let x = self.columns.offset_of(span.column)?;
        let y = self.rows.offset_of(span.row)?;
        let max_x = self.columns.end_of(span.end_column() - 1)?;
        let max_y = self.rows.end_of(span.end_row() - 1)?;
        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    /// Build the horizontal-axis scroll normalizer for a given effective
    /// viewport width.
    pub fn column_mapper(&self, viewport_extent: f32) -> CircularMapper {
        CircularMapper::new(
            self.circular.horizontal,
            self.columns.circular_stride(),
            viewport_extent - self.columns.band_extent(),
            self.columns.scrollable_extent(),
        )
    }

    /// Build the vertical-axis scroll normalizer for a given effective
    /// viewport height.
    pub fn row_mapper(&self, viewport_extent: f32) -> CircularMapper {
        CircularMapper::new(
            self.circular.vertical,
            self.rows.circular_stride(),
            viewport_extent - self.rows.band_extent(),
            self.rows.scrollable_extent(),
        )
    }
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
    use crate::source::GridSource;

    fn build(source: &GridSource) -> GridLayout {
        let spec = GridSpec::build(source).unwrap();
        GridLayout::new(&spec).unwrap()
    }

    #[test]
    fn test_band_partition() {
        let layout = build(&GridSource::uniform(10, 10, 64.0, 20.0).with_frozen(2, 3));

        assert_eq!(layout.band_of(CellCoord::new(0, 0)), Band::Corner);
        assert_eq!(layout.band_of(CellCoord::new(1, 2)), Band::Corner);
        assert_eq!(layout.band_of(CellCoord::new(2, 0)), Band::RowHeader);
        assert_eq!(layout.band_of(CellCoord::new(0, 3)), Band::ColumnHeader);
        assert_eq!(layout.band_of(CellCoord::new(2, 3)), Band::Body);
    }

    #[test]
    fn test_cell_rect_plain() {
        let layout = build(&GridSource::uniform(5, 5, 64.0, 20.0));

        let rect = layout.cell_rect(CellCoord::new(0, 0)).unwrap();
        assert_eq!(rect, Rect::new(1.0, 1.0, 64.0, 20.0));

        let rect = layout.cell_rect(CellCoord::new(2, 1)).unwrap();
        assert_eq!(rect.x, 3.0 + 2.0 * 64.0);
        assert_eq!(rect.y, 2.0 + 20.0);

        assert!(layout.cell_rect(CellCoord::new(5, 0)).is_none());
    }

    #[test]
    fn test_cell_rect_resolves_span() {
        let source = GridSource::uniform(5, 5, 64.0, 20.0)
            .with_spans(vec![SpanRect::new(1, 1, 2, 2)]);
        let layout = build(&source);

        let anchor_rect = layout.cell_rect(CellCoord::new(1, 1)).unwrap();
        // Two cells plus the interior gap on each axis
        assert_eq!(anchor_rect.width, 2.0 * 64.0 + 1.0);
        assert_eq!(anchor_rect.height, 2.0 * 20.0 + 1.0);

        // Covered coordinates share the span frame
        let covered_rect = layout.cell_rect(CellCoord::new(2, 2)).unwrap();
        assert_eq!(covered_rect, anchor_rect);
    }

    #[test]
    fn test_sizes() {
        let layout = build(&GridSource::uniform(10, 20, 64.0, 20.0).with_frozen(2, 3));

        // 10 columns, 11 gaps of 1
        assert_eq!(layout.total_size().width, 10.0 * 64.0 + 11.0);
        assert_eq!(layout.total_size().height, 20.0 * 20.0 + 21.0);
        // Frozen band ends at the last frozen cell's end
        assert_eq!(layout.frozen_size().width, 2.0 * 64.0 + 2.0);
        assert_eq!(layout.frozen_size().height, 3.0 * 20.0 + 3.0);
    }

    #[test]
    fn test_overlap_propagates() {
        let source = GridSource::uniform(5, 5, 10.0, 10.0)
            .with_spans(vec![SpanRect::new(0, 0, 2, 2), SpanRect::new(1, 1, 2, 2)]);
        let spec = GridSpec::build(&source).unwrap();
        assert!(GridLayout::new(&spec).is_err());
    }
}
