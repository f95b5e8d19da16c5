//! Merged-span index.
//!
//! Maps every covered coordinate to its owning span for O(1) lookups and
//! precomputes, per axis boundary, the index ranges where a grid line would
//! cross a span interior and must be skipped.

use std::collections::HashMap;

use crate::error::{GridError, Result};
use crate::types::{CellCoord, SpanRect};

/// Span lookup table built once per reload.
#[derive(Debug, Clone, Default)]
pub struct MergeIndex {
    spans: Vec<SpanRect>,
    covered: HashMap<CellCoord, usize>,
    /// Skip ranges for vertical lines, indexed by column boundary.
    /// Each range is `(start_row, end_row)` with an exclusive end.
    vline_skips: Vec<Vec<(u32, u32)>>,
    /// Skip ranges for horizontal lines, indexed by row boundary.
    hline_skips: Vec<Vec<(u32, u32)>>,
}

impl MergeIndex {
    /// Build the index from spans already bounds-checked against the grid.
    ///
    /// # Errors
    /// Returns [`GridError::SpanOverlap`] if two spans cover a common cell.
    pub fn build(spans: &[SpanRect], columns: u32, rows: u32) -> Result<Self> {
        let mut covered = HashMap::new();
        for (index, span) in spans.iter().enumerate() {
            for row in span.rows() {
                for column in span.columns() {
                    if let Some(&previous) = covered.get(&CellCoord::new(column, row)) {
                        let first = spans.get(previous).copied().unwrap_or(*span);
                        return Err(GridError::SpanOverlap {
                            first,
                            second: *span,
                        });
                    }
                    covered.insert(CellCoord::new(column, row), index);
                }
            }
        }

        let (vline_skips, hline_skips) = if spans.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            build_skips(spans, columns, rows)
        };

        Ok(Self {
            spans: spans.to_vec(),
            covered,
            vline_skips,
            hline_skips,
        })
    }

    /// All spans, in source order.
    pub fn spans(&self) -> &[SpanRect] {
        &self.spans
    }

    /// The span covering a coordinate, if any.
    pub fn span_containing(&self, coord: CellCoord) -> Option<&SpanRect> {
        let index = *self.covered.get(&coord)?;
        self.spans.get(index)
    }

    /// The canonical coordinate for a cell: the span anchor when covered,
    /// the coordinate itself otherwise.
    pub fn anchor_of(&self, coord: CellCoord) -> CellCoord {
        self.span_containing(coord)
            .map_or(coord, |span| span.anchor())
    }

    /// True if the coordinate is inside a span but is not its anchor.
    pub fn is_interior(&self, coord: CellCoord) -> bool {
        self.span_containing(coord)
            .is_some_and(|span| span.anchor() != coord)
    }

    /// Spans overlapping the half-open index region.
    pub fn spans_intersecting(
        &self,
        columns: std::ops::Range<u32>,
        rows: std::ops::Range<u32>,
    ) -> impl Iterator<Item = &SpanRect> {
        self.spans.iter().filter(move |span| {
            span.column < columns.end
                && span.end_column() > columns.start
                && span.row < rows.end
                && span.end_row() > rows.start
        })
    }

    /// Row ranges a vertical line at `boundary` must skip.
    pub fn vline_skips(&self, boundary: u32) -> &[(u32, u32)] {
        self.vline_skips
            .get(boundary as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Column ranges a horizontal line at `boundary` must skip.
    pub fn hline_skips(&self, boundary: u32) -> &[(u32, u32)] {
        self.hline_skips
            .get(boundary as usize)
            .map_or(&[], Vec::as_slice)
    }
}

#[allow(clippy::type_complexity)]
fn build_skips(
    spans: &[SpanRect],
    columns: u32,
    rows: u32,
) -> (Vec<Vec<(u32, u32)>>, Vec<Vec<(u32, u32)>>) {
    let mut vline_skips: Vec<Vec<(u32, u32)>> = vec![Vec::new(); columns as usize + 1];
    let mut hline_skips: Vec<Vec<(u32, u32)>> = vec![Vec::new(); rows as usize + 1];

    for span in spans {
        // Interior boundaries only; the span's outer edges keep their lines
        if span.column_count > 1 {
            for boundary in (span.column + 1)..span.end_column() {
                if let Some(list) = vline_skips.get_mut(boundary as usize) {
                    list.push((span.row, span.end_row()));
                }
            }
        }
        if span.row_count > 1 {
            for boundary in (span.row + 1)..span.end_row() {
                if let Some(list) = hline_skips.get_mut(boundary as usize) {
                    list.push((span.column, span.end_column()));
                }
            }
        }
    }

    for ranges in &mut vline_skips {
        coalesce_ranges(ranges);
    }
    for ranges in &mut hline_skips {
        coalesce_ranges(ranges);
    }

    (vline_skips, hline_skips)
}

fn coalesce_ranges(ranges: &mut Vec<(u32, u32)>) {
    if ranges.len() <= 1 {
        return;
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges.drain(..) {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                if end > last.1 {
                    last.1 = end;
                }
                continue;
            }
        }
        merged.push((start, end));
    }
    *ranges = merged;
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
    fn test_span_lookup() {
        let spans = [SpanRect::new(1, 1, 2, 3)];
        let index = MergeIndex::build(&spans, 10, 10).unwrap();

        // Every covered coordinate resolves to the same span
        for row in 1..4 {
            for column in 1..3 {
                let span = index.span_containing(CellCoord::new(column, row)).unwrap();
                assert_eq!(span.anchor(), CellCoord::new(1, 1));
            }
        }
        assert!(index.span_containing(CellCoord::new(0, 0)).is_none());
        assert!(index.span_containing(CellCoord::new(3, 1)).is_none());
    }

    #[test]
    fn test_anchor_of() {
        let spans = [SpanRect::new(2, 0, 2, 2)];
        let index = MergeIndex::build(&spans, 10, 10).unwrap();

        assert_eq!(index.anchor_of(CellCoord::new(3, 1)), CellCoord::new(2, 0));
        assert_eq!(index.anchor_of(CellCoord::new(5, 5)), CellCoord::new(5, 5));
        assert!(index.is_interior(CellCoord::new(3, 0)));
        assert!(!index.is_interior(CellCoord::new(2, 0)));
        assert!(!index.is_interior(CellCoord::new(7, 7)));
    }

    #[test]
    fn test_overlap_detected() {
        let spans = [SpanRect::new(0, 0, 3, 3), SpanRect::new(2, 2, 2, 2)];
        let err = MergeIndex::build(&spans, 10, 10).unwrap_err();

        match err {
            GridError::SpanOverlap { first, second } => {
                assert_eq!(first.anchor(), CellCoord::new(0, 0));
                assert_eq!(second.anchor(), CellCoord::new(2, 2));
            }
            other => panic!("expected SpanOverlap, got {other:?}"),
        }
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let spans = [SpanRect::new(0, 0, 2, 2), SpanRect::new(2, 0, 2, 2)];
        assert!(MergeIndex::build(&spans, 10, 10).is_ok());
    }

    #[test]
    fn test_line_skips() {
        // 3x2 span at (1, 1): vertical boundaries 2 and 3 cross the interior
        let spans = [SpanRect::new(1, 1, 3, 2)];
        let index = MergeIndex::build(&spans, 10, 10).unwrap();

        assert_eq!(index.vline_skips(1), &[]);
        assert_eq!(index.vline_skips(2), &[(1, 3)]);
        assert_eq!(index.vline_skips(3), &[(1, 3)]);
        assert_eq!(index.vline_skips(4), &[]);

        assert_eq!(index.hline_skips(1), &[]);
        assert_eq!(index.hline_skips(2), &[(1, 4)]);
        assert_eq!(index.hline_skips(3), &[]);
    }

    #[test]
    fn test_adjacent_skips_coalesce() {
        // Two spans stacked vertically, both crossed by boundary 1
        let spans = [SpanRect::new(0, 0, 2, 2), SpanRect::new(0, 2, 2, 2)];
        let index = MergeIndex::build(&spans, 10, 10).unwrap();

        assert_eq!(index.vline_skips(1), &[(0, 4)]);
    }

    #[test]
    fn test_spans_intersecting_region() {
        let spans = [
            SpanRect::new(0, 0, 2, 2),
            SpanRect::new(5, 5, 2, 2),
            SpanRect::new(8, 0, 2, 1),
        ];
        let index = MergeIndex::build(&spans, 10, 10).unwrap();

        let hits: Vec<_> = index.spans_intersecting(0..6, 0..6).collect();
        assert_eq!(hits.len(), 2);

        let hits: Vec<_> = index.spans_intersecting(6..8, 0..10).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].anchor(), CellCoord::new(5, 5));
    }

    #[test]
    fn test_empty_index() {
        let index = MergeIndex::default();
        assert!(index.span_containing(CellCoord::new(0, 0)).is_none());
        assert_eq!(index.vline_skips(0), &[]);
    }
}
