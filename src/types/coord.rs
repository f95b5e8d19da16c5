//! Logical grid coordinates, merged-span rectangles, and band tags.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

/// Logical cell coordinate (column, row). Both indices are zero-based and
/// refer to the grid definition, independent of scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub column: u32,
    pub row: u32,
}

impl CellCoord {
    /// Create a coordinate from (column, row).
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl Ord for CellCoord {
    /// Row-major ordering: rows first, columns within a row.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// A rectangular merged span in logical coordinates. The span is anchored at
/// its top-left cell and covers `column_count` x `row_count` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRect {
    pub column: u32,
    pub row: u32,
    pub column_count: u32,
    pub row_count: u32,
}

impl SpanRect {
    /// Create a span anchored at (column, row) covering the given counts.
    pub const fn new(column: u32, row: u32, column_count: u32, row_count: u32) -> Self {
        Self {
            column,
            row,
            column_count,
            row_count,
        }
    }

    /// The canonical (top-left) coordinate identifying this span.
    pub const fn anchor(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }

    /// One past the last covered column.
    pub const fn end_column(&self) -> u32 {
        self.column + self.column_count
    }

    /// One past the last covered row.
    pub const fn end_row(&self) -> u32 {
        self.row + self.row_count
    }

    /// Covered column indices.
    pub const fn columns(&self) -> Range<u32> {
        self.column..self.end_column()
    }

    /// Covered row indices.
    pub const fn rows(&self) -> Range<u32> {
        self.row..self.end_row()
    }

    /// True if the coordinate lies inside the span.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.column >= self.column
            && coord.column < self.end_column()
            && coord.row >= self.row
            && coord.row < self.end_row()
    }

    /// Number of cells the span covers.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.column_count) * u64::from(self.row_count)
    }
}

impl fmt::Display for SpanRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.column_count, self.row_count, self.column, self.row
        )
    }
}

/// The region of the view a visible cell belongs to.
///
/// Variant order is the output order of a resolve pass: corner cells first,
/// then the frozen-rows strip, then the frozen-columns strip, then the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    /// Frozen on both axes (top-left block).
    Corner,
    /// Frozen rows, scrollable columns (top strip).
    RowHeader,
    /// Frozen columns, scrollable rows (left strip).
    ColumnHeader,
    /// Scrollable on both axes.
    Body,
}

impl Band {
    /// Classify a coordinate by which of its axes are frozen.
    pub fn from_frozen(frozen_column: bool, frozen_row: bool) -> Band {
        match (frozen_column, frozen_row) {
            (true, true) => Band::Corner,
            (false, true) => Band::RowHeader,
            (true, false) => Band::ColumnHeader,
            (false, false) => Band::Body,
        }
    }

    /// True for the bands pinned on at least one axis.
    pub fn is_frozen(&self) -> bool {
        !matches!(self, Band::Body)
    }
}

/// Reuse identifier a cell view was registered under. Cells detached from
/// one coordinate are only handed back out for entries with the same
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReuseId(String);

impl ReuseId {
    /// Create a reuse identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReuseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReuseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ReuseId {
    fn from(s: String) -> Self {
        Self(s)
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

    #[test]
    fn test_coord_ordering_is_row_major() {
        let mut coords = vec![
            CellCoord::new(2, 1),
            CellCoord::new(0, 2),
            CellCoord::new(1, 0),
            CellCoord::new(0, 0),
        ];
        coords.sort();

        assert_eq!(
            coords,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 1),
                CellCoord::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_span_contains() {
        let span = SpanRect::new(2, 3, 2, 4);

        assert!(span.contains(CellCoord::new(2, 3)));
        assert!(span.contains(CellCoord::new(3, 6)));
        assert!(!span.contains(CellCoord::new(4, 3)));
        assert!(!span.contains(CellCoord::new(2, 7)));
        assert!(!span.contains(CellCoord::new(1, 3)));
    }

    #[test]
    fn test_band_order_matches_output_blocks() {
        let mut bands = vec![Band::Body, Band::ColumnHeader, Band::Corner, Band::RowHeader];
        bands.sort();
        assert_eq!(
            bands,
            vec![Band::Corner, Band::RowHeader, Band::ColumnHeader, Band::Body]
        );
    }

    #[test]
    fn test_band_from_frozen() {
        assert_eq!(Band::from_frozen(true, true), Band::Corner);
        assert_eq!(Band::from_frozen(false, true), Band::RowHeader);
        assert_eq!(Band::from_frozen(true, false), Band::ColumnHeader);
        assert_eq!(Band::from_frozen(false, false), Band::Body);
    }
}
