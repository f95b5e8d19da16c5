//! Per-axis geometry table.
//!
//! Positions are pre-computed once per reload as a prefix sum over cell
//! sizes and intercell spacing, giving O(1) offset lookups and O(log n)
//! index-at-position queries.
//!
//! Content space per axis: a gap of `spacing` precedes every cell (grid
//! lines are drawn in the gaps), so cell `i` starts at
//! `(i + 1) * spacing + sum(sizes[..i])` and the axis ends after one
//! trailing gap. The frozen band ends at the last frozen cell's end; the gap
//! that follows it belongs to the scrollable body.

use std::cmp::Ordering;

/// Pre-computed geometry for one axis (columns or rows).
#[derive(Debug, Clone)]
pub struct AxisLayout {
    /// `positions[i]` = start of cell i; `positions[count]` = total extent.
    positions: Vec<f32>,
    sizes: Vec<f32>,
    spacing: f32,
    frozen: u32,
    count: u32,
}

impl AxisLayout {
    /// Build the table from validated sizes. `frozen` is clamped to the
    /// cell count.
    pub fn new(sizes: &[f32], spacing: f32, frozen: u32) -> Self {
        let count = u32::try_from(sizes.len()).unwrap_or(u32::MAX);
        let mut positions = Vec::with_capacity(sizes.len() + 1);

        if sizes.is_empty() {
            positions.push(0.0);
        } else {
            let mut p = spacing;
            for &size in sizes {
                positions.push(p);
                p += size + spacing;
            }
            positions.push(p); // Total extent (after the trailing gap)
        }

        Self {
            positions,
            sizes: sizes.to_vec(),
            spacing,
            frozen: frozen.min(count),
            count,
        }
    }

    /// Number of cells on this axis.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of frozen leading cells.
    pub fn frozen(&self) -> u32 {
        self.frozen
    }

    /// Intercell spacing.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Content-space start of cell `index`.
    pub fn offset_of(&self, index: u32) -> Option<f32> {
        if index >= self.count {
            return None;
        }
        self.positions.get(index as usize).copied()
    }

    /// Size of cell `index`.
    pub fn size_of(&self, index: u32) -> Option<f32> {
        self.sizes.get(index as usize).copied()
    }

    /// Content-space end of cell `index`.
    pub fn end_of(&self, index: u32) -> Option<f32> {
        Some(self.offset_of(index)? + self.size_of(index)?)
    }

    /// Center of the gap at boundary `boundary` (0 = before the first cell,
    /// `count` = after the last). This is where a grid line is drawn.
    pub fn line_position(&self, boundary: u32) -> Option<f32> {
        if self.count == 0 || boundary > self.count {
            return None;
        }
        let edge = self.positions.get(boundary as usize).copied()?;
        Some(edge - self.spacing / 2.0)
    }

    /// Total content extent including all gaps. Zero for an empty axis.
    pub fn total_extent(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Extent of the frozen band: the end of the last frozen cell, or zero
    /// when nothing is frozen.
    pub fn band_extent(&self) -> f32 {
        if self.frozen == 0 {
            return 0.0;
        }
        self.end_of(self.frozen - 1).unwrap_or(0.0)
    }

    /// Extent of the scrollable body (total minus the frozen band).
    pub fn scrollable_extent(&self) -> f32 {
        self.total_extent() - self.band_extent()
    }

    /// Period of one circular tile. One gap is dropped so tiled copies of
    /// the body keep a single intercell gap at the wrap seam.
    pub fn circular_stride(&self) -> f32 {
        (self.scrollable_extent() - self.spacing).max(0.0)
    }

    /// Index of the cell at a content-space position (binary search). The
    /// gap after a cell resolves to that cell; positions past the end clamp
    /// to the last cell.
    pub fn index_at(&self, position: f32) -> Option<u32> {
        if self.count == 0 {
            return None;
        }
        let found = match self.positions.binary_search_by(|pos| {
            pos.partial_cmp(&position).unwrap_or(Ordering::Equal)
        }) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let index = u32::try_from(found).ok()?;
        Some(index.min(self.count - 1))
    }

    /// Conservative inclusive index range of cells that may intersect the
    /// content-space window `[start, start + extent)`. Callers filter the
    /// edges with [`cell_intersects`](Self::cell_intersects).
    pub fn visible_range(&self, start: f32, extent: f32) -> Option<(u32, u32)> {
        if self.count == 0 || extent <= 0.0 {
            return None;
        }
        let lo = self.index_at(start)?;
        let hi = self.index_at(start + extent)?;
        Some((lo, hi))
    }

    /// Exact visibility predicate: cell `index` has positive size and
    /// overlaps the half-open content-space window.
    pub fn cell_intersects(&self, index: u32, window_start: f32, window_end: f32) -> bool {
        let (Some(offset), Some(size)) = (self.offset_of(index), self.size_of(index)) else {
            return false;
        };
        size > 0.0 && offset < window_end && offset + size > window_start
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

    // sizes [10, 20, 30] with spacing 2:
    //   gap cell0 gap cell1 gap cell2 gap
    //   0..2 2..12 12..14 14..34 34..36 36..66 66..68
    fn three_cells() -> AxisLayout {
        AxisLayout::new(&[10.0, 20.0, 30.0], 2.0, 0)
    }

    #[test]
    fn test_offsets_include_leading_gaps() {
        let axis = three_cells();

        assert_eq!(axis.offset_of(0), Some(2.0));
        assert_eq!(axis.offset_of(1), Some(14.0));
        assert_eq!(axis.offset_of(2), Some(36.0));
        assert_eq!(axis.offset_of(3), None);
        assert_eq!(axis.end_of(2), Some(66.0));
    }

    #[test]
    fn test_total_extent_has_trailing_gap() {
        let axis = three_cells();
        assert_eq!(axis.total_extent(), 68.0);

        let empty = AxisLayout::new(&[], 2.0, 0);
        assert_eq!(empty.total_extent(), 0.0);
    }

    #[test]
    fn test_band_extent_ends_at_last_frozen_cell() {
        let axis = AxisLayout::new(&[10.0, 20.0, 30.0], 2.0, 2);

        // End of cell 1, not including the gap that follows it
        assert_eq!(axis.band_extent(), 34.0);
        assert_eq!(axis.scrollable_extent(), 34.0);
        assert_eq!(axis.circular_stride(), 32.0);
    }

    #[test]
    fn test_band_extent_zero_without_frozen() {
        let axis = three_cells();
        assert_eq!(axis.band_extent(), 0.0);
        assert_eq!(axis.scrollable_extent(), axis.total_extent());
    }

    #[test]
    fn test_fully_frozen_axis_has_degenerate_body() {
        let axis = AxisLayout::new(&[10.0, 20.0], 2.0, 2);
        assert_eq!(axis.band_extent(), 34.0);
        // Only the trailing gap remains scrollable
        assert_eq!(axis.scrollable_extent(), 2.0);
        assert_eq!(axis.circular_stride(), 0.0);
    }

    #[test]
    fn test_index_at_assigns_gaps() {
        let axis = three_cells();

        // Leading gap resolves to the first cell
        assert_eq!(axis.index_at(0.0), Some(0));
        assert_eq!(axis.index_at(2.0), Some(0));
        // The gap after a cell resolves to that cell
        assert_eq!(axis.index_at(13.0), Some(0));
        assert_eq!(axis.index_at(14.0), Some(1));
        assert_eq!(axis.index_at(35.0), Some(1));
        assert_eq!(axis.index_at(40.0), Some(2));
        // Past the end clamps to the last cell
        assert_eq!(axis.index_at(68.0), Some(2));
        assert_eq!(axis.index_at(1000.0), Some(2));
    }

    #[test]
    fn test_index_at_empty_axis() {
        let axis = AxisLayout::new(&[], 2.0, 0);
        assert_eq!(axis.index_at(0.0), None);
    }

    #[test]
    fn test_visible_range_conservative() {
        let axis = three_cells();

        assert_eq!(axis.visible_range(0.0, 20.0), Some((0, 1)));
        assert_eq!(axis.visible_range(14.0, 1.0), Some((1, 1)));
        assert_eq!(axis.visible_range(0.0, 0.0), None);
        assert_eq!(axis.visible_range(0.0, 1000.0), Some((0, 2)));
    }

    #[test]
    fn test_cell_intersects_is_exact() {
        let axis = three_cells();

        // Window covering only the gap between cells 0 and 1
        assert!(!axis.cell_intersects(0, 12.0, 14.0));
        assert!(!axis.cell_intersects(1, 12.0, 14.0));
        // Window touching cell 1's first pixel
        assert!(axis.cell_intersects(1, 13.0, 15.0));
        // Cell starting exactly at the window end is out
        assert!(!axis.cell_intersects(1, 0.0, 14.0));

        let hidden = AxisLayout::new(&[10.0, 0.0, 30.0], 2.0, 0);
        // Zero-size cells are never visible
        assert!(!hidden.cell_intersects(1, 0.0, 100.0));
    }

    #[test]
    fn test_line_positions_center_gaps() {
        let axis = three_cells();

        assert_eq!(axis.line_position(0), Some(1.0));
        assert_eq!(axis.line_position(1), Some(13.0));
        assert_eq!(axis.line_position(3), Some(67.0));
        assert_eq!(axis.line_position(4), None);
    }

    #[test]
    fn test_zero_spacing() {
        let axis = AxisLayout::new(&[10.0, 10.0], 0.0, 0);
        assert_eq!(axis.offset_of(0), Some(0.0));
        assert_eq!(axis.offset_of(1), Some(10.0));
        assert_eq!(axis.total_extent(), 20.0);
        assert_eq!(axis.circular_stride(), 20.0);
    }
}
