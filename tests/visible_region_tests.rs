//! Visible-region resolution tests
//!
//! Tests for window intersection, half-open edge handling, entry ordering,
//! and frame placement relative to the viewport origin.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use std::collections::HashSet;

use gridview::{
    resolve, Band, CellCoord, EdgeInsets, GridLayout, GridSource, GridSpec, Point, Rect,
    ResolvedPass, Size, Viewport,
};

/// Build a layout and resolve one pass at the given frame and scroll.
fn pass_for(source: &GridSource, frame: Size, scroll: Point) -> ResolvedPass {
    let spec = GridSpec::build(source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(frame);
    viewport.set_scroll(scroll, &layout);
    resolve(&layout, &viewport)
}

fn coords_of(pass: &ResolvedPass) -> Vec<(u32, u32)> {
    pass.entries
        .iter()
        .map(|e| (e.coord.column, e.coord.row))
        .collect()
}

// =============================================================================
// WINDOW INTERSECTION
// =============================================================================

#[test]
fn test_all_cells_visible_in_large_viewport() {
    // 4x3 grid of 25x15 cells with 1px gaps fits a 200x100 viewport.
    let source = GridSource::uniform(4, 3, 25.0, 15.0);
    let pass = pass_for(&source, Size::new(200.0, 100.0), Point::ZERO);

    assert_eq!(pass.entries.len(), 12);
    assert_eq!(pass.entries[0].frame, Rect::new(1.0, 1.0, 25.0, 15.0));
    assert!(pass.entries.iter().all(|e| e.band == Band::Body));

    // Row-major output: all of row 0 before any of row 1.
    let coords = coords_of(&pass);
    assert_eq!(&coords[..4], &[(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(
        pass.entries.last().unwrap().frame.origin(),
        Point::new(79.0, 33.0)
    );
}

#[test]
fn test_window_excludes_cells_fully_outside() {
    let source = GridSource::uniform(10, 20, 64.0, 20.0);
    let pass = pass_for(&source, Size::new(320.0, 480.0), Point::new(70.0, 0.0));

    // Columns 1..=5 intersect [70, 390); every row fits in 480.
    assert_eq!(pass.entries.len(), 100);
    assert!(pass
        .entries
        .iter()
        .all(|e| (1..=5).contains(&e.coord.column)));
    assert_eq!(pass.entries[0].coord, CellCoord::new(1, 0));
    assert_eq!(pass.entries[0].frame.x, -4.0);
}

#[test]
fn test_cells_touching_window_edges_are_excluded() {
    // Three 10px cells with 1px gaps: cell 1 starts at content x = 12.
    let source = GridSource::uniform(3, 1, 10.0, 10.0);

    // Window [0, 12): cell 1 starts exactly at the window end and is out.
    let pass = pass_for(&source, Size::new(12.0, 20.0), Point::ZERO);
    assert_eq!(coords_of(&pass), vec![(0, 0)]);

    // Half a pixel more brings it in.
    let pass = pass_for(&source, Size::new(12.5, 20.0), Point::ZERO);
    assert_eq!(coords_of(&pass), vec![(0, 0), (1, 0)]);

    // Window [11, 23): cell 0 ends exactly at the window start, cell 2
    // starts exactly at the window end; both are out.
    let pass = pass_for(&source, Size::new(12.0, 20.0), Point::new(11.0, 0.0));
    assert_eq!(coords_of(&pass), vec![(1, 0)]);
}

#[test]
fn test_matches_independent_enumeration() {
    // Non-uniform sizes; the expected set is recomputed here from scratch.
    let widths: [f32; 12] = [
        20.0, 30.0, 40.0, 50.0, 20.0, 30.0, 40.0, 50.0, 20.0, 30.0, 40.0, 50.0,
    ];
    let heights: [f32; 9] = [10.0, 15.0, 20.0, 10.0, 15.0, 20.0, 10.0, 15.0, 20.0];
    let source = GridSource::uniform(12, 9, 0.0, 0.0)
        .with_spacing(Size::new(2.0, 2.0))
        .with_column_width(move |c| widths.get(c as usize).copied().unwrap_or(0.0))
        .with_row_height(move |r| heights.get(r as usize).copied().unwrap_or(0.0));

    let scroll = Point::new(120.0, 30.0);
    let frame = Size::new(100.0, 60.0);
    let pass = pass_for(&source, frame, scroll);

    // Walk the same geometry by hand: a 2px gap precedes every cell.
    let mut visible_cols = Vec::new();
    let mut x = 2.0;
    for (column, width) in widths.iter().copied().enumerate() {
        if x < scroll.x + frame.width && x + width > scroll.x {
            visible_cols.push(column as u32);
        }
        x += width + 2.0;
    }
    let mut visible_rows = Vec::new();
    let mut y = 2.0;
    for (row, height) in heights.iter().copied().enumerate() {
        if y < scroll.y + frame.height && y + height > scroll.y {
            visible_rows.push(row as u32);
        }
        y += height + 2.0;
    }
    let mut expected = HashSet::new();
    for &row in &visible_rows {
        for &column in &visible_cols {
            expected.insert((column, row));
        }
    }

    let actual: HashSet<(u32, u32)> = coords_of(&pass).into_iter().collect();
    assert_eq!(actual, expected);
    assert_eq!(pass.entries.len(), 16);

    // Spot-check one frame against the hand-walked offsets.
    let entry = pass
        .entries
        .iter()
        .find(|e| e.coord == CellCoord::new(3, 2))
        .unwrap();
    assert_eq!(entry.frame, Rect::new(-22.0, 1.0, 50.0, 20.0));
}

#[test]
fn test_zero_size_rows_are_skipped() {
    let source = GridSource::uniform(1, 3, 10.0, 10.0)
        .with_row_height(|row| if row == 1 { 0.0 } else { 10.0 });
    let pass = pass_for(&source, Size::new(50.0, 50.0), Point::ZERO);

    let rows: Vec<u32> = pass.entries.iter().map(|e| e.coord.row).collect();
    assert_eq!(rows, vec![0, 2]);
}

// =============================================================================
// DEGENERATE INPUTS
// =============================================================================

#[test]
fn test_empty_grid_resolves_empty() {
    let no_columns = GridSource::uniform(0, 5, 10.0, 10.0);
    let pass = pass_for(&no_columns, Size::new(100.0, 100.0), Point::ZERO);
    assert!(pass.entries.is_empty());
    assert!(pass.lines.is_empty());

    let no_rows = GridSource::uniform(5, 0, 10.0, 10.0);
    let pass = pass_for(&no_rows, Size::new(100.0, 100.0), Point::ZERO);
    assert!(pass.entries.is_empty());
}

#[test]
fn test_zero_frame_resolves_empty() {
    let source = GridSource::uniform(5, 5, 10.0, 10.0);
    let pass = pass_for(&source, Size::ZERO, Point::ZERO);

    assert!(pass.entries.is_empty());
    assert!(pass.lines.is_empty());
}

#[test]
fn test_insets_shrink_the_window() {
    let source = GridSource::uniform(10, 20, 64.0, 20.0);
    let spec = GridSpec::build(&source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));
    viewport.set_insets(EdgeInsets::new(0.0, 100.0, 0.0, 0.0), &layout);

    let pass = resolve(&layout, &viewport);
    // Content width 220 cuts the visible columns from five to four.
    assert_eq!(pass.entries.len(), 80);
    assert!(pass.entries.iter().all(|e| e.coord.column <= 3));
}

// =============================================================================
// ORDERING AND FRAMES
// =============================================================================

#[test]
fn test_entries_are_row_major() {
    let source = GridSource::uniform(6, 6, 30.0, 30.0);
    let pass = pass_for(&source, Size::new(400.0, 400.0), Point::ZERO);

    let coords = coords_of(&pass);
    let mut sorted = coords.clone();
    sorted.sort_by_key(|&(column, row)| (row, column));
    assert_eq!(coords, sorted);
}

#[test]
fn test_frames_track_scroll_offset() {
    // 421px of rows against a 400px frame leaves exactly 21px of y travel.
    let source = GridSource::uniform(10, 20, 64.0, 20.0);
    let pass = pass_for(&source, Size::new(320.0, 400.0), Point::new(70.0, 21.0));

    // Row 0 ends exactly at the window start, so rows 1..=19 remain.
    assert_eq!(pass.entries.len(), 95);
    let first = &pass.entries[0];
    assert_eq!(first.coord, CellCoord::new(1, 1));
    assert_eq!(first.frame.origin(), Point::new(-4.0, 1.0));

    // Every frame is its content offset shifted by the scroll.
    for entry in &pass.entries {
        let content_x = 1.0 + 65.0 * entry.coord.column as f32;
        let content_y = 1.0 + 21.0 * entry.coord.row as f32;
        assert_eq!(entry.frame.x, content_x - 70.0);
        assert_eq!(entry.frame.y, content_y - 21.0);
    }
}
