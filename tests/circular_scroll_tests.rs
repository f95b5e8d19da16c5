//! Circular scrolling tests
//!
//! Tests for offset normalization, window splitting at the wrap seam,
//! repetition bookkeeping, and the clamp fallback when content fits.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashMap;

use gridview::{
    resolve, Band, CircularScrolling, GridLayout, GridSource, GridSpec, Point, ResolvedPass, Size,
    Viewport,
};

/// Build a layout and resolve one pass at the given frame and scroll.
fn pass_for(source: &GridSource, frame: Size, scroll: Point) -> ResolvedPass {
    let spec = GridSpec::build(source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(frame);
    viewport.set_scroll(scroll, &layout);
    resolve(&layout, &viewport)
}

/// Four 50px columns with 1px gaps on a wrapping horizontal axis.
/// Total extent 205, circular stride 204.
fn ring_source() -> GridSource {
    GridSource::uniform(4, 1, 50.0, 50.0).with_circular(CircularScrolling::HORIZONTAL)
}

fn column_positions(pass: &ResolvedPass) -> HashMap<u32, f32> {
    pass.entries
        .iter()
        .map(|e| (e.coord.column, e.frame.x))
        .collect()
}

// =============================================================================
// STRIDE AND NORMALIZATION
// =============================================================================

#[test]
fn test_stride_drops_one_gap() {
    let spec = GridSpec::build(&ring_source()).unwrap();
    let layout = GridLayout::new(&spec).unwrap();

    // 4 cells + 5 gaps = 205; tiled copies share one seam gap.
    assert_eq!(layout.columns().total_extent(), 205.0);
    assert_eq!(layout.columns().circular_stride(), 204.0);
}

#[test]
fn test_scroll_is_unclamped() {
    let spec = GridSpec::build(&ring_source()).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(Size::new(120.0, 60.0));

    viewport.set_scroll(Point::new(-5_000.0, 0.0), &layout);
    assert_eq!(viewport.scroll.x, -5_000.0);

    // -5000 normalizes to offset 100: columns 1..=3 plus column 0 wrapping
    // in at the right edge.
    let pass = resolve(&layout, &viewport);
    assert_eq!(pass.entries.len(), 4);
    let positions = column_positions(&pass);
    assert_eq!(positions.get(&1), Some(&-48.0));
    assert_eq!(positions.get(&2), Some(&3.0));
    assert_eq!(positions.get(&3), Some(&54.0));
    assert_eq!(positions.get(&0), Some(&105.0));
}

#[test]
fn test_offsets_are_periodic() {
    let frame = Size::new(120.0, 60.0);
    let source = ring_source();

    let near = pass_for(&source, frame, Point::new(-30.0, 0.0));
    let behind = pass_for(&source, frame, Point::new(-30.0 - 204.0 * 7.0, 0.0));
    let ahead = pass_for(&source, frame, Point::new(174.0 + 204.0 * 2.0, 0.0));

    assert_eq!(near.entries, behind.entries);
    // -30 and 174 land on the same normalized offset.
    assert_eq!(near.entries, ahead.entries);
}

// =============================================================================
// WRAP SEAM
// =============================================================================

#[test]
fn test_wrap_splits_visible_window() {
    let pass = pass_for(&ring_source(), Size::new(120.0, 60.0), Point::new(-30.0, 0.0));

    // Offset 174: column 3 bleeds in from the previous repetition on the
    // left, columns 0 and 1 follow, column 2 stays off screen.
    assert_eq!(pass.entries.len(), 3);
    let positions = column_positions(&pass);
    assert_eq!(positions.get(&3), Some(&-20.0));
    assert_eq!(positions.get(&0), Some(&31.0));
    assert_eq!(positions.get(&1), Some(&82.0));
    assert_eq!(positions.get(&2), None);
}

#[test]
fn test_seam_keeps_a_single_gap() {
    let pass = pass_for(&ring_source(), Size::new(120.0, 60.0), Point::new(-30.0, 0.0));

    let positions = column_positions(&pass);
    let last_end = positions.get(&3).unwrap() + 50.0;
    let first_start = *positions.get(&0).unwrap();
    // End of the previous repetition to start of this one: one gap.
    assert_eq!(first_start - last_end, 1.0);
}

#[test]
fn test_duplicate_candidates_keep_primary_window() {
    // Stride 102 against a 100px viewport: at offset 4 column 0 is visible
    // both in the main window and in the wrapped copy. Only the main
    // placement survives.
    let source =
        GridSource::uniform(2, 1, 50.0, 50.0).with_circular(CircularScrolling::HORIZONTAL);
    let pass = pass_for(&source, Size::new(100.0, 60.0), Point::new(4.0, 0.0));

    assert_eq!(pass.entries.len(), 2);
    let positions = column_positions(&pass);
    assert_eq!(positions.get(&0), Some(&-3.0));
    assert_eq!(positions.get(&1), Some(&48.0));
}

#[test]
fn test_wrap_requires_stride_exceeding_viewport() {
    // Two 30px columns: stride 62 fits a 200px viewport, so the axis falls
    // back to clamping.
    let source =
        GridSource::uniform(2, 1, 30.0, 30.0).with_circular(CircularScrolling::HORIZONTAL);
    let spec = GridSpec::build(&source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(Size::new(200.0, 60.0));

    viewport.set_scroll(Point::new(500.0, 0.0), &layout);
    assert_eq!(viewport.scroll.x, 0.0);

    let pass = resolve(&layout, &viewport);
    assert_eq!(pass.entries.len(), 2);
    assert_eq!(pass.entries[0].frame.x, 1.0);
}

// =============================================================================
// OTHER AXES AND BANDS
// =============================================================================

#[test]
fn test_vertical_wrap_mirrors_horizontal() {
    let source = GridSource::uniform(1, 4, 50.0, 50.0).with_circular(CircularScrolling::VERTICAL);
    let pass = pass_for(&source, Size::new(60.0, 120.0), Point::new(0.0, -30.0));

    assert_eq!(pass.entries.len(), 3);
    let positions: HashMap<u32, f32> = pass
        .entries
        .iter()
        .map(|e| (e.coord.row, e.frame.y))
        .collect();
    assert_eq!(positions.get(&3), Some(&-20.0));
    assert_eq!(positions.get(&0), Some(&31.0));
    assert_eq!(positions.get(&1), Some(&82.0));
}

#[test]
fn test_both_axes_wrap_independently() {
    let source = GridSource::uniform(4, 4, 50.0, 50.0).with_circular(CircularScrolling::BOTH);
    let pass = pass_for(&source, Size::new(120.0, 120.0), Point::new(-30.0, -30.0));

    // Columns {3, 0, 1} by rows {3, 0, 1}.
    assert_eq!(pass.entries.len(), 9);
    let corner = pass
        .entries
        .iter()
        .find(|e| e.coord.column == 3 && e.coord.row == 3)
        .unwrap();
    assert_eq!(corner.frame.origin(), Point::new(-20.0, -20.0));
}

#[test]
fn test_wrap_with_frozen_band() {
    // Column 0 frozen, the remaining four columns wrap behind it.
    let source = GridSource::uniform(5, 1, 50.0, 50.0)
        .with_frozen(1, 0)
        .with_circular(CircularScrolling::HORIZONTAL);
    let pass = pass_for(&source, Size::new(150.0, 60.0), Point::new(-30.0, 0.0));

    assert_eq!(pass.entries.len(), 4);
    let positions = column_positions(&pass);
    assert_eq!(positions.get(&0), Some(&1.0));
    assert_eq!(positions.get(&4), Some(&31.0));
    assert_eq!(positions.get(&1), Some(&82.0));
    assert_eq!(positions.get(&2), Some(&133.0));

    // The frozen cell never re-enters through the wrapped window.
    let frozen = pass
        .entries
        .iter()
        .find(|e| e.coord.column == 0)
        .unwrap();
    assert_eq!(frozen.band, Band::ColumnHeader);
}
