//! Merged span tests
//!
//! Tests for span collapsing, span frames across spacing and frozen
//! boundaries, overlap rejection, and grid-line cuts over span interiors.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::{
    resolve, Band, CellCoord, GridError, GridLayout, GridLineSegment, GridSource, GridSpec,
    LineOrientation, Point, Rect, ResolvedPass, Size, SpanRect, Viewport,
};

/// Build a layout and resolve one pass at the given frame and scroll.
fn pass_for(source: &GridSource, frame: Size, scroll: Point) -> ResolvedPass {
    let spec = GridSpec::build(source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let mut viewport = Viewport::with_frame(frame);
    viewport.set_scroll(scroll, &layout);
    resolve(&layout, &viewport)
}

fn segments_at(
    pass: &ResolvedPass,
    orientation: LineOrientation,
    index: u32,
) -> Vec<&GridLineSegment> {
    pass.lines
        .iter()
        .filter(|l| l.orientation == orientation && l.index == index)
        .collect()
}

// =============================================================================
// SPAN COLLAPSING
// =============================================================================

#[test]
fn test_span_collapses_to_one_entry() {
    let source = GridSource::uniform(5, 5, 64.0, 20.0).with_spans(vec![SpanRect::new(1, 1, 2, 2)]);
    let pass = pass_for(&source, Size::new(400.0, 200.0), Point::ZERO);

    // 25 cells minus 4 covered plus 1 span entry.
    assert_eq!(pass.entries.len(), 22);

    let spanned: Vec<&gridview::VisibleCellEntry> =
        pass.entries.iter().filter(|e| e.span.is_some()).collect();
    assert_eq!(spanned.len(), 1);
    assert_eq!(spanned[0].coord, CellCoord::new(1, 1));
    assert_eq!(spanned[0].frame, Rect::new(66.0, 22.0, 129.0, 41.0));

    // Covered cells never show up on their own.
    for covered in [(2, 1), (1, 2), (2, 2)] {
        assert!(
            !pass
                .entries
                .iter()
                .any(|e| e.coord == CellCoord::new(covered.0, covered.1)),
            "covered cell {covered:?} leaked into the output"
        );
    }
}

#[test]
fn test_span_frame_includes_interior_gaps() {
    let source = GridSource::uniform(5, 5, 30.0, 20.0)
        .with_spacing(Size::new(2.0, 2.0))
        .with_spans(vec![SpanRect::new(1, 1, 2, 2)]);
    let pass = pass_for(&source, Size::new(200.0, 150.0), Point::ZERO);

    assert_eq!(pass.entries.len(), 22);
    let entry = pass.entries.iter().find(|e| e.span.is_some()).unwrap();
    // Two 30px columns plus the 2px gap between them; two 20px rows plus
    // the 2px gap between them.
    assert_eq!(entry.frame, Rect::new(34.0, 24.0, 62.0, 42.0));
}

#[test]
fn test_span_visible_through_any_covered_cell() {
    // Only the third covered column intersects the window; the whole span
    // still resolves, anchored off screen to the left.
    let source = GridSource::uniform(10, 1, 64.0, 20.0).with_spans(vec![SpanRect::new(0, 0, 3, 1)]);
    let pass = pass_for(&source, Size::new(100.0, 60.0), Point::new(150.0, 0.0));

    assert_eq!(pass.entries.len(), 2);
    let entry = &pass.entries[0];
    assert_eq!(entry.coord, CellCoord::new(0, 0));
    assert_eq!(entry.frame.x, -149.0);
    assert_eq!(entry.frame.max_x(), 45.0);
    assert_eq!(pass.entries[1].coord, CellCoord::new(3, 0));
}

// =============================================================================
// SPANS AND FROZEN BANDS
// =============================================================================

#[test]
fn test_span_pinned_inside_frozen_band() {
    let source = GridSource::uniform(10, 1, 64.0, 20.0)
        .with_frozen(3, 0)
        .with_spans(vec![SpanRect::new(0, 0, 2, 1)]);

    let near = pass_for(&source, Size::new(320.0, 60.0), Point::new(30.0, 0.0));
    let far = pass_for(&source, Size::new(320.0, 60.0), Point::new(90.0, 0.0));

    let entry = near.entries.iter().find(|e| e.span.is_some()).unwrap();
    assert_eq!(entry.band, Band::ColumnHeader);
    assert_eq!(entry.frame, Rect::new(1.0, 1.0, 129.0, 20.0));
    assert_eq!(near.entries.len(), 5);

    // Fully frozen spans ignore scroll entirely.
    let moved = far.entries.iter().find(|e| e.span.is_some()).unwrap();
    assert_eq!(moved.frame, entry.frame);
}

#[test]
fn test_span_straddling_frozen_edge() {
    // Span covers one frozen and one scrollable column: the start pins,
    // the end scrolls, so the span shrinks as the body slides under it.
    let source = GridSource::uniform(10, 1, 64.0, 20.0)
        .with_frozen(2, 0)
        .with_spans(vec![SpanRect::new(1, 0, 2, 1)]);
    let pass = pass_for(&source, Size::new(320.0, 60.0), Point::new(30.0, 0.0));

    assert_eq!(pass.entries.len(), 5);
    let entry = pass.entries.iter().find(|e| e.span.is_some()).unwrap();
    assert_eq!(entry.coord, CellCoord::new(1, 0));
    assert_eq!(entry.band, Band::ColumnHeader);
    assert_eq!(entry.frame.x, 66.0);
    assert_eq!(entry.frame.max_x(), 165.0);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_overlapping_spans_are_rejected() {
    let source = GridSource::uniform(5, 5, 30.0, 20.0)
        .with_spans(vec![SpanRect::new(0, 0, 2, 2), SpanRect::new(1, 1, 2, 2)]);

    // Bounds are fine, so the spec builds; the merge index catches the
    // shared cell.
    let spec = GridSpec::build(&source).unwrap();
    let err = GridLayout::new(&spec).unwrap_err();
    assert!(matches!(err, GridError::SpanOverlap { .. }), "got {err:?}");
}

#[test]
fn test_out_of_bounds_span_is_rejected() {
    let source = GridSource::uniform(5, 5, 30.0, 20.0).with_spans(vec![SpanRect::new(4, 0, 2, 1)]);

    let err = GridSpec::build(&source).unwrap_err();
    assert!(matches!(err, GridError::SpanOutOfBounds { .. }), "got {err:?}");
}

// =============================================================================
// GRID LINES OVER SPANS
// =============================================================================

#[test]
fn test_line_skips_span_interior_vertical() {
    // Horizontal 2x1 span: the vertical line between its columns is cut
    // over the spanned row and kept above and below it.
    let source = GridSource::uniform(3, 2, 10.0, 10.0).with_spans(vec![SpanRect::new(0, 0, 2, 1)]);
    let pass = pass_for(&source, Size::new(34.0, 23.0), Point::ZERO);

    let cut = segments_at(&pass, LineOrientation::Vertical, 1);
    assert_eq!(cut.len(), 2);
    assert_eq!((cut[0].start, cut[0].end), (0.0, 0.5));
    assert_eq!((cut[1].start, cut[1].end), (11.5, 23.0));

    // The line after the span's last column is intact.
    let whole = segments_at(&pass, LineOrientation::Vertical, 2);
    assert_eq!(whole.len(), 1);
    assert_eq!((whole[0].start, whole[0].end), (0.0, 23.0));
}

#[test]
fn test_line_skips_span_interior_horizontal() {
    // Vertical 1x3 span cuts both horizontal lines crossing it.
    let source = GridSource::uniform(3, 3, 10.0, 10.0).with_spans(vec![SpanRect::new(1, 0, 1, 3)]);
    let pass = pass_for(&source, Size::new(34.0, 34.0), Point::ZERO);

    for index in [1, 2] {
        let cut = segments_at(&pass, LineOrientation::Horizontal, index);
        assert_eq!(cut.len(), 2, "boundary {index}");
        assert_eq!((cut[0].start, cut[0].end), (0.0, 11.5));
        assert_eq!((cut[1].start, cut[1].end), (22.5, 34.0));
    }

    // Top and bottom edges run the full width.
    for index in [0, 3] {
        let edge = segments_at(&pass, LineOrientation::Horizontal, index);
        assert_eq!(edge.len(), 1, "boundary {index}");
        assert_eq!((edge[0].start, edge[0].end), (0.0, 34.0));
    }
}

#[test]
fn test_single_cell_span_is_plain() {
    let source = GridSource::uniform(3, 1, 10.0, 10.0).with_spans(vec![SpanRect::new(1, 0, 1, 1)]);
    let pass = pass_for(&source, Size::new(34.0, 12.0), Point::ZERO);

    assert_eq!(pass.entries.len(), 3);
    let entry = pass
        .entries
        .iter()
        .find(|e| e.coord == CellCoord::new(1, 0))
        .unwrap();
    assert!(entry.span.is_some());
    assert_eq!(entry.frame, Rect::new(12.0, 1.0, 10.0, 10.0));

    // A 1x1 span has no interior, so no line is cut.
    let line = segments_at(&pass, LineOrientation::Vertical, 1);
    assert_eq!(line.len(), 1);
    assert_eq!((line[0].start, line[0].end), (0.0, 12.0));
}

// =============================================================================
// LAYOUT QUERIES
// =============================================================================

#[test]
fn test_cell_rect_is_span_aware() {
    let span = SpanRect::new(1, 1, 2, 2);
    let source = GridSource::uniform(5, 5, 64.0, 20.0).with_spans(vec![span]);
    let spec = GridSpec::build(&source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();

    let expected = Rect::new(66.0, 22.0, 129.0, 41.0);
    assert_eq!(layout.span_rect(&span), Some(expected));
    // Every covered cell reports the whole span rectangle.
    assert_eq!(layout.cell_rect(CellCoord::new(1, 1)), Some(expected));
    assert_eq!(layout.cell_rect(CellCoord::new(2, 2)), Some(expected));
    // Plain cells report their own rectangle.
    assert_eq!(
        layout.cell_rect(CellCoord::new(0, 0)),
        Some(Rect::new(1.0, 1.0, 64.0, 20.0))
    );

    assert_eq!(layout.merges().anchor_of(CellCoord::new(2, 1)), CellCoord::new(1, 1));
    assert!(layout.merges().is_interior(CellCoord::new(2, 1)));
    assert!(!layout.merges().is_interior(CellCoord::new(1, 1)));
}
