//! Visible-region resolution.
//!
//! One resolve pass intersects the scroll window with both axis tables,
//! collapses merged spans to a single entry, and emits band-ordered cell
//! entries plus grid-line segments. The pass is pure: it reads the layout
//! and the viewport and owns no state of its own.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Band, BorderStyle, CellCoord, GridStyle, Rect, Size, SpanRect};

use super::axis::AxisLayout;
use super::circular::AxisMapping;
use super::grid_layout::GridLayout;
use super::viewport::Viewport;

/// One visible cell, or one merged span collapsed to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCellEntry {
    /// Cell coordinate; the anchor for spans.
    pub coord: CellCoord,
    /// Frame relative to the effective viewport origin. Frames are not
    /// clipped: body cells may extend under the frozen band or past the
    /// viewport edge, and hosts clip at draw time.
    pub frame: Rect,
    /// Band the entry belongs to.
    pub band: Band,
    /// The merged span this entry stands for, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<SpanRect>,
}

/// Orientation of a grid-line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineOrientation {
    Vertical,
    Horizontal,
}

/// One grid-line segment in viewport space.
///
/// Lines run through gap centers. A line crossing merged spans is split
/// into segments that leave the span interiors open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLineSegment {
    pub orientation: LineOrientation,
    /// Boundary index along the line's own axis, `0..=count`.
    pub index: u32,
    /// Cross-axis position: x for vertical lines, y for horizontal.
    pub position: f32,
    /// Segment start along the line.
    pub start: f32,
    /// Segment end along the line.
    pub end: f32,
    pub style: BorderStyle,
}

/// Output of one resolve pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedPass {
    /// Entries in band order, row-major within each band.
    pub entries: Vec<VisibleCellEntry>,
    /// Grid-line segments, verticals before horizontals.
    pub lines: Vec<GridLineSegment>,
}

/// Candidate index range cut from one axis window.
#[derive(Debug, Clone, Copy)]
struct AxisPart {
    lo: u32,
    hi: u32,
    /// Content-space window the exact visibility test runs against.
    window: (f32, f32),
    /// Viewport shift applied to cell offsets; `None` for pinned indices.
    shift: Option<f32>,
    repetition: i32,
}

#[derive(Debug, Clone, Copy)]
struct VisibleIndex {
    index: u32,
    shift: Option<f32>,
    repetition: i32,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    span: Option<SpanRect>,
    shift_x: Option<f32>,
    shift_y: Option<f32>,
    /// (row, column) repetition pair; the lowest pair survives dedup.
    repetition: (i32, i32),
}

/// Resolve the visible region for one viewport state.
pub fn resolve(layout: &GridLayout, viewport: &Viewport) -> ResolvedPass {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "resolve_pass",
        w = viewport.frame.width,
        h = viewport.frame.height,
        scroll_x = viewport.scroll.x,
        scroll_y = viewport.scroll.y
    )
    .entered();

    let content = viewport.content_size();
    if content.is_empty() || layout.columns().count() == 0 || layout.rows().count() == 0 {
        return ResolvedPass::default();
    }

    let column_mapper = layout.column_mapper(content.width);
    let row_mapper = layout.row_mapper(content.height);
    let x_state = column_mapper.normalize(viewport.scroll.x);
    let y_state = row_mapper.normalize(viewport.scroll.y);

    let col_parts = axis_parts(
        layout.columns(),
        x_state,
        column_mapper.wraps(),
        column_mapper.stride(),
        content.width,
    );
    let row_parts = axis_parts(
        layout.rows(),
        y_state,
        row_mapper.wraps(),
        row_mapper.stride(),
        content.height,
    );

    let visible_cols = visible_indices(layout.columns(), &col_parts);
    let visible_rows = visible_indices(layout.rows(), &row_parts);

    let mut pending: HashMap<CellCoord, Candidate> = HashMap::new();
    for col in &visible_cols {
        for row in &visible_rows {
            let coord = CellCoord::new(col.index, row.index);
            let (key, span) = match layout.merges().span_containing(coord) {
                Some(span) => (span.anchor(), Some(*span)),
                None => (coord, None),
            };
            let candidate = Candidate {
                span,
                shift_x: col.shift,
                shift_y: row.shift,
                repetition: (row.repetition, col.repetition),
            };
            match pending.entry(key) {
                Entry::Occupied(mut slot) => {
                    if candidate.repetition < slot.get().repetition {
                        slot.insert(candidate);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
            }
        }
    }

    let primary_x = -x_state.offset;
    let primary_y = -y_state.offset;
    let mut entries: Vec<VisibleCellEntry> = pending
        .into_iter()
        .filter_map(|(coord, candidate)| {
            let frame = entry_frame(layout, coord, &candidate, primary_x, primary_y)?;
            Some(VisibleCellEntry {
                coord,
                frame,
                band: layout.band_of(coord),
                span: candidate.span,
            })
        })
        .collect();
    entries.sort_by(|a, b| a.band.cmp(&b.band).then_with(|| a.coord.cmp(&b.coord)));

    let lines = match layout.grid_style() {
        GridStyle::Solid(border) => {
            resolve_lines(layout, content, &col_parts, &row_parts, x_state, y_state, border)
        }
        GridStyle::None => Vec::new(),
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(
        entries = entries.len(),
        lines = lines.len(),
        "resolved visible region"
    );

    ResolvedPass { entries, lines }
}

/// Cut the axis into candidate parts: one pinned part for the frozen band
/// and one or two scrolled parts (two when the window wraps the seam).
fn axis_parts(
    axis: &AxisLayout,
    state: AxisMapping,
    wraps: bool,
    stride: f32,
    viewport_extent: f32,
) -> Vec<AxisPart> {
    let mut parts = Vec::with_capacity(3);
    let frozen = axis.frozen();
    let band = axis.band_extent();

    if frozen > 0 {
        parts.push(AxisPart {
            lo: 0,
            hi: frozen - 1,
            window: (0.0, viewport_extent),
            shift: None,
            repetition: 0,
        });
    }
    if frozen >= axis.count() {
        return parts;
    }

    let scrollable_viewport = viewport_extent - band;
    if scrollable_viewport <= 0.0 {
        return parts;
    }

    let offset = state.offset;
    if wraps {
        push_body_part(
            &mut parts,
            axis,
            band + offset,
            scrollable_viewport,
            -offset,
            state.repetition,
        );
        let overflow = offset + scrollable_viewport - stride;
        if overflow > 0.0 {
            push_body_part(
                &mut parts,
                axis,
                band,
                overflow,
                stride - offset,
                state.repetition.saturating_add(1),
            );
        }
    } else {
        push_body_part(&mut parts, axis, band + offset, scrollable_viewport, -offset, 0);
    }
    parts
}

fn push_body_part(
    parts: &mut Vec<AxisPart>,
    axis: &AxisLayout,
    window_start: f32,
    window_extent: f32,
    shift: f32,
    repetition: i32,
) {
    let Some((lo, hi)) = axis.visible_range(window_start, window_extent) else {
        return;
    };
    let lo = lo.max(axis.frozen());
    if lo > hi {
        return;
    }
    parts.push(AxisPart {
        lo,
        hi,
        window: (window_start, window_start + window_extent),
        shift: Some(shift),
        repetition,
    });
}

fn visible_indices(axis: &AxisLayout, parts: &[AxisPart]) -> Vec<VisibleIndex> {
    let mut out = Vec::new();
    for part in parts {
        for index in part.lo..=part.hi {
            if axis.cell_intersects(index, part.window.0, part.window.1) {
                out.push(VisibleIndex {
                    index,
                    shift: part.shift,
                    repetition: part.repetition,
                });
            }
        }
    }
    out
}

fn entry_frame(
    layout: &GridLayout,
    coord: CellCoord,
    candidate: &Candidate,
    primary_x: f32,
    primary_y: f32,
) -> Option<Rect> {
    let columns = layout.columns();
    let rows = layout.rows();
    match candidate.span {
        Some(span) => {
            // A span detected through a pinned coordinate still scrolls its
            // body part with the current window.
            let shift_x = candidate.shift_x.unwrap_or(primary_x);
            let shift_y = candidate.shift_y.unwrap_or(primary_y);
            let (x0, x1) = span_axis_extent(columns, span.column, span.end_column() - 1, shift_x)?;
            let (y0, y1) = span_axis_extent(rows, span.row, span.end_row() - 1, shift_y)?;
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
        None => {
            let x = columns.offset_of(coord.column)? + candidate.shift_x.unwrap_or(0.0);
            let y = rows.offset_of(coord.row)? + candidate.shift_y.unwrap_or(0.0);
            let width = columns.size_of(coord.column)?;
            let height = rows.size_of(coord.row)?;
            Some(Rect::new(x, y, width, height))
        }
    }
}

/// Viewport-space extent of an index run that may straddle the frozen
/// boundary. The pinned part and the shifted body part are unioned.
fn span_axis_extent(
    axis: &AxisLayout,
    start: u32,
    end_inclusive: u32,
    body_shift: f32,
) -> Option<(f32, f32)> {
    let frozen = axis.frozen();
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    if start < frozen {
        lo = axis.offset_of(start)?;
        hi = axis.end_of(end_inclusive.min(frozen - 1))?;
    }
    if end_inclusive >= frozen {
        let body_lo = axis.offset_of(start.max(frozen))? + body_shift;
        let body_hi = axis.end_of(end_inclusive)? + body_shift;
        lo = lo.min(body_lo);
        hi = hi.max(body_hi);
    }
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}

fn resolve_lines(
    layout: &GridLayout,
    content: Size,
    col_parts: &[AxisPart],
    row_parts: &[AxisPart],
    x_state: AxisMapping,
    y_state: AxisMapping,
    border: BorderStyle,
) -> Vec<GridLineSegment> {
    let columns = layout.columns();
    let rows = layout.rows();
    let mut lines = Vec::new();

    let x_end = cross_visible_end(columns, col_parts, content.width);
    let y_end = cross_visible_end(rows, row_parts, content.height);

    for part in col_parts {
        let shift = part.shift.unwrap_or(0.0);
        for boundary in part.lo..=part.hi + 1 {
            if skip_band_boundary(part, boundary, columns.frozen(), x_state.repetition) {
                continue;
            }
            let Some(base) = columns.line_position(boundary) else {
                continue;
            };
            let position = base + shift;
            if position < 0.0 || position > content.width {
                continue;
            }
            let mut cuts = Vec::new();
            for row_part in row_parts {
                let row_shift = row_part.shift.unwrap_or(0.0);
                for &(r0, r1) in layout.merges().vline_skips(boundary) {
                    if r0 > row_part.hi || r1 <= row_part.lo {
                        continue;
                    }
                    let (Some(c0), Some(c1)) = (
                        mapped_boundary(rows, r0, row_shift),
                        mapped_boundary(rows, r1, row_shift),
                    ) else {
                        continue;
                    };
                    cuts.push((c0, c1));
                }
            }
            for (start, end) in subtract_cuts(0.0, y_end, &mut cuts) {
                lines.push(GridLineSegment {
                    orientation: LineOrientation::Vertical,
                    index: boundary,
                    position,
                    start,
                    end,
                    style: border,
                });
            }
        }
    }

    for part in row_parts {
        let shift = part.shift.unwrap_or(0.0);
        for boundary in part.lo..=part.hi + 1 {
            if skip_band_boundary(part, boundary, rows.frozen(), y_state.repetition) {
                continue;
            }
            let Some(base) = rows.line_position(boundary) else {
                continue;
            };
            let position = base + shift;
            if position < 0.0 || position > content.height {
                continue;
            }
            let mut cuts = Vec::new();
            for col_part in col_parts {
                let col_shift = col_part.shift.unwrap_or(0.0);
                for &(c0, c1) in layout.merges().hline_skips(boundary) {
                    if c0 > col_part.hi || c1 <= col_part.lo {
                        continue;
                    }
                    let (Some(x0), Some(x1)) = (
                        mapped_boundary(columns, c0, col_shift),
                        mapped_boundary(columns, c1, col_shift),
                    ) else {
                        continue;
                    };
                    cuts.push((x0, x1));
                }
            }
            for (start, end) in subtract_cuts(0.0, x_end, &mut cuts) {
                lines.push(GridLineSegment {
                    orientation: LineOrientation::Horizontal,
                    index: boundary,
                    position,
                    start,
                    end,
                    style: border,
                });
            }
        }
    }

    lines.sort_by(compare_lines);
    lines
}

/// The line at the band edge is owned by the pinned side. Body parts drop
/// it, except a wrapped repetition whose copy sits at the tile seam.
fn skip_band_boundary(part: &AxisPart, boundary: u32, frozen: u32, main_repetition: i32) -> bool {
    part.shift.is_some()
        && frozen > 0
        && boundary == frozen
        && part.repetition == main_repetition
}

/// Map a cross-axis boundary to viewport space under the pinned-line rule:
/// boundaries at or before the frozen edge stay put, the rest scroll.
fn mapped_boundary(axis: &AxisLayout, boundary: u32, body_shift: f32) -> Option<f32> {
    let base = axis.line_position(boundary)?;
    if axis.frozen() > 0 && boundary <= axis.frozen() {
        Some(base)
    } else {
        Some(base + body_shift)
    }
}

/// How far visible content reaches along the cross axis, capped at the
/// viewport edge. Includes the trailing gap so lines run to the content
/// edge after the last visible cell.
fn cross_visible_end(axis: &AxisLayout, parts: &[AxisPart], viewport_extent: f32) -> f32 {
    let gap = axis.spacing();
    let mut end: f32 = 0.0;
    for part in parts {
        if let Some(cell_end) = axis.end_of(part.hi) {
            end = end.max(cell_end + part.shift.unwrap_or(0.0) + gap);
        }
    }
    end.min(viewport_extent)
}

/// Subtract cut intervals from `[start, end]`, yielding the surviving
/// pieces in order.
fn subtract_cuts(start: f32, end: f32, cuts: &mut Vec<(f32, f32)>) -> Vec<(f32, f32)> {
    if start >= end {
        return Vec::new();
    }
    if cuts.is_empty() {
        return vec![(start, end)];
    }
    cuts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    let mut out = Vec::new();
    let mut cursor = start;
    for &(c0, c1) in cuts.iter() {
        if c1 <= cursor {
            continue;
        }
        if c0 >= end {
            break;
        }
        if c0 > cursor {
            out.push((cursor, c0));
        }
        cursor = cursor.max(c1);
        if cursor >= end {
            break;
        }
    }
    if cursor < end {
        out.push((cursor, end));
    }
    out
}

fn compare_lines(a: &GridLineSegment, b: &GridLineSegment) -> Ordering {
    a.orientation
        .cmp(&b.orientation)
        .then_with(|| a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal))
        .then_with(|| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal))
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
    use crate::source::{CircularScrolling, GridSource};
    use crate::spec::GridSpec;
    use crate::types::Point;

    fn pass_for(source: &GridSource, frame: Size, scroll: Point) -> ResolvedPass {
        let spec = GridSpec::build(source).unwrap();
        let layout = GridLayout::new(&spec).unwrap();
        let mut viewport = Viewport::with_frame(frame);
        viewport.set_scroll(scroll, &layout);
        resolve(&layout, &viewport)
    }

    // ===== Entries =====

    #[test]
    fn test_full_grid_visible() {
        let source = GridSource::uniform(3, 2, 10.0, 10.0);
        let pass = pass_for(&source, Size::new(100.0, 100.0), Point::ZERO);

        assert_eq!(pass.entries.len(), 6);
        let coords: Vec<(u32, u32)> = pass
            .entries
            .iter()
            .map(|e| (e.coord.column, e.coord.row))
            .collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(pass.entries[0].frame, Rect::new(1.0, 1.0, 10.0, 10.0));
        assert!(pass.entries.iter().all(|e| e.band == Band::Body));
    }

    #[test]
    fn test_scrolled_window() {
        let source = GridSource::uniform(10, 20, 64.0, 20.0);
        let pass = pass_for(&source, Size::new(320.0, 480.0), Point::new(70.0, 0.0));

        // Columns 1..=5 intersect [70, 390); all 20 rows fit.
        assert_eq!(pass.entries.len(), 100);
        let first = &pass.entries[0];
        assert_eq!(first.coord, CellCoord::new(1, 0));
        assert_eq!(first.frame.x, -4.0);
        assert!(pass.entries.iter().all(|e| e.coord.column >= 1 && e.coord.column <= 5));
    }

    #[test]
    fn test_frozen_bands_and_order() {
        let source = GridSource::uniform(10, 30, 64.0, 20.0).with_frozen(2, 3);
        let pass = pass_for(&source, Size::new(320.0, 480.0), Point::new(50.0, 40.0));

        // 2 frozen + 4 scrollable columns, 3 frozen + 21 scrollable rows.
        assert_eq!(pass.entries.len(), 144);

        let corner: Vec<&VisibleCellEntry> =
            pass.entries.iter().filter(|e| e.band == Band::Corner).collect();
        assert_eq!(corner.len(), 6);
        // Corner block leads and is pinned on both axes.
        assert_eq!(pass.entries[0].coord, CellCoord::new(0, 0));
        assert_eq!(pass.entries[0].frame.origin(), Point::new(1.0, 1.0));

        // Band blocks appear in declaration order.
        let bands: Vec<Band> = pass.entries.iter().map(|e| e.band).collect();
        let mut sorted = bands.clone();
        sorted.sort();
        assert_eq!(bands, sorted);

        // Row-header cells scroll horizontally but stay pinned vertically.
        let header = pass
            .entries
            .iter()
            .find(|e| e.coord == CellCoord::new(2, 0))
            .unwrap();
        assert_eq!(header.band, Band::RowHeader);
        assert_eq!(header.frame.x, 131.0 - 50.0);
        assert_eq!(header.frame.y, 1.0);

        // Body cells scroll on both axes.
        let body = pass
            .entries
            .iter()
            .find(|e| e.coord == CellCoord::new(2, 4))
            .unwrap();
        assert_eq!(body.frame.x, 131.0 - 50.0);
        assert_eq!(body.frame.y, 85.0 - 40.0);
    }

    #[test]
    fn test_span_collapses_to_anchor() {
        let source =
            GridSource::uniform(5, 5, 64.0, 20.0).with_spans(vec![SpanRect::new(1, 1, 2, 2)]);
        let pass = pass_for(&source, Size::new(400.0, 200.0), Point::ZERO);

        // 25 cells minus 4 covered plus 1 span entry.
        assert_eq!(pass.entries.len(), 22);
        let span_entries: Vec<&VisibleCellEntry> =
            pass.entries.iter().filter(|e| e.span.is_some()).collect();
        assert_eq!(span_entries.len(), 1);
        let entry = span_entries[0];
        assert_eq!(entry.coord, CellCoord::new(1, 1));
        // Two cells plus the interior gap per axis.
        assert_eq!(entry.frame, Rect::new(66.0, 22.0, 129.0, 41.0));
    }

    #[test]
    fn test_span_straddling_frozen_edge() {
        let source = GridSource::uniform(5, 1, 64.0, 20.0)
            .with_frozen(2, 0)
            .with_spans(vec![SpanRect::new(1, 0, 2, 1)]);
        let pass = pass_for(&source, Size::new(300.0, 60.0), Point::new(30.0, 0.0));

        let entry = pass
            .entries
            .iter()
            .find(|e| e.span.is_some())
            .unwrap();
        assert_eq!(entry.coord, CellCoord::new(1, 0));
        assert_eq!(entry.band, Band::ColumnHeader);
        // Pinned start at the frozen cell, scrolled end from the body cell.
        assert_eq!(entry.frame.x, 66.0);
        assert_eq!(entry.frame.max_x(), 195.0 - 30.0);
    }

    #[test]
    fn test_zero_size_cells_never_visible() {
        let source = GridSource::uniform(3, 1, 10.0, 10.0)
            .with_column_width(|column| if column == 1 { 0.0 } else { 10.0 });
        let pass = pass_for(&source, Size::new(100.0, 100.0), Point::ZERO);

        let coords: Vec<u32> = pass.entries.iter().map(|e| e.coord.column).collect();
        assert_eq!(coords, vec![0, 2]);
    }

    // ===== Circular scrolling =====

    #[test]
    fn test_circular_wrap_splits_window() {
        let source =
            GridSource::uniform(4, 1, 50.0, 50.0).with_circular(CircularScrolling::HORIZONTAL);
        let pass = pass_for(&source, Size::new(120.0, 60.0), Point::new(-30.0, 0.0));

        // Stride 204: column 3 bleeds in from the previous repetition.
        assert_eq!(pass.entries.len(), 3);
        let by_column: HashMap<u32, f32> = pass
            .entries
            .iter()
            .map(|e| (e.coord.column, e.frame.x))
            .collect();
        assert_eq!(by_column.get(&3), Some(&-20.0));
        assert_eq!(by_column.get(&0), Some(&31.0));
        assert_eq!(by_column.get(&1), Some(&82.0));
    }

    #[test]
    fn test_circular_periodicity() {
        let source =
            GridSource::uniform(4, 1, 50.0, 50.0).with_circular(CircularScrolling::HORIZONTAL);
        let frame = Size::new(120.0, 60.0);

        let near = pass_for(&source, frame, Point::new(-30.0, 0.0));
        let far = pass_for(&source, frame, Point::new(-30.0 - 204.0 * 7.0, 0.0));
        assert_eq!(near.entries, far.entries);
    }

    #[test]
    fn test_circular_disabled_when_content_fits() {
        let source =
            GridSource::uniform(2, 1, 30.0, 30.0).with_circular(CircularScrolling::HORIZONTAL);
        let pass = pass_for(&source, Size::new(200.0, 60.0), Point::new(500.0, 0.0));

        // Stride 62 does not exceed the viewport, so scroll clamps to zero.
        assert_eq!(pass.entries.len(), 2);
        assert_eq!(pass.entries[0].frame.x, 1.0);
    }

    // ===== Grid lines =====

    #[test]
    fn test_grid_lines_at_gap_centers() {
        let source = GridSource::uniform(3, 2, 10.0, 10.0);
        let pass = pass_for(&source, Size::new(34.0, 23.0), Point::ZERO);

        let verticals: Vec<&GridLineSegment> = pass
            .lines
            .iter()
            .filter(|l| l.orientation == LineOrientation::Vertical)
            .collect();
        let horizontals: Vec<&GridLineSegment> = pass
            .lines
            .iter()
            .filter(|l| l.orientation == LineOrientation::Horizontal)
            .collect();
        assert_eq!(verticals.len(), 4);
        assert_eq!(horizontals.len(), 3);

        assert_eq!(verticals[0].position, 0.5);
        assert_eq!(verticals[3].position, 33.5);
        assert_eq!(verticals[0].start, 0.0);
        assert_eq!(verticals[0].end, 23.0);

        // Verticals sort ahead of horizontals.
        assert_eq!(pass.lines[0].orientation, LineOrientation::Vertical);
    }

    #[test]
    fn test_grid_lines_skip_span_interior() {
        let source =
            GridSource::uniform(3, 2, 10.0, 10.0).with_spans(vec![SpanRect::new(1, 0, 1, 2)]);
        let pass = pass_for(&source, Size::new(34.0, 23.0), Point::ZERO);

        // The horizontal line between the two rows is cut over the span.
        let cut: Vec<&GridLineSegment> = pass
            .lines
            .iter()
            .filter(|l| l.orientation == LineOrientation::Horizontal && l.index == 1)
            .collect();
        assert_eq!(cut.len(), 2);
        assert_eq!(cut[0].start, 0.0);
        assert_eq!(cut[0].end, 11.5);
        assert_eq!(cut[1].start, 22.5);
        assert_eq!(cut[1].end, 34.0);
    }

    #[test]
    fn test_no_lines_without_style() {
        let source = GridSource::uniform(3, 2, 10.0, 10.0).with_grid_style(GridStyle::None);
        let pass = pass_for(&source, Size::new(100.0, 100.0), Point::ZERO);

        assert!(pass.lines.is_empty());
        assert_eq!(pass.entries.len(), 6);
    }

    #[test]
    fn test_empty_viewport_resolves_empty() {
        let source = GridSource::uniform(3, 2, 10.0, 10.0);
        let pass = pass_for(&source, Size::ZERO, Point::ZERO);

        assert!(pass.entries.is_empty());
        assert!(pass.lines.is_empty());
    }
}
