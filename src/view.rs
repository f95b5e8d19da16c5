//! Grid view facade.
//!
//! [`GridView`] owns the assembled layout, the viewport, the latest resolve
//! pass, and the cell recycler, and keeps them consistent across every
//! mutation. Hosts drive it with scroll and frame updates and read back
//! visible entries, grid lines, and attached cells.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::{
    resolve, AxisLayout, CircularMapper, GridLayout, GridLineSegment, ResolvedPass, Viewport,
    VisibleCellEntry,
};
use crate::recycle::{CellProvider, RecycleOutcome, RecycleStats, Recycler};
use crate::source::GridSource;
use crate::spec::GridSpec;
use crate::types::{CellCoord, EdgeInsets, Point, Rect, Size};

/// Where a cell lands in the viewport after [`GridView::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollAlignment {
    /// Cell start flush against the frozen band edge.
    Start,
    /// Cell centered in the scrollable viewport.
    Center,
    /// Cell end flush against the viewport edge.
    End,
}

/// A grid view bound to one provider.
pub struct GridView<P: CellProvider> {
    source: GridSource,
    layout: GridLayout,
    viewport: Viewport,
    pass: ResolvedPass,
    recycler: Recycler<P::Cell>,
    provider: P,
}

impl<P: CellProvider> GridView<P> {
    /// Build a view with the default viewport frame and resolve the initial
    /// visible set.
    ///
    /// # Errors
    /// Fails on an invalid source or when the provider declines to create a
    /// cell for the initial pass.
    pub fn new(source: GridSource, provider: P) -> Result<Self> {
        Self::with_frame(source, provider, Viewport::new().frame)
    }

    /// Build a view with an explicit viewport frame.
    ///
    /// # Errors
    /// Fails on an invalid source or when the provider declines to create a
    /// cell for the initial pass.
    pub fn with_frame(source: GridSource, provider: P, frame: Size) -> Result<Self> {
        let spec = GridSpec::build(&source)?;
        let layout = GridLayout::new(&spec)?;
        let mut view = Self {
            source,
            layout,
            viewport: Viewport::with_frame(frame),
            pass: ResolvedPass::default(),
            recycler: Recycler::new(),
            provider,
        };
        view.viewport.clamp_scroll(&view.layout);
        view.refresh()?;
        Ok(view)
    }

    /// Re-query the source, rebuild the layout, and re-resolve. All attached
    /// cells are detached into their pools first and come back out for the
    /// fresh pass.
    ///
    /// # Errors
    /// Fails on an invalid source or a provider failure; the view keeps the
    /// new layout with nothing attached.
    pub fn reload_data(&mut self) -> Result<RecycleOutcome> {
        let spec = GridSpec::build(&self.source)?;
        self.layout = GridLayout::new(&spec)?;
        self.viewport.clamp_scroll(&self.layout);
        self.recycler.detach_all();
        self.refresh()
    }

    /// Swap the source and reload.
    ///
    /// # Errors
    /// Same failure modes as [`GridView::reload_data`].
    pub fn set_source(&mut self, source: GridSource) -> Result<RecycleOutcome> {
        self.source = source;
        self.reload_data()
    }

    /// Resize the viewport frame.
    ///
    /// # Errors
    /// Fails when the provider declines to create a cell.
    pub fn set_frame(&mut self, frame: Size) -> Result<RecycleOutcome> {
        self.viewport.resize(frame, &self.layout);
        self.refresh()
    }

    /// Replace the content insets.
    ///
    /// # Errors
    /// Fails when the provider declines to create a cell.
    pub fn set_content_insets(&mut self, insets: EdgeInsets) -> Result<RecycleOutcome> {
        self.viewport.set_insets(insets, &self.layout);
        self.refresh()
    }

    /// Set absolute scroll offsets. Non-circular axes clamp to their valid
    /// range.
    ///
    /// # Errors
    /// Fails when the provider declines to create a cell.
    pub fn set_scroll_offset(&mut self, offset: Point) -> Result<RecycleOutcome> {
        self.viewport.set_scroll(offset, &self.layout);
        self.refresh()
    }

    /// Scroll by delta amounts.
    ///
    /// # Errors
    /// Fails when the provider declines to create a cell.
    pub fn scroll_by(&mut self, delta: Point) -> Result<RecycleOutcome> {
        self.viewport.scroll_by(delta, &self.layout);
        self.refresh()
    }

    /// Scroll so a cell lands at the given alignment. Frozen axes are left
    /// untouched; on a wrapping axis the target stays within the current
    /// repetition.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for an out-of-bounds coordinate, or a
    /// provider failure from the refresh.
    pub fn scroll_to(
        &mut self,
        coord: CellCoord,
        alignment: ScrollAlignment,
    ) -> Result<RecycleOutcome> {
        let columns = self.layout.columns();
        let rows = self.layout.rows();
        if coord.column >= columns.count() || coord.row >= rows.count() {
            return Err(GridError::Config(format!(
                "scroll target {coord} is out of bounds"
            )));
        }

        let content = self.viewport.content_size();
        let mut target = self.viewport.scroll;
        if coord.column >= columns.frozen() {
            if let Some(offset) = axis_target(columns, coord.column, content.width, alignment) {
                let mapper = self.layout.column_mapper(content.width);
                target.x = rebase(&mapper, self.viewport.scroll.x, offset);
            }
        }
        if coord.row >= rows.frozen() {
            if let Some(offset) = axis_target(rows, coord.row, content.height, alignment) {
                let mapper = self.layout.row_mapper(content.height);
                target.y = rebase(&mapper, self.viewport.scroll.y, offset);
            }
        }
        self.viewport.set_scroll(target, &self.layout);
        self.refresh()
    }

    /// Current scroll offsets.
    pub fn scroll_offset(&self) -> Point {
        self.viewport.scroll
    }

    /// Entries of the latest pass, band-ordered.
    pub fn visible_entries(&self) -> &[VisibleCellEntry] {
        &self.pass.entries
    }

    /// Grid-line segments of the latest pass.
    pub fn visible_grid_lines(&self) -> &[GridLineSegment] {
        &self.pass.lines
    }

    /// Visible entries paired with their attached cells.
    pub fn visible_cells(&self) -> Vec<(&VisibleCellEntry, &P::Cell)> {
        self.pass
            .entries
            .iter()
            .filter_map(|entry| Some((entry, self.recycler.cell(entry.coord)?)))
            .collect()
    }

    /// The attached cell at a coordinate.
    pub fn attached_cell(&self, coord: CellCoord) -> Option<&P::Cell> {
        self.recycler.cell(coord)
    }

    /// Mutable access to the attached cell at a coordinate.
    pub fn attached_cell_mut(&mut self, coord: CellCoord) -> Option<&mut P::Cell> {
        self.recycler.cell_mut(coord)
    }

    /// Hit-test a viewport-space point to a cell coordinate. Points over a
    /// merged span resolve to the span anchor; gap hits resolve to the
    /// nearest preceding cell.
    pub fn cell_at(&self, point: Point) -> Option<CellCoord> {
        let content = self.viewport.content_size();
        if point.x < 0.0 || point.y < 0.0 || point.x >= content.width || point.y >= content.height
        {
            return None;
        }
        let column = pick_index(
            self.layout.columns(),
            &self.layout.column_mapper(content.width),
            self.viewport.scroll.x,
            point.x,
        )?;
        let row = pick_index(
            self.layout.rows(),
            &self.layout.row_mapper(content.height),
            self.viewport.scroll.y,
            point.y,
        )?;
        Some(self.layout.merges().anchor_of(CellCoord::new(column, row)))
    }

    /// Content-space frame of a cell, span-aware.
    pub fn rect_for(&self, coord: CellCoord) -> Option<Rect> {
        self.layout.cell_rect(coord)
    }

    /// Viewport-space frame of a cell if it is currently visible. Covered
    /// coordinates resolve through their span anchor.
    pub fn visible_frame(&self, coord: CellCoord) -> Option<Rect> {
        let anchor = self.layout.merges().anchor_of(coord);
        self.pass
            .entries
            .iter()
            .find(|entry| entry.coord == anchor)
            .map(|entry| entry.frame)
    }

    /// Total content size including all gaps.
    pub fn content_size(&self) -> Size {
        self.layout.total_size()
    }

    /// Recycler counters.
    pub fn stats(&self) -> RecycleStats {
        self.recycler.stats()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn source(&self) -> &GridSource {
        &self.source
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Drop every cell and clear the pass. The layout and viewport survive,
    /// so a later refresh starts from a clean slate.
    pub fn teardown(&mut self) {
        self.recycler.teardown();
        self.pass = ResolvedPass::default();
    }

    fn refresh(&mut self) -> Result<RecycleOutcome> {
        self.pass = resolve(&self.layout, &self.viewport);
        let reuse = Arc::clone(&self.source.reuse_id);
        self.recycler
            .apply(&self.pass.entries, move |coord| reuse(coord), &mut self.provider)
    }
}

/// Scroll offset that puts cell `index` at the requested alignment.
fn axis_target(
    axis: &AxisLayout,
    index: u32,
    viewport_extent: f32,
    alignment: ScrollAlignment,
) -> Option<f32> {
    let band = axis.band_extent();
    let viewport = (viewport_extent - band).max(0.0);
    let start = axis.offset_of(index)? - band;
    let end = axis.end_of(index)? - band;
    Some(match alignment {
        ScrollAlignment::Start => start,
        ScrollAlignment::Center => (start + end - viewport) / 2.0,
        ScrollAlignment::End => end - viewport,
    })
}

/// Re-anchor a normalized target offset next to the current raw offset so a
/// wrapping axis does not jump repetitions.
fn rebase(mapper: &CircularMapper, current_raw: f32, offset: f32) -> f32 {
    if mapper.wraps() {
        let state = mapper.normalize(current_raw);
        current_raw - state.offset + offset
    } else {
        offset
    }
}

fn pick_index(axis: &AxisLayout, mapper: &CircularMapper, raw: f32, position: f32) -> Option<u32> {
    let band = axis.band_extent();
    if axis.frozen() > 0 && position < band {
        return axis.index_at(position);
    }
    let state = mapper.normalize(raw);
    let mut body = position - band + state.offset;
    if mapper.wraps() {
        let stride = mapper.stride();
        if body >= stride {
            body -= stride;
        }
    }
    axis.index_at(band + body)
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
    use crate::recycle::GridCell;
    use crate::source::CircularScrolling;
    use crate::types::{ReuseId, SpanRect};

    #[derive(Debug, Default)]
    struct TestCell {
        frame: Option<Rect>,
    }

    impl GridCell for TestCell {
        fn apply_layout(&mut self, entry: &VisibleCellEntry) {
            self.frame = Some(entry.frame);
        }

        fn prepare_for_reuse(&mut self) {
            self.frame = None;
        }
    }

    struct TestProvider {
        fail: bool,
    }

    impl TestProvider {
        fn new() -> Self {
            Self { fail: false }
        }
    }

    impl CellProvider for TestProvider {
        type Cell = TestCell;

        fn create(&mut self, _reuse_id: &ReuseId) -> Option<TestCell> {
            if self.fail {
                None
            } else {
                Some(TestCell::default())
            }
        }
    }

    fn view_320x480(source: GridSource) -> GridView<TestProvider> {
        GridView::with_frame(source, TestProvider::new(), Size::new(320.0, 480.0)).unwrap()
    }

    #[test]
    fn test_initial_pass_attaches_visible_cells() {
        let view = view_320x480(GridSource::uniform(10, 20, 64.0, 20.0));

        // Columns 0..=4 intersect [0, 320); all rows fit in 480.
        assert_eq!(view.visible_entries().len(), 100);
        assert_eq!(view.stats().attached, 100);
        assert_eq!(view.stats().created, 100);
        assert_eq!(view.visible_cells().len(), 100);
    }

    #[test]
    fn test_scroll_recycles_column() {
        let mut view = view_320x480(GridSource::uniform(10, 20, 64.0, 20.0));

        // One column width plus gap: column 0 leaves, column 5 enters.
        let outcome = view.scroll_by(Point::new(65.0, 0.0)).unwrap();
        assert_eq!(outcome.detached.len(), 20);
        assert_eq!(outcome.attached.len(), 20);
        assert_eq!(outcome.kept, 80);

        let stats = view.stats();
        assert_eq!(stats.created, 100);
        assert_eq!(stats.reused, 20);
        assert_eq!(stats.attached, 100);
    }

    #[test]
    fn test_set_source_reuses_pooled_cells() {
        let mut view = view_320x480(GridSource::uniform(3, 2, 10.0, 10.0));
        assert_eq!(view.stats().created, 6);

        view.set_source(GridSource::uniform(2, 2, 10.0, 10.0)).unwrap();
        let stats = view.stats();
        assert_eq!(stats.attached, 4);
        assert_eq!(stats.created, 6);
        assert_eq!(stats.reused, 4);
        assert_eq!(stats.pooled, 2);
    }

    #[test]
    fn test_scroll_to_alignments() {
        let mut view = view_320x480(GridSource::uniform(10, 1, 64.0, 20.0));

        view.scroll_to(CellCoord::new(9, 0), ScrollAlignment::End).unwrap();
        assert_eq!(view.scroll_offset().x, 330.0);
        assert_eq!(view.visible_frame(CellCoord::new(9, 0)).unwrap().max_x(), 320.0);

        view.scroll_to(CellCoord::new(5, 0), ScrollAlignment::Center).unwrap();
        assert_eq!(view.scroll_offset().x, 198.0);

        view.scroll_to(CellCoord::new(0, 0), ScrollAlignment::Start).unwrap();
        assert_eq!(view.visible_frame(CellCoord::new(0, 0)).unwrap().x, 0.0);
    }

    #[test]
    fn test_scroll_to_ignores_frozen_axis() {
        let mut view = view_320x480(GridSource::uniform(10, 20, 64.0, 20.0).with_frozen(2, 0));
        view.scroll_by(Point::new(100.0, 0.0)).unwrap();

        view.scroll_to(CellCoord::new(1, 0), ScrollAlignment::Start).unwrap();
        assert_eq!(view.scroll_offset().x, 100.0);
    }

    #[test]
    fn test_scroll_to_out_of_bounds() {
        let mut view = view_320x480(GridSource::uniform(3, 3, 10.0, 10.0));
        let err = view
            .scroll_to(CellCoord::new(3, 0), ScrollAlignment::Start)
            .unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_cell_at_hit_test() {
        let mut view = view_320x480(
            GridSource::uniform(10, 1, 64.0, 20.0)
                .with_frozen(2, 0)
                .with_spans(vec![SpanRect::new(2, 0, 2, 1)]),
        );
        view.set_scroll_offset(Point::new(50.0, 0.0)).unwrap();

        // Inside the frozen band.
        assert_eq!(view.cell_at(Point::new(30.0, 5.0)), Some(CellCoord::new(0, 0)));
        // Body point over column 2 at scroll 50.
        assert_eq!(view.cell_at(Point::new(140.0, 5.0)), Some(CellCoord::new(2, 0)));
        // Covered span cell resolves to the anchor.
        assert_eq!(view.cell_at(Point::new(200.0, 5.0)), Some(CellCoord::new(2, 0)));
        // Outside the viewport.
        assert_eq!(view.cell_at(Point::new(-1.0, 5.0)), None);
        assert_eq!(view.cell_at(Point::new(5.0, 500.0)), None);
    }

    #[test]
    fn test_cell_at_wraps_with_circular_axis() {
        let source =
            GridSource::uniform(4, 1, 50.0, 50.0).with_circular(CircularScrolling::HORIZONTAL);
        let mut view =
            GridView::with_frame(source, TestProvider::new(), Size::new(120.0, 60.0)).unwrap();
        view.set_scroll_offset(Point::new(-30.0, 0.0)).unwrap();

        // Column 3 bleeds in from the previous repetition at x < 31.
        assert_eq!(view.cell_at(Point::new(10.0, 10.0)), Some(CellCoord::new(3, 0)));
        // Column 0 occupies [31, 81).
        assert_eq!(view.cell_at(Point::new(40.0, 10.0)), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn test_provider_failure_on_build() {
        let provider = TestProvider { fail: true };
        let result = GridView::with_frame(
            GridSource::uniform(3, 3, 10.0, 10.0),
            provider,
            Size::new(100.0, 100.0),
        );
        assert!(matches!(result, Err(GridError::CellProvider { .. })));
    }

    #[test]
    fn test_teardown_clears_cells_and_pass() {
        let mut view = view_320x480(GridSource::uniform(3, 3, 10.0, 10.0));
        view.teardown();

        assert!(view.visible_entries().is_empty());
        assert_eq!(view.stats().attached, 0);
        assert_eq!(view.stats().pooled, 0);

        // A later reload repopulates.
        view.reload_data().unwrap();
        assert_eq!(view.visible_entries().len(), 9);
    }
}
