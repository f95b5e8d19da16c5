//! Viewport state: frame size, content insets, and scroll offsets.

use crate::types::{EdgeInsets, Point, Size};

use super::grid_layout::GridLayout;

/// Scroll and frame state for one grid view.
///
/// Scroll offsets are per axis in scrollable space: zero means the first
/// scrollable cell sits flush against the frozen band. On a circularly
/// scrolling axis the offset is unbounded and normalized at resolve time.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Scroll offset per axis.
    pub scroll: Point,
    /// Outer frame size in points.
    pub frame: Size,
    /// Host chrome insets; the effective viewport is the frame minus these.
    pub insets: EdgeInsets,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a viewport with default frame and zero scroll.
    pub fn new() -> Self {
        Self {
            scroll: Point::ZERO,
            frame: Size::new(800.0, 600.0),
            insets: EdgeInsets::ZERO,
        }
    }

    /// Create a viewport with the given frame.
    pub fn with_frame(frame: Size) -> Self {
        Self {
            frame,
            ..Self::new()
        }
    }

    /// Effective viewport size after insets, floored at zero.
    pub fn content_size(&self) -> Size {
        Size::new(
            (self.frame.width - self.insets.horizontal()).max(0.0),
            (self.frame.height - self.insets.vertical()).max(0.0),
        )
    }

    /// Resize the outer frame.
    pub fn resize(&mut self, frame: Size, layout: &GridLayout) {
        self.frame = frame;
        self.clamp_scroll(layout);
    }

    /// Replace the content insets.
    pub fn set_insets(&mut self, insets: EdgeInsets, layout: &GridLayout) {
        self.insets = insets;
        self.clamp_scroll(layout);
    }

    /// Scroll by delta amounts.
    pub fn scroll_by(&mut self, delta: Point, layout: &GridLayout) {
        self.scroll.x += delta.x;
        self.scroll.y += delta.y;
        self.clamp_scroll(layout);
    }

    /// Set absolute scroll offsets.
    pub fn set_scroll(&mut self, offset: Point, layout: &GridLayout) {
        self.scroll = offset;
        self.clamp_scroll(layout);
    }

    /// Clamp scroll offsets to the valid range on non-circular axes.
    /// Circular axes pass through untouched.
    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        let content = self.content_size();
        self.scroll.x = layout.column_mapper(content.width).clamp(self.scroll.x);
        self.scroll.y = layout.row_mapper(content.height).clamp(self.scroll.y);
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
    use crate::source::{CircularScrolling, GridSource};
    use crate::spec::GridSpec;

    fn layout_for(source: &GridSource) -> GridLayout {
        let spec = GridSpec::build(source).unwrap();
        GridLayout::new(&spec).unwrap()
    }

    #[test]
    fn test_content_size_after_insets() {
        let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));
        viewport.insets = EdgeInsets::new(20.0, 10.0, 30.0, 10.0);

        let content = viewport.content_size();
        assert_eq!(content.width, 300.0);
        assert_eq!(content.height, 430.0);
    }

    #[test]
    fn test_content_size_floors_at_zero() {
        let mut viewport = Viewport::with_frame(Size::new(10.0, 10.0));
        viewport.insets = EdgeInsets::new(20.0, 20.0, 20.0, 20.0);
        assert_eq!(viewport.content_size(), Size::ZERO);
    }

    #[test]
    fn test_clamp_bounds_scroll() {
        // 10 columns of 64 + 11 gaps = 651 wide, 20 rows of 20 + 21 gaps = 421
        let layout = layout_for(&GridSource::uniform(10, 20, 64.0, 20.0));
        let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));

        viewport.set_scroll(Point::new(-50.0, -50.0), &layout);
        assert_eq!(viewport.scroll, Point::ZERO);

        viewport.set_scroll(Point::new(10_000.0, 10_000.0), &layout);
        // Width overflows by 651 - 320 = 331; height fits entirely.
        assert_eq!(viewport.scroll.x, 331.0);
        assert_eq!(viewport.scroll.y, 0.0);
    }

    #[test]
    fn test_clamp_accounts_for_frozen_band() {
        let layout = layout_for(&GridSource::uniform(10, 20, 64.0, 20.0).with_frozen(2, 0));
        let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));

        viewport.set_scroll(Point::new(10_000.0, 0.0), &layout);
        // Scrollable extent 651 - 130 = 521, scrollable viewport 320 - 130 = 190.
        assert_eq!(viewport.scroll.x, 331.0);
    }

    #[test]
    fn test_circular_axis_unclamped() {
        let source = GridSource::uniform(10, 20, 64.0, 20.0)
            .with_circular(CircularScrolling::HORIZONTAL);
        let layout = layout_for(&source);
        let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));

        viewport.set_scroll(Point::new(-5_000.0, 100.0), &layout);
        assert_eq!(viewport.scroll.x, -5_000.0);
        // Vertical stays clamped; all rows fit so it pins to zero.
        assert_eq!(viewport.scroll.y, 0.0);
    }

    #[test]
    fn test_scroll_by_accumulates() {
        let layout = layout_for(&GridSource::uniform(10, 20, 64.0, 20.0));
        let mut viewport = Viewport::with_frame(Size::new(320.0, 480.0));

        viewport.scroll_by(Point::new(100.0, 0.0), &layout);
        viewport.scroll_by(Point::new(100.0, 0.0), &layout);
        assert_eq!(viewport.scroll.x, 200.0);
    }
}
