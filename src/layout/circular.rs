//! Scroll-offset normalization for circular axes.
//!
//! A circular axis tiles its scrollable body with period
//! [`circular_stride`](super::AxisLayout::circular_stride). Raw offsets are
//! unbounded; each resolve pass folds them into an offset inside the
//! canonical tile plus a repetition index. Non-circular axes clamp instead.

/// Normalized scroll state for one axis, valid for a single resolve pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    /// Offset into the canonical tile; `[0, stride)` when wrapping.
    pub offset: f32,
    /// Tile the window starts in: 0 at rest, negative after scrolling
    /// backwards past the origin. Always 0 when not wrapping.
    pub repetition: i32,
}

/// Per-axis normalizer. Rebuilt per pass because the wrap condition depends
/// on the current viewport extent.
#[derive(Debug, Clone, Copy)]
pub struct CircularMapper {
    stride: f32,
    max_scroll: f32,
    wraps: bool,
}

impl CircularMapper {
    /// `stride` is the tile period, `scrollable_viewport` the viewport
    /// extent left after the frozen band, `scrollable_extent` the body
    /// content extent used for the non-circular clamp limit.
    pub fn new(
        circular: bool,
        stride: f32,
        scrollable_viewport: f32,
        scrollable_extent: f32,
    ) -> Self {
        let max_scroll = (scrollable_extent - scrollable_viewport.max(0.0)).max(0.0);
        // Wrapping engages only when one tile exceeds the window; a shorter
        // tile would put the same coordinate in view twice
        let wraps = circular && stride > 0.0 && stride > scrollable_viewport;
        Self {
            stride,
            max_scroll,
            wraps,
        }
    }

    /// True when the axis actually wraps this pass.
    pub fn wraps(&self) -> bool {
        self.wraps
    }

    /// The tile period.
    pub fn stride(&self) -> f32 {
        self.stride
    }

    /// Fold a raw offset into the canonical tile. Non-wrapping axes clamp
    /// to the valid scroll range at repetition 0.
    pub fn normalize(&self, raw: f32) -> AxisMapping {
        if !self.wraps {
            return AxisMapping {
                offset: raw.clamp(0.0, self.max_scroll),
                repetition: 0,
            };
        }
        let offset = raw.rem_euclid(self.stride);
        // Truncation cannot occur for repetition counts a host can reach
        #[allow(clippy::cast_possible_truncation)]
        let repetition = (raw / self.stride).floor() as i32;
        AxisMapping { offset, repetition }
    }

    /// Clamp a raw offset for storage. Identity on wrapping axes, where
    /// every offset is valid.
    pub fn clamp(&self, raw: f32) -> f32 {
        if self.wraps {
            raw
        } else {
            raw.clamp(0.0, self.max_scroll)
        }
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
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_non_circular_clamps() {
        let mapper = CircularMapper::new(false, 98.0, 40.0, 100.0);

        assert_eq!(mapper.normalize(-10.0), AxisMapping { offset: 0.0, repetition: 0 });
        assert_eq!(mapper.normalize(30.0), AxisMapping { offset: 30.0, repetition: 0 });
        // Max scroll = scrollable extent - scrollable viewport = 60
        assert_eq!(mapper.normalize(500.0), AxisMapping { offset: 60.0, repetition: 0 });
    }

    #[test_case(0.0, 0.0, 0 ; "at rest")]
    #[test_case(30.0, 30.0, 0 ; "inside the first tile")]
    #[test_case(250.0, 50.0, 2 ; "forward past two tiles")]
    #[test_case(-30.0, 70.0, -1 ; "backward into the previous tile")]
    #[test_case(-100.0, 0.0, -1 ; "backward exactly one tile")]
    fn test_normalize_wrapping(raw: f32, offset: f32, repetition: i32) {
        let mapper = CircularMapper::new(true, 100.0, 40.0, 102.0);
        assert!(mapper.wraps());
        assert_eq!(mapper.normalize(raw), AxisMapping { offset, repetition });
    }

    #[test]
    fn test_far_offsets_stay_in_bounds() {
        let mapper = CircularMapper::new(true, 100.0, 40.0, 102.0);

        let m = mapper.normalize(100_000.0);
        assert!(m.offset >= 0.0 && m.offset < 100.0);
        assert_eq!(m.repetition, 1000);
    }

    #[test]
    fn test_small_content_falls_back_to_clamping() {
        // Tile (50) not larger than the window (80): wrapping would show a
        // coordinate twice, so the axis clamps instead
        let mapper = CircularMapper::new(true, 50.0, 80.0, 52.0);
        assert!(!mapper.wraps());

        let m = mapper.normalize(500.0);
        assert_eq!(m.repetition, 0);
        assert_eq!(m.offset, 0.0); // max_scroll = (52 - 80).max(0) = 0
    }

    #[test]
    fn test_clamp_is_identity_when_wrapping() {
        let mapper = CircularMapper::new(true, 100.0, 40.0, 102.0);
        assert_eq!(mapper.clamp(-250.0), -250.0);
        assert_eq!(mapper.clamp(7500.0), 7500.0);

        let fixed = CircularMapper::new(false, 100.0, 40.0, 102.0);
        assert_eq!(fixed.clamp(7500.0), 62.0);
    }
}
