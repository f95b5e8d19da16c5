//! Injected grid configuration.
//!
//! [`GridSource`] is the host-facing description of the grid: value providers
//! for counts, sizes, frozen bands, merged spans, and reuse identifiers, plus
//! plain style fields. A reload re-reads the whole source; the engine never
//! mutates it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{CellCoord, GridStyle, ReuseId, Size, SpanRect};

/// Reuse identifier handed out when the source does not distinguish cells.
pub const DEFAULT_REUSE_ID: &str = "cell";

/// Provider returning an axis count.
pub type CountFn = Arc<dyn Fn() -> u32 + Send + Sync>;
/// Provider returning the size of a column or row by index.
pub type SizeFn = Arc<dyn Fn(u32) -> f32 + Send + Sync>;
/// Provider returning the merged spans of the grid.
pub type SpansFn = Arc<dyn Fn() -> Vec<SpanRect> + Send + Sync>;
/// Provider returning the reuse identifier for a coordinate.
pub type ReuseIdFn = Arc<dyn Fn(CellCoord) -> ReuseId + Send + Sync>;

/// Which axes wrap around instead of clamping at the content edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CircularScrolling {
    pub horizontal: bool,
    pub vertical: bool,
}

impl CircularScrolling {
    pub const NONE: CircularScrolling = CircularScrolling {
        horizontal: false,
        vertical: false,
    };
    pub const HORIZONTAL: CircularScrolling = CircularScrolling {
        horizontal: true,
        vertical: false,
    };
    pub const VERTICAL: CircularScrolling = CircularScrolling {
        horizontal: false,
        vertical: true,
    };
    pub const BOTH: CircularScrolling = CircularScrolling {
        horizontal: true,
        vertical: true,
    };

    /// True if either axis wraps.
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// The grid definition as a struct of value providers.
///
/// Counts and sizes are closures so hosts can derive them from their own
/// model without copying it; they are read once per [`reload_data`] into an
/// immutable snapshot, so returning different values only takes effect on
/// the next reload.
///
/// [`reload_data`]: crate::view::GridView::reload_data
#[derive(Clone)]
pub struct GridSource {
    pub column_count: CountFn,
    pub row_count: CountFn,
    pub frozen_columns: CountFn,
    pub frozen_rows: CountFn,
    pub column_width: SizeFn,
    pub row_height: SizeFn,
    pub merged_spans: SpansFn,
    pub reuse_id: ReuseIdFn,
    pub intercell_spacing: Size,
    pub grid_style: GridStyle,
    pub circular: CircularScrolling,
}

impl GridSource {
    /// A grid with uniform cell sizes and no frozen bands, spans, or
    /// circular axes. The usual starting point for builder chains.
    pub fn uniform(columns: u32, rows: u32, column_width: f32, row_height: f32) -> Self {
        Self {
            column_count: Arc::new(move || columns),
            row_count: Arc::new(move || rows),
            frozen_columns: Arc::new(|| 0),
            frozen_rows: Arc::new(|| 0),
            column_width: Arc::new(move |_| column_width),
            row_height: Arc::new(move |_| row_height),
            merged_spans: Arc::new(Vec::new),
            reuse_id: Arc::new(|_| ReuseId::from(DEFAULT_REUSE_ID)),
            intercell_spacing: Size::new(1.0, 1.0),
            grid_style: GridStyle::default(),
            circular: CircularScrolling::NONE,
        }
    }

    /// Set the frozen leading column/row counts.
    pub fn with_frozen(mut self, columns: u32, rows: u32) -> Self {
        self.frozen_columns = Arc::new(move || columns);
        self.frozen_rows = Arc::new(move || rows);
        self
    }

    /// Set the merged spans.
    pub fn with_spans(mut self, spans: Vec<SpanRect>) -> Self {
        self.merged_spans = Arc::new(move || spans.clone());
        self
    }

    /// Set the intercell spacing.
    pub fn with_spacing(mut self, spacing: Size) -> Self {
        self.intercell_spacing = spacing;
        self
    }

    /// Set the grid-line style.
    pub fn with_grid_style(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the circular-scrolling axes.
    pub fn with_circular(mut self, circular: CircularScrolling) -> Self {
        self.circular = circular;
        self
    }

    /// Replace the per-column width provider.
    pub fn with_column_width(mut self, f: impl Fn(u32) -> f32 + Send + Sync + 'static) -> Self {
        self.column_width = Arc::new(f);
        self
    }

    /// Replace the per-row height provider.
    pub fn with_row_height(mut self, f: impl Fn(u32) -> f32 + Send + Sync + 'static) -> Self {
        self.row_height = Arc::new(f);
        self
    }

    /// Replace the reuse-identifier provider.
    pub fn with_reuse_id(
        mut self,
        f: impl Fn(CellCoord) -> ReuseId + Send + Sync + 'static,
    ) -> Self {
        self.reuse_id = Arc::new(f);
        self
    }
}

impl Default for GridSource {
    fn default() -> Self {
        Self::uniform(0, 0, 0.0, 0.0)
    }
}

impl fmt::Debug for GridSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Providers are not invoked here; they may be expensive.
        f.debug_struct("GridSource")
            .field("intercell_spacing", &self.intercell_spacing)
            .field("grid_style", &self.grid_style)
            .field("circular", &self.circular)
            .finish_non_exhaustive()
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
    fn test_uniform_source() {
        let source = GridSource::uniform(10, 20, 64.0, 20.0);

        assert_eq!((source.column_count)(), 10);
        assert_eq!((source.row_count)(), 20);
        assert_eq!((source.frozen_columns)(), 0);
        assert_eq!((source.column_width)(3), 64.0);
        assert_eq!((source.row_height)(19), 20.0);
        assert!((source.merged_spans)().is_empty());
        assert_eq!((source.reuse_id)(CellCoord::new(0, 0)).as_str(), "cell");
    }

    #[test]
    fn test_builder_chain() {
        let source = GridSource::uniform(5, 5, 40.0, 20.0)
            .with_frozen(2, 1)
            .with_spans(vec![SpanRect::new(0, 0, 2, 2)])
            .with_spacing(Size::new(2.0, 2.0))
            .with_circular(CircularScrolling::HORIZONTAL)
            .with_reuse_id(|coord| {
                if coord.row == 0 {
                    ReuseId::from("header")
                } else {
                    ReuseId::from("cell")
                }
            });

        assert_eq!((source.frozen_columns)(), 2);
        assert_eq!((source.frozen_rows)(), 1);
        assert_eq!((source.merged_spans)().len(), 1);
        assert_eq!(source.intercell_spacing, Size::new(2.0, 2.0));
        assert!(source.circular.horizontal);
        assert!(!source.circular.vertical);
        assert_eq!((source.reuse_id)(CellCoord::new(3, 0)).as_str(), "header");
        assert_eq!((source.reuse_id)(CellCoord::new(3, 1)).as_str(), "cell");
    }

    #[test]
    fn test_clone_shares_providers() {
        let source = GridSource::uniform(4, 4, 10.0, 10.0);
        let copy = source.clone();

        assert!(Arc::ptr_eq(&source.column_count, &copy.column_count));
        assert!(Arc::ptr_eq(&source.merged_spans, &copy.merged_spans));
    }
}
