//! gridview - headless grid-view core for spreadsheet-like hosts
//!
//! Computes what a scrollable grid viewport shows and keeps host cells
//! recycled while it changes:
//! - Prefix-sum geometry with per-axis frozen bands
//! - Merged spans collapsed to single entries, grid lines split around them
//! - Circular (wrap-around) scrolling per axis
//! - Band-ordered visible entries with viewport-space frames
//! - Reuse-pool cell recycling driven by resolve diffs
//!
//! # Usage
//!
//! ```
//! use gridview::{CellProvider, GridCell, GridSource, GridView, Point, ReuseId, VisibleCellEntry};
//!
//! struct Label {
//!     text: String,
//! }
//!
//! impl GridCell for Label {
//!     fn apply_layout(&mut self, entry: &VisibleCellEntry) {
//!         self.text = entry.coord.to_string();
//!     }
//! }
//!
//! struct Labels;
//!
//! impl CellProvider for Labels {
//!     type Cell = Label;
//!     fn create(&mut self, _reuse_id: &ReuseId) -> Option<Label> {
//!         Some(Label { text: String::new() })
//!     }
//! }
//!
//! # fn main() -> gridview::Result<()> {
//! let source = GridSource::uniform(100, 1_000, 96.0, 28.0).with_frozen(1, 1);
//! let mut view = GridView::new(source, Labels)?;
//! view.scroll_by(Point::new(0.0, 400.0))?;
//! for (entry, cell) in view.visible_cells() {
//!     println!("{} at {:?}", cell.text, entry.frame);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layout;
pub mod recycle;
pub mod source;
pub mod spec;
pub mod types;
pub mod view;

pub use error::{GridError, Result};
pub use layout::{
    resolve, AxisLayout, AxisMapping, CircularMapper, GridLayout, GridLineSegment,
    LineOrientation, ResolvedPass, Viewport, VisibleCellEntry,
};
pub use recycle::{CellProvider, GridCell, RecycleOutcome, RecycleStats, Recycler};
pub use source::{CircularScrolling, GridSource};
pub use spec::GridSpec;
pub use types::*;
pub use view::{GridView, ScrollAlignment};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
