//! Layout engine for grid geometry and visible-region resolution.
//!
//! This module handles:
//! - Pre-computing cell positions from column widths and row heights
//! - Frozen-band extents and per-band coordinate mapping
//! - Circular scroll-offset normalization
//! - Merged-span lookup and grid-line skip intervals
//! - Resolving a viewport into visible entries and grid-line segments

mod axis;
mod circular;
mod grid_layout;
mod merges;
mod resolver;
mod viewport;

pub use axis::AxisLayout;
pub use circular::{AxisMapping, CircularMapper};
pub use grid_layout::GridLayout;
pub use merges::MergeIndex;
pub use resolver::{resolve, GridLineSegment, LineOrientation, ResolvedPass, VisibleCellEntry};
pub use viewport::Viewport;
