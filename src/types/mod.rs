//! Data types for the grid view engine.

mod coord;
mod geometry;
mod style;

pub use coord::*;
pub use geometry::*;
pub use style::*;
