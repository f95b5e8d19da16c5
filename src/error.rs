//! Structured error types for gridview.
//!
//! Configuration problems are reported before any layout is built; resolution
//! itself never fails.

use crate::types::{ReuseId, SpanRect};

/// All errors that can occur while building or driving a grid view.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid configuration value (counts, sizes, spacing).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A merged span lies outside the grid bounds.
    #[error("merged span {span} exceeds grid bounds ({columns} columns x {rows} rows)")]
    SpanOutOfBounds {
        span: SpanRect,
        columns: u32,
        rows: u32,
    },

    /// Two merged spans cover a common cell.
    #[error("merged spans overlap: {first} and {second}")]
    SpanOverlap { first: SpanRect, second: SpanRect },

    /// The cell provider returned no instance for a reuse identifier.
    #[error("cell provider returned no cell for reuse identifier {reuse_id:?}")]
    CellProvider { reuse_id: ReuseId },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}
