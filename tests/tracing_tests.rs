//! Tracing instrumentation tests
//!
//! Built only with the `tracing` feature. A scoped subscriber counts the
//! spans and events a resolve or recycle pass emits, so a silent pass or a
//! dropped decision point fails here.

#![cfg(feature = "tracing")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gridview::{
    resolve, Band, CellCoord, CellProvider, GridCell, GridLayout, GridSource, GridSpec, Rect,
    Recycler, ReuseId, Size, Viewport, VisibleCellEntry,
};

/// Counts spans opened and events emitted while installed.
#[derive(Clone, Default)]
struct CountingSubscriber {
    spans: Arc<AtomicU64>,
    events: Arc<AtomicU64>,
}

impl tracing::Subscriber for CountingSubscriber {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(self.spans.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn record(&self, _id: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _id: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, _event: &tracing::Event<'_>) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    fn enter(&self, _id: &tracing::span::Id) {}

    fn exit(&self, _id: &tracing::span::Id) {}
}

struct Panel;

impl GridCell for Panel {
    fn apply_layout(&mut self, _entry: &VisibleCellEntry) {}
}

struct Panels {
    fail: bool,
}

impl CellProvider for Panels {
    type Cell = Panel;

    fn create(&mut self, _reuse_id: &ReuseId) -> Option<Panel> {
        if self.fail {
            None
        } else {
            Some(Panel)
        }
    }
}

fn entry(column: u32, row: u32) -> VisibleCellEntry {
    let x = f32::from(u16::try_from(column).unwrap()) * 10.0;
    let y = f32::from(u16::try_from(row).unwrap()) * 10.0;
    VisibleCellEntry {
        coord: CellCoord::new(column, row),
        frame: Rect::new(x, y, 10.0, 10.0),
        band: Band::Body,
        span: None,
    }
}

fn uniform_id(_coord: CellCoord) -> ReuseId {
    ReuseId::new("cell")
}

// =============================================================================
// RESOLVE INSTRUMENTATION
// =============================================================================

#[test]
fn test_resolve_pass_is_instrumented() {
    let source = GridSource::uniform(3, 2, 40.0, 20.0);
    let spec = GridSpec::build(&source).unwrap();
    let layout = GridLayout::new(&spec).unwrap();
    let viewport = Viewport::with_frame(Size::new(200.0, 100.0));

    let counter = CountingSubscriber::default();
    let pass = tracing::subscriber::with_default(counter.clone(), || resolve(&layout, &viewport));

    assert_eq!(pass.entries.len(), 6);
    // One span around the pass, one summary event at its end.
    assert_eq!(counter.spans.load(Ordering::Relaxed), 1);
    assert_eq!(counter.events.load(Ordering::Relaxed), 1);
}

// =============================================================================
// RECYCLE INSTRUMENTATION
// =============================================================================

#[test]
fn test_recycler_traces_park_reuse_and_create() {
    let mut recycler = Recycler::new();
    let mut provider = Panels { fail: false };

    let counter = CountingSubscriber::default();
    tracing::subscriber::with_default(counter.clone(), || {
        recycler
            .apply(&[entry(0, 0), entry(1, 0)], uniform_id, &mut provider)
            .unwrap();
        // Second pass parks (0, 0), keeps (1, 0), refills (2, 0) from the pool.
        recycler
            .apply(&[entry(1, 0), entry(2, 0)], uniform_id, &mut provider)
            .unwrap();
    });

    assert_eq!(counter.spans.load(Ordering::Relaxed), 2);
    // Two provider creations, one detach, one pool hit; kept cells are silent.
    assert_eq!(counter.events.load(Ordering::Relaxed), 4);
}

#[test]
fn test_provider_failure_warns() {
    let mut recycler = Recycler::new();
    let mut provider = Panels { fail: true };

    let counter = CountingSubscriber::default();
    let result = tracing::subscriber::with_default(counter.clone(), || {
        recycler.apply(&[entry(0, 0)], uniform_id, &mut provider)
    });

    assert!(result.is_err());
    assert_eq!(counter.spans.load(Ordering::Relaxed), 1);
    assert_eq!(counter.events.load(Ordering::Relaxed), 1);
}
