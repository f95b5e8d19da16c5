//! Cell recycling: a reuse pool plus diff-based attach/detach against
//! resolve output.
//!
//! Hosts implement [`GridCell`] for their view type and [`CellProvider`]
//! for creation. The recycler owns every cell it has ever attached; cells
//! leave the visible set into per-identifier pools and come back out
//! last-in first-out.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{GridError, Result};
use crate::layout::VisibleCellEntry;
use crate::types::{CellCoord, Rect, ReuseId};

/// A host cell that can be positioned and recycled.
pub trait GridCell {
    /// Position the cell for a visible entry. Called on first attach and
    /// again whenever the entry's frame changes.
    fn apply_layout(&mut self, entry: &VisibleCellEntry);

    /// Reset state before the cell returns to the pool.
    fn prepare_for_reuse(&mut self) {}
}

/// Creates cells when the pool has none to hand out.
pub trait CellProvider {
    type Cell: GridCell;

    /// Create a fresh cell for a reuse identifier. Returning `None` is a
    /// provider failure and aborts the pass.
    fn create(&mut self, reuse_id: &ReuseId) -> Option<Self::Cell>;
}

/// Counters describing recycler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleStats {
    /// Cells created by the provider over the recycler's lifetime.
    pub created: u64,
    /// Pool hits over the recycler's lifetime.
    pub reused: u64,
    /// Currently attached cells.
    pub attached: usize,
    /// Cells parked across all pools.
    pub pooled: usize,
}

/// Coordinates that changed on one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleOutcome {
    /// Newly attached coordinates, in entry order.
    pub attached: Vec<CellCoord>,
    /// Detached coordinates, sorted.
    pub detached: Vec<CellCoord>,
    /// Entries that kept their cell and were re-positioned in place.
    pub kept: usize,
}

struct AttachedCell<C> {
    cell: C,
    reuse_id: ReuseId,
    /// Frame last pushed through `apply_layout`; kept cells skip the call
    /// when it has not moved.
    frame: Rect,
}

/// Pool-backed cell manager keyed by cell coordinate.
pub struct Recycler<C> {
    attached: HashMap<CellCoord, AttachedCell<C>>,
    pool: HashMap<ReuseId, Vec<C>>,
    created: u64,
    reused: u64,
}

impl<C> Default for Recycler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Recycler<C> {
    pub fn new() -> Self {
        Self {
            attached: HashMap::new(),
            pool: HashMap::new(),
            created: 0,
            reused: 0,
        }
    }

    /// The attached cell at a coordinate, if any.
    pub fn cell(&self, coord: CellCoord) -> Option<&C> {
        self.attached.get(&coord).map(|slot| &slot.cell)
    }

    /// Mutable access to the attached cell at a coordinate.
    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut C> {
        self.attached.get_mut(&coord).map(|slot| &mut slot.cell)
    }

    pub fn is_attached(&self, coord: CellCoord) -> bool {
        self.attached.contains_key(&coord)
    }

    /// Sorted coordinates of all attached cells.
    pub fn attached_coords(&self) -> Vec<CellCoord> {
        let mut coords: Vec<CellCoord> = self.attached.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn stats(&self) -> RecycleStats {
        RecycleStats {
            created: self.created,
            reused: self.reused,
            attached: self.attached.len(),
            pooled: self.pool.values().map(Vec::len).sum(),
        }
    }

    /// Drop every cell, attached and pooled. Lifetime counters survive.
    pub fn teardown(&mut self) {
        self.attached.clear();
        self.pool.clear();
    }
}

impl<C: GridCell> Recycler<C> {
    /// Reconcile the attached set against resolve output.
    ///
    /// Cells that left the visible set are detached into their pool before
    /// new entries draw from it, so a cell freed this pass can be reused
    /// this pass. Kept cells are re-positioned only when their frame moved.
    ///
    /// # Errors
    /// Returns [`GridError::CellProvider`] if the provider declines to
    /// create a cell. The recycler detaches everything first, leaving a
    /// consistent empty state.
    pub fn apply<P, F>(
        &mut self,
        entries: &[VisibleCellEntry],
        reuse_id_for: F,
        provider: &mut P,
    ) -> Result<RecycleOutcome>
    where
        P: CellProvider<Cell = C>,
        F: Fn(CellCoord) -> ReuseId,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "recycle_apply",
            entries = entries.len(),
            attached = self.attached.len()
        )
        .entered();

        let mut outcome = RecycleOutcome::default();

        let target: HashSet<CellCoord> = entries.iter().map(|entry| entry.coord).collect();
        let mut stale: Vec<CellCoord> = self
            .attached
            .keys()
            .filter(|coord| !target.contains(coord))
            .copied()
            .collect();
        stale.sort();
        for coord in stale {
            if let Some(slot) = self.attached.remove(&coord) {
                #[cfg(feature = "tracing")]
                tracing::trace!(column = coord.column, row = coord.row, "detached into pool");
                self.park(slot);
                outcome.detached.push(coord);
            }
        }

        for entry in entries {
            if let Some(slot) = self.attached.get_mut(&entry.coord) {
                if slot.frame != entry.frame {
                    slot.cell.apply_layout(entry);
                    slot.frame = entry.frame;
                }
                outcome.kept += 1;
                continue;
            }

            let reuse_id = reuse_id_for(entry.coord);
            let mut cell = match self.pool.get_mut(&reuse_id).and_then(Vec::pop) {
                Some(cell) => {
                    self.reused += 1;
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        column = entry.coord.column,
                        row = entry.coord.row,
                        reuse_id = reuse_id.as_str(),
                        "attached from pool"
                    );
                    cell
                }
                None => match provider.create(&reuse_id) {
                    Some(cell) => {
                        self.created += 1;
                        #[cfg(feature = "tracing")]
                        tracing::trace!(
                            column = entry.coord.column,
                            row = entry.coord.row,
                            reuse_id = reuse_id.as_str(),
                            "attached fresh from provider"
                        );
                        cell
                    }
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            reuse_id = reuse_id.as_str(),
                            "provider declined a cell, detaching all"
                        );
                        self.detach_all();
                        return Err(GridError::CellProvider { reuse_id });
                    }
                },
            };
            cell.apply_layout(entry);
            self.attached.insert(
                entry.coord,
                AttachedCell {
                    cell,
                    reuse_id,
                    frame: entry.frame,
                },
            );
            outcome.attached.push(entry.coord);
        }

        Ok(outcome)
    }

    /// Detach every attached cell into its pool. Returns the detached
    /// coordinates, sorted.
    pub fn detach_all(&mut self) -> Vec<CellCoord> {
        let mut coords: Vec<CellCoord> = self.attached.keys().copied().collect();
        coords.sort();
        let slots: Vec<AttachedCell<C>> = self.attached.drain().map(|(_, slot)| slot).collect();
        for slot in slots {
            self.park(slot);
        }
        coords
    }

    fn park(&mut self, mut slot: AttachedCell<C>) {
        slot.cell.prepare_for_reuse();
        self.pool.entry(slot.reuse_id).or_default().push(slot.cell);
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
    use crate::types::{Band, Rect};

    #[derive(Debug, Default)]
    struct TestCell {
        last_frame: Option<Rect>,
        layouts: u32,
        resets: u32,
    }

    impl GridCell for TestCell {
        fn apply_layout(&mut self, entry: &VisibleCellEntry) {
            self.last_frame = Some(entry.frame);
            self.layouts += 1;
        }

        fn prepare_for_reuse(&mut self) {
            self.last_frame = None;
            self.resets += 1;
        }
    }

    struct TestProvider {
        fail: bool,
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

    #[test]
    fn test_attach_then_keep() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };
        let entries = vec![entry(0, 0), entry(1, 0)];

        let outcome = recycler.apply(&entries, uniform_id, &mut provider).unwrap();
        assert_eq!(outcome.attached.len(), 2);
        assert_eq!(outcome.kept, 0);
        assert_eq!(recycler.stats().created, 2);

        let outcome = recycler.apply(&entries, uniform_id, &mut provider).unwrap();
        assert!(outcome.attached.is_empty());
        assert!(outcome.detached.is_empty());
        assert_eq!(outcome.kept, 2);
        assert_eq!(recycler.stats().created, 2);
    }

    #[test]
    fn test_detach_feeds_reuse() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };

        recycler
            .apply(&[entry(0, 0), entry(1, 0)], uniform_id, &mut provider)
            .unwrap();
        let outcome = recycler
            .apply(&[entry(1, 0), entry(2, 0)], uniform_id, &mut provider)
            .unwrap();

        assert_eq!(outcome.detached, vec![CellCoord::new(0, 0)]);
        assert_eq!(outcome.attached, vec![CellCoord::new(2, 0)]);
        assert_eq!(outcome.kept, 1);

        let stats = recycler.stats();
        // The detached cell came back out of the pool for (2, 0).
        assert_eq!(stats.created, 2);
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.attached, 2);
        assert_eq!(stats.pooled, 0);

        let cell = recycler.cell(CellCoord::new(2, 0)).unwrap();
        assert_eq!(cell.resets, 1);
        assert_eq!(cell.last_frame.unwrap().x, 20.0);
    }

    #[test]
    fn test_kept_cells_are_repositioned() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };

        recycler.apply(&[entry(0, 0)], uniform_id, &mut provider).unwrap();

        let mut moved = entry(0, 0);
        moved.frame = Rect::new(-4.0, 0.0, 10.0, 10.0);
        recycler.apply(&[moved], uniform_id, &mut provider).unwrap();

        let cell = recycler.cell(CellCoord::new(0, 0)).unwrap();
        assert_eq!(cell.layouts, 2);
        assert_eq!(cell.last_frame.unwrap().x, -4.0);
    }

    #[test]
    fn test_kept_cells_skip_layout_when_static() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };
        let entries = vec![entry(0, 0)];

        recycler.apply(&entries, uniform_id, &mut provider).unwrap();
        recycler.apply(&entries, uniform_id, &mut provider).unwrap();

        // Identical frame on the second pass: the host is not touched.
        let cell = recycler.cell(CellCoord::new(0, 0)).unwrap();
        assert_eq!(cell.layouts, 1);
    }

    #[test]
    fn test_provider_failure_leaves_empty_state() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };

        recycler
            .apply(&[entry(0, 0), entry(1, 0)], uniform_id, &mut provider)
            .unwrap();

        provider.fail = true;
        let err = recycler
            .apply(&[entry(5, 5)], uniform_id, &mut provider)
            .unwrap_err();
        assert!(matches!(err, GridError::CellProvider { .. }));

        let stats = recycler.stats();
        assert_eq!(stats.attached, 0);
        // Existing cells survived into the pool.
        assert_eq!(stats.pooled, 2);
    }

    #[test]
    fn test_pools_are_per_identifier() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };
        let id_by_parity = |coord: CellCoord| {
            if coord.column % 2 == 0 {
                ReuseId::new("even")
            } else {
                ReuseId::new("odd")
            }
        };

        recycler
            .apply(&[entry(0, 0)], id_by_parity, &mut provider)
            .unwrap();
        // Column 0 detaches into the "even" pool; column 1 cannot use it.
        recycler
            .apply(&[entry(1, 0)], id_by_parity, &mut provider)
            .unwrap();

        let stats = recycler.stats();
        assert_eq!(stats.created, 2);
        assert_eq!(stats.reused, 0);
        assert_eq!(stats.pooled, 1);

        // Column 2 drains the "even" pool.
        recycler
            .apply(&[entry(2, 0)], id_by_parity, &mut provider)
            .unwrap();
        assert_eq!(recycler.stats().reused, 1);
    }

    #[test]
    fn test_teardown_drops_everything() {
        let mut recycler = Recycler::new();
        let mut provider = TestProvider { fail: false };

        recycler
            .apply(&[entry(0, 0), entry(1, 0)], uniform_id, &mut provider)
            .unwrap();
        recycler.apply(&[entry(9, 9)], uniform_id, &mut provider).unwrap();
        recycler.teardown();

        let stats = recycler.stats();
        assert_eq!(stats.attached, 0);
        assert_eq!(stats.pooled, 0);
        // Lifetime counters survive teardown.
        assert!(stats.created > 0);
    }
}
