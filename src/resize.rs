//! Resize Policy: when to grow or shrink, and rehash by table replacement.
//!
//! A resize never edits the live slot array. It builds a fresh table of
//! the target capacity, moves every entry across in old slot order, and
//! swaps the new table in. Slot indices held from before the swap are
//! meaningless afterwards.

use crate::slot_table::SlotTable;
use tracing::trace;

/// Capacity multiplier on grow and divisor on shrink.
pub(crate) const RESIZE_FACTOR: usize = 2;

/// Shrink once the table is at most a quarter full.
const SHRINK_LOAD_DIVISOR: usize = 4;

/// Capacity after one grow step. Never below 1.
#[inline]
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    capacity.saturating_mul(RESIZE_FACTOR).max(1)
}

/// Checked before every insert, including ones that end as updates.
#[inline]
pub(crate) fn grow_before_insert(count: usize, capacity: usize) -> bool {
    count + 1 >= capacity
}

/// Checked after a new slot was filled.
#[inline]
pub(crate) fn grow_after_insert(count: usize, capacity: usize) -> bool {
    count >= capacity
}

/// Capacity a sparse table should shrink to, if any.
///
/// Halves repeatedly while `count <= capacity / 4`, so a single rehash
/// covers a bulk removal; the result leaves the table at most half full.
pub(crate) fn shrink_target(count: usize, capacity: usize) -> Option<usize> {
    let mut target = capacity;
    while target > 1 && count <= target / SHRINK_LOAD_DIVISOR {
        target = (target / RESIZE_FACTOR).max(1);
    }
    (target != capacity).then_some(target)
}

impl<K, V> SlotTable<K, V> {
    /// Replace the table with `new_capacity` empty slots and reinsert every
    /// entry by its cached hash, in old slot order.
    pub(crate) fn rehash(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity > self.len() || (new_capacity == 0 && self.is_empty()));
        let old = core::mem::replace(self, SlotTable::new(new_capacity));
        for (key, value, hash) in old.into_occupied() {
            let idx = self
                .vacant_for(hash)
                .expect("rehash target must have room for every entry");
            self.place(idx, key, value, hash);
        }
    }

    pub(crate) fn grow(&mut self) {
        let old = self.capacity();
        let new = grown_capacity(old);
        trace!(old_capacity = old, new_capacity = new, len = self.len(), "grow");
        self.rehash(new);
    }

    /// Shrink after a single delete if the table became sparse.
    pub(crate) fn shrink_if_sparse(&mut self) -> bool {
        match shrink_target(self.len(), self.capacity()) {
            Some(new) => {
                trace!(
                    old_capacity = self.capacity(),
                    new_capacity = new,
                    len = self.len(),
                    "shrink"
                );
                self.rehash(new);
                true
            }
            None => false,
        }
    }

    /// Rebuild after slots were vacated in place, restoring every probe
    /// chain. Shrinks in the same pass when the table is sparse.
    pub(crate) fn rebuild(&mut self) {
        let old = self.capacity();
        let new = shrink_target(self.len(), old).unwrap_or(old).max(1);
        trace!(old_capacity = old, new_capacity = new, len = self.len(), "rebuild");
        self.rehash(new);
    }
}
