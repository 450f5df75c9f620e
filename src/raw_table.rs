//! RawTable: hasher plus slot table, shared by `ProbeMap` and `ProbeSet`.
//!
//! This is the only layer that computes hashes. Everything below it works
//! from cached hashes; everything above it works through slot indices
//! returned here and never keeps one across a mutating call.

use crate::probe::Probe;
use crate::resize::{grow_after_insert, grow_before_insert};
use crate::slot_table::{IntoIter, Iter, IterMut, SlotTable};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;

/// Result of `RawTable::insert`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InsertOutcome<V> {
    /// A new slot was filled.
    Inserted,
    /// The key was present and its value replaced; carries the old value.
    Updated(V),
    /// The key was present and overwriting was not allowed.
    Rejected,
}

#[derive(Clone)]
pub(crate) struct RawTable<K, V, S> {
    hasher: S,
    table: SlotTable<K, V>,
}

impl<K, V, S> RawTable<K, V, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            table: SlotTable::new(capacity),
        }
    }

    #[inline]
    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub(crate) fn entry_at(&self, idx: usize) -> Option<(&K, &V)> {
        self.table.entry(idx)
    }

    /// Drop every entry and fall back to a single empty slot.
    pub(crate) fn clear(&mut self) {
        self.table = SlotTable::new(1);
    }

    /// Remove the entry at `idx` (a slot index obtained from `find` with no
    /// mutation in between), then apply the shrink policy.
    pub(crate) fn remove_at(&mut self, idx: usize) -> Option<(K, V)> {
        let removed = self.table.remove_at(idx)?;
        self.table.shrink_if_sparse();
        Some(removed)
    }

    /// Vacate every entry `remove` selects, then rebuild once.
    ///
    /// The predicate also receives the slot index so callers can select by
    /// a mask built from earlier lookups.
    pub(crate) fn remove_where<F>(&mut self, remove: F) -> usize
    where
        F: FnMut(usize, &K, &mut V) -> bool,
    {
        if self.table.is_empty() {
            return 0;
        }
        let removed = self.table.vacate_where(remove);
        if removed > 0 {
            self.table.rebuild();
        }
        removed
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    pub(crate) fn into_iter(self) -> IntoIter<K, V> {
        self.table.into_iter()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        self.table.check_invariants()
    }
}

impl<K, V, S> RawTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    pub(crate) fn hash_of<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Slot index of the entry whose key equals `q`.
    pub(crate) fn find<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.table.is_empty() {
            return None;
        }
        let hash = self.hash_of(q);
        self.table.find_index(hash, |k| {
            let k: &Q = k.borrow();
            k == q
        })
    }

    pub(crate) fn get<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(q)?;
        self.table.entry(idx)
    }

    pub(crate) fn get_mut<Q>(&mut self, q: &Q) -> Option<(&K, &mut V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(q)?;
        self.table.entry_mut(idx)
    }

    /// Insert `key`, replacing the value of an equal key only when
    /// `overwrite` is set.
    ///
    /// The grow check runs before probing, so a rejected or updating call
    /// may still have doubled the capacity. After it the table always has
    /// an empty slot, so one scan settles the call.
    pub(crate) fn insert(&mut self, key: K, value: V, overwrite: bool) -> InsertOutcome<V> {
        let hash = self.hash_of(&key);
        if grow_before_insert(self.table.len(), self.table.capacity()) {
            self.table.grow();
        }
        match self.table.probe_for_insert(hash, |k| *k == key) {
            Probe::Found(idx) => {
                if !overwrite {
                    return InsertOutcome::Rejected;
                }
                let (_, slot_value) = self
                    .table
                    .entry_mut(idx)
                    .expect("probe reported an occupied slot");
                InsertOutcome::Updated(mem::replace(slot_value, value))
            }
            Probe::Vacant(idx) => {
                self.table.place(idx, key, value, hash);
                if grow_after_insert(self.table.len(), self.table.capacity()) {
                    self.table.grow();
                }
                InsertOutcome::Inserted
            }
            Probe::Full => unreachable!("grow check leaves an empty slot"),
        }
    }

    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(q)?;
        self.remove_at(idx)
    }
}
