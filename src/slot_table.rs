//! Slot Table: the fixed-length slot array and its occupancy bookkeeping.
//!
//! The table never probes and never resizes on its own; the probe engine
//! (`probe`) and the resize policy (`resize`) are layered on top as
//! additional `impl` blocks.

use core::iter::FusedIterator;
use core::mem;

/// One position of the table.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Empty,
    /// `hash` is cached at insertion time and never recomputed.
    Occupied { key: K, value: V, hash: u64 },
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    fn take(&mut self) -> Option<(K, V, u64)> {
        match mem::replace(self, Slot::Empty) {
            Slot::Occupied { key, value, hash } => Some((key, value, hash)),
            Slot::Empty => None,
        }
    }
}

/// Fixed-length array of slots plus the number of occupied ones.
///
/// The length of `slots` is the capacity and only changes by replacing
/// the whole table (see `resize`).
#[derive(Debug, Clone)]
pub(crate) struct SlotTable<K, V> {
    slots: Box<[Slot<K, V>]>,
    count: usize,
}

impl<K, V> SlotTable<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub(crate) fn slot(&self, idx: usize) -> &Slot<K, V> {
        &self.slots[idx]
    }

    pub(crate) fn entry(&self, idx: usize) -> Option<(&K, &V)> {
        match &self.slots[idx] {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            Slot::Empty => None,
        }
    }

    pub(crate) fn entry_mut(&mut self, idx: usize) -> Option<(&K, &mut V)> {
        match &mut self.slots[idx] {
            Slot::Occupied { key, value, .. } => Some((&*key, value)),
            Slot::Empty => None,
        }
    }

    /// Fill an empty slot. The caller has already chosen `idx` by probing.
    pub(crate) fn place(&mut self, idx: usize, key: K, value: V, hash: u64) {
        debug_assert!(!self.slots[idx].is_occupied(), "place into occupied slot");
        self.slots[idx] = Slot::Occupied { key, value, hash };
        self.count += 1;
    }

    /// Empty a slot without touching its neighbours.
    ///
    /// This alone can break probe chains; callers either shift the chain
    /// back (`remove_at`) or rebuild the table afterwards.
    pub(crate) fn vacate(&mut self, idx: usize) -> Option<(K, V, u64)> {
        let taken = self.slots[idx].take();
        if taken.is_some() {
            self.count -= 1;
        }
        taken
    }

    /// Move the entry at `from` into the empty slot `to`.
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        debug_assert!(!self.slots[to].is_occupied(), "shift into occupied slot");
        self.slots.swap(from, to);
    }

    /// Vacate every occupied slot for which `remove` answers true.
    /// Returns how many were vacated. Chains are left broken.
    pub(crate) fn vacate_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(usize, &K, &mut V) -> bool,
    {
        let mut removed = 0;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let hit = match slot {
                Slot::Occupied { key, value, .. } => remove(idx, key, value),
                Slot::Empty => false,
            };
            if hit {
                *slot = Slot::Empty;
                removed += 1;
            }
        }
        self.count -= removed;
        removed
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            remaining: self.count,
            slots: self.slots.iter_mut(),
        }
    }

    /// Consume the table, yielding entries with their cached hash in slot order.
    pub(crate) fn into_occupied(self) -> impl Iterator<Item = (K, V, u64)> {
        self.slots
            .into_vec()
            .into_iter()
            .filter_map(|mut slot| slot.take())
    }

    pub(crate) fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            remaining: self.count,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

/// Iterator over `(&K, &V)` in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(&K, &mut V)` in slot order.
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value, .. } = slot {
                self.remaining -= 1;
                return Some((&*key, value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` in slot order.
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for mut slot in self.slots.by_ref() {
            if let Some((key, value, _)) = slot.take() {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
impl<K, V> SlotTable<K, V> {
    /// Check bookkeeping and probe-chain continuity for every entry.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let occupied = self.slots.iter().filter(|s| s.is_occupied()).count();
        if occupied != self.count {
            return Err(format!("count {} but {} occupied slots", self.count, occupied));
        }
        if self.capacity() > 0 && self.count >= self.capacity() {
            return Err(format!(
                "no empty slot left: count {} capacity {}",
                self.count,
                self.capacity()
            ));
        }
        let cap = self.capacity();
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let mut pos = crate::probe::home_index(*hash, cap);
                while pos != idx {
                    if !self.slots[pos].is_occupied() {
                        return Err(format!(
                            "entry at {} unreachable: empty slot {} on its chain",
                            idx, pos
                        ));
                    }
                    pos = (pos + 1) % cap;
                }
            }
        }
        Ok(())
    }
}
