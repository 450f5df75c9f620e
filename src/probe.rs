//! Probe Engine: linear probing with wraparound over a `SlotTable`.
//!
//! Lookup, insert and delete all walk the same sequence starting at the
//! key's home index. A lookup stops at the first empty slot, so deletion
//! shifts later chain members back into the hole instead of leaving it
//! empty in the middle of a chain.

use crate::slot_table::{Slot, SlotTable};

/// Map a hash to a non-negative value before reducing it modulo capacity.
///
/// The hash is read as a signed integer and its magnitude is taken. The
/// minimum signed value maps to 2^63 rather than staying negative.
#[inline]
pub(crate) fn normalize(hash: u64) -> u64 {
    (hash as i64).unsigned_abs()
}

/// First slot a hash maps to before any probing.
#[inline]
pub(crate) fn home_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (normalize(hash) % capacity as u64) as usize
}

/// The slot positions visited for one hash: home, home + 1, ... wrapping
/// at `capacity`, each position at most once.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    pos: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        let pos = if capacity == 0 {
            0
        } else {
            home_index(hash, capacity)
        };
        Self {
            pos,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let here = self.pos;
        self.pos += 1;
        if self.pos == self.capacity {
            self.pos = 0;
        }
        Some(here)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Where an insert lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// An entry with the same hash and an equal key sits here.
    Found(usize),
    /// First empty slot on the chain.
    Vacant(usize),
    /// Every slot was visited without a match or an empty slot.
    Full,
}

impl<K, V> SlotTable<K, V> {
    /// Slot holding the entry with `hash` whose key satisfies `eq`.
    pub(crate) fn find_index<F>(&self, hash: u64, mut eq: F) -> Option<usize>
    where
        F: FnMut(&K) -> bool,
    {
        if self.is_empty() {
            return None;
        }
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match self.slot(idx) {
                Slot::Empty => return None,
                Slot::Occupied { key, hash: h, .. } if *h == hash && eq(key) => {
                    return Some(idx)
                }
                Slot::Occupied { .. } => {}
            }
        }
        None
    }

    /// Walk the chain for `hash` until a matching entry or an empty slot.
    pub(crate) fn probe_for_insert<F>(&self, hash: u64, mut eq: F) -> Probe
    where
        F: FnMut(&K) -> bool,
    {
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match self.slot(idx) {
                Slot::Empty => return Probe::Vacant(idx),
                Slot::Occupied { key, hash: h, .. } if *h == hash && eq(key) => {
                    return Probe::Found(idx)
                }
                Slot::Occupied { .. } => {}
            }
        }
        Probe::Full
    }

    /// First empty slot on the chain for `hash`, ignoring keys.
    ///
    /// Used by rehash, where every entry is already known to be unique.
    pub(crate) fn vacant_for(&self, hash: u64) -> Option<usize> {
        ProbeSeq::new(hash, self.capacity()).find(|&idx| !self.slot(idx).is_occupied())
    }

    /// Remove the entry at `idx` and close the hole by shifting later
    /// members of the cluster backwards.
    ///
    /// An entry at `j` may move into the hole at `gap` unless its home lies
    /// cyclically in `(gap, j]`; moving it then would put it before its home.
    pub(crate) fn remove_at(&mut self, idx: usize) -> Option<(K, V)> {
        let (key, value, _) = self.vacate(idx)?;
        let cap = self.capacity();
        let mut gap = idx;
        let mut j = idx;
        for _ in 1..cap {
            j = (j + 1) % cap;
            let home = match self.slot(j) {
                Slot::Empty => break,
                Slot::Occupied { hash, .. } => home_index(*hash, cap),
            };
            let home_in_range = if gap < j {
                home > gap && home <= j
            } else {
                home > gap || home <= j
            };
            if !home_in_range {
                self.shift(j, gap);
                gap = j;
            }
        }
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: normalization is the signed magnitude of the hash.
    #[test]
    fn normalize_takes_signed_magnitude() {
        assert_eq!(normalize(0), 0);
        assert_eq!(normalize(7), 7);
        // -1 as i64
        assert_eq!(normalize(u64::MAX), 1);
        assert_eq!(normalize((-42i64) as u64), 42);
        // i64::MIN has no positive counterpart; its magnitude is 2^63.
        assert_eq!(normalize(i64::MIN as u64), 1u64 << 63);
    }

    /// Invariant: a probe sequence visits each slot once, starting at home
    /// and wrapping at capacity.
    #[test]
    fn probe_sequence_wraps_and_covers_table() {
        let seq: Vec<usize> = ProbeSeq::new(6, 4).collect();
        assert_eq!(seq, vec![2, 3, 0, 1]);
        assert_eq!(ProbeSeq::new(123, 0).count(), 0);
        assert_eq!(ProbeSeq::new(5, 1).collect::<Vec<_>>(), vec![0]);
    }

    /// Invariant: lookup stops at the first empty slot and never compares
    /// keys whose cached hash differs from the query hash.
    #[test]
    fn find_requires_hash_and_key_match() {
        let mut t: SlotTable<&str, i32> = SlotTable::new(4);
        t.place(1, "a", 1, 1);
        t.place(2, "b", 2, 1);
        assert_eq!(t.find_index(1, |k| *k == "a"), Some(1));
        assert_eq!(t.find_index(1, |k| *k == "b"), Some(2));
        // same hash, unknown key: the walk ends at the empty slot 3.
        assert_eq!(t.find_index(1, |k| *k == "c"), None);
        // a key match under the wrong hash is not a hit.
        let mut calls = 0;
        assert_eq!(
            t.find_index(2, |_| {
                calls += 1;
                true
            }),
            None
        );
        assert_eq!(calls, 0);
    }

    /// Invariant: insert probing reports the matching slot, the first empty
    /// slot, or a full table.
    #[test]
    fn probe_for_insert_outcomes() {
        let mut t: SlotTable<u32, ()> = SlotTable::new(2);
        assert_eq!(t.probe_for_insert(3, |_| false), Probe::Vacant(1));
        t.place(1, 3, (), 3);
        assert_eq!(t.probe_for_insert(3, |k| *k == 3), Probe::Found(1));
        assert_eq!(t.probe_for_insert(3, |k| *k == 5), Probe::Vacant(0));
        t.place(0, 5, (), 3);
        assert_eq!(t.probe_for_insert(3, |k| *k == 9), Probe::Full);
    }

    /// Invariant: backward-shift deletion keeps every remaining member of a
    /// colliding cluster reachable, including across the wraparound.
    #[test]
    fn remove_at_shifts_cluster_back() {
        let mut t: SlotTable<u32, ()> = SlotTable::new(8);
        // Three keys homed at 6 occupy 6, 7, 0; a key homed at 0 lands at 1.
        for (key, hash) in [(10u32, 6u64), (11, 6), (12, 6), (20, 0)] {
            match t.probe_for_insert(hash, |k| *k == key) {
                Probe::Vacant(idx) => t.place(idx, key, (), hash),
                other => panic!("unexpected probe: {:?}", other),
            }
        }
        assert_eq!(t.find_index(0, |k| *k == 20), Some(1));

        assert_eq!(t.remove_at(6), Some((10, ())));
        t.check_invariants().unwrap();
        assert_eq!(t.find_index(6, |k| *k == 11), Some(6));
        assert_eq!(t.find_index(6, |k| *k == 12), Some(7));
        // key 20 moves back to its home once slot 0 frees up.
        assert_eq!(t.find_index(0, |k| *k == 20), Some(0));
        assert_eq!(t.len(), 3);
    }

    /// Invariant: an entry already at its home is never shifted in front of it.
    #[test]
    fn remove_at_keeps_entries_at_home() {
        let mut t: SlotTable<u32, ()> = SlotTable::new(4);
        t.place(0, 1, (), 0);
        t.place(1, 2, (), 1);
        assert_eq!(t.remove_at(0), Some((1, ())));
        assert_eq!(t.find_index(1, |k| *k == 2), Some(1));
        t.check_invariants().unwrap();
        assert_eq!(t.remove_at(0), None);
    }
}
