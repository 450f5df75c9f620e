//! ProbeSet: key-only façade over `RawTable<T, ()>`.
//!
//! The set shares the probe engine and resize policy with `ProbeMap`; the
//! slot payload is `()`. Set algebra lives in `set_algebra`.

use crate::error::CollectionError;
use crate::raw_table::{InsertOutcome, RawTable};
use crate::slot_table;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use std::collections::hash_map::RandomState;

/// An open-addressing hash set with linear probing.
pub struct ProbeSet<T, S = RandomState> {
    pub(crate) raw: RawTable<T, (), S>,
}

impl<T> ProbeSet<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T, S> Default for ProbeSet<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

impl<T, S> ProbeSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            raw: RawTable::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Remove every element, leaving a single empty slot.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    /// Clone every element into `dest` starting at `index`, in slot order.
    pub fn copy_to(&self, dest: &mut [T], index: usize) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        let needed = self.len();
        let available = dest.len().saturating_sub(index);
        let target = match dest.get_mut(index..) {
            Some(target) if target.len() >= needed => target,
            _ => return Err(CollectionError::DestinationTooSmall { needed, available }),
        };
        for (out, t) in target.iter_mut().zip(self.iter()) {
            *out = t.clone();
        }
        Ok(())
    }

    /// Remove every element the predicate selects; returns how many.
    pub fn remove_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.raw.remove_where(|_, t, _| remove(t))
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.raw.remove_where(|_, t, _| !keep(t));
    }
}

impl<T, S> ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Add `value`; returns whether it was newly inserted. A present equal
    /// element is kept and `value` is dropped.
    pub fn insert(&mut self, value: T) -> bool {
        matches!(self.raw.insert(value, (), false), InsertOutcome::Inserted)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find(value).is_some()
    }

    /// The stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(value).map(|(t, _)| t)
    }

    /// Remove `value`; returns whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(value).is_some()
    }

    /// Remove and return the stored element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(value).map(|(t, _)| t)
    }
}

/// Iterator over set elements in slot order.
pub struct Iter<'a, T> {
    inner: slot_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(t, _)| t)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Owning iterator over set elements in slot order.
pub struct IntoIter<T> {
    inner: slot_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(t, _)| t)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for ProbeSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a ProbeSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> Clone for ProbeSet<T, S>
where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T, S> fmt::Debug for ProbeSet<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.set_equals(other.iter())
    }
}

impl<T, S> Eq for ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

/// Duplicates are ignored.
impl<T, S> Extend<T> for ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for t in iter {
            self.insert(t);
        }
    }
}

impl<T, S> FromIterator<T> for ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: `insert` reports novelty; duplicates keep the stored element.
    #[test]
    fn insert_reports_novelty() {
        let mut s: ProbeSet<String> = ProbeSet::new();
        assert!(s.insert("a".into()));
        assert!(!s.insert("a".into()));
        assert!(s.insert(String::new()));
        assert_eq!(s.len(), 2);
        assert!(s.contains(""));
        assert_eq!(s.get("a").map(String::as_str), Some("a"));
        assert_eq!(s.get("b"), None);
        s.raw.check_invariants().unwrap();
    }

    /// Invariant: removing an absent element changes nothing.
    #[test]
    fn remove_absent_is_noop() {
        let mut s: ProbeSet<i32> = ProbeSet::new();
        assert!(!s.remove(&1));
        s.insert(2);
        let cap = s.capacity();
        assert!(!s.remove(&1));
        assert_eq!(s.len(), 1);
        assert_eq!(s.capacity(), cap);
        assert_eq!(s.take(&2), Some(2));
        assert!(s.is_empty());
    }

    /// Invariant: bulk removal keeps every survivor reachable.
    #[test]
    fn remove_where_keeps_survivors_reachable() {
        let mut s: ProbeSet<u32> = (0..200).collect();
        assert_eq!(s.remove_where(|x| x % 5 != 0), 160);
        s.raw.check_invariants().unwrap();
        for x in 0..200 {
            assert_eq!(s.contains(&x), x % 5 == 0);
        }
        s.retain(|x| *x < 100);
        assert_eq!(s.len(), 20);
        s.raw.check_invariants().unwrap();
    }

    /// Invariant: `copy_to` fails before writing when the target is short.
    #[test]
    fn copy_to_checks_room() {
        let s: ProbeSet<i32> = [1, 2, 3].into_iter().collect();
        let mut dest = [0; 4];
        assert_eq!(
            s.copy_to(&mut dest, 2),
            Err(CollectionError::DestinationTooSmall {
                needed: 3,
                available: 2
            })
        );
        assert_eq!(dest, [0; 4]);
        s.copy_to(&mut dest, 1).unwrap();
        let mut tail = dest[1..].to_vec();
        tail.sort();
        assert_eq!(tail, vec![1, 2, 3]);
    }

    /// Invariant: clear empties the set and leaves one slot.
    #[test]
    fn clear_leaves_one_slot() {
        let mut s: ProbeSet<i32> = (0..10).collect();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), 1);
        assert!(!s.contains(&3));
        assert_eq!(s.iter().count(), 0);
    }
}
