//! ProbeMap: key → value façade over `RawTable`.

use crate::error::CollectionError;
use crate::raw_table::{InsertOutcome, RawTable};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use std::collections::hash_map::RandomState;

pub use crate::slot_table::{IntoIter, Iter, IterMut};

/// An open-addressing hash map with linear probing.
///
/// Iteration follows slot order, which is neither insertion order nor
/// stable across a grow or shrink.
pub struct ProbeMap<K, V, S = RandomState> {
    pub(crate) raw: RawTable<K, V, S>,
}

impl<K, V> ProbeMap<K, V>
where
    K: Eq + Hash,
{
    /// An empty map with no slots; the first insert allocates.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> Default for ProbeMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, V, S> ProbeMap<K, V, S> {
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

    /// Number of slots in the backing table.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Remove every entry, leaving a single empty slot.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.raw.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.raw.iter_mut()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.raw.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.raw.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl ExactSizeIterator<Item = &mut V> + '_ {
        self.raw.iter_mut().map(|(_, v)| v)
    }

    /// Whether any entry holds `value`. Scans the whole table.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.iter().any(|(_, v)| v == value)
    }

    /// Clone every entry into `dest` starting at `index`, in slot order.
    ///
    /// Fails without writing anything when `dest[index..]` is shorter than
    /// `len()`, including when `index` is past the end.
    pub fn copy_to(&self, dest: &mut [(K, V)], index: usize) -> Result<(), CollectionError>
    where
        K: Clone,
        V: Clone,
    {
        let needed = self.len();
        let available = dest.len().saturating_sub(index);
        let target = match dest.get_mut(index..) {
            Some(target) if target.len() >= needed => target,
            _ => return Err(CollectionError::DestinationTooSmall { needed, available }),
        };
        for (out, (k, v)) in target.iter_mut().zip(self.raw.iter()) {
            *out = (k.clone(), v.clone());
        }
        Ok(())
    }

    /// Remove every entry the predicate selects; the table is rebuilt once.
    /// Returns how many entries were removed.
    pub fn remove_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.raw.remove_where(|_, k, v| remove(k, &*v))
    }

    /// Keep only the entries the predicate accepts.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.remove_where(|_, k, v| !keep(k, v));
    }
}

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Value for `key`, or `None` when absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key).map(|(_, v)| v)
    }

    /// Value for `key`, or `KeyNotFound` when absent.
    pub fn get_checked<Q>(&self, key: &Q) -> Result<&V, CollectionError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(CollectionError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_mut(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.find(key).is_some()
    }

    /// Whether `key` is present and maps to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.get(key) == Some(value)
    }

    /// Insert or overwrite. Returns the previous value when the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.insert(key, value, true) {
            InsertOutcome::Updated(old) => Some(old),
            InsertOutcome::Inserted | InsertOutcome::Rejected => None,
        }
    }

    /// Insert a new key; fails with `DuplicateKey` and leaves the stored
    /// value untouched when the key is present.
    pub fn add(&mut self, key: K, value: V) -> Result<(), CollectionError> {
        if self.try_add(key, value) {
            Ok(())
        } else {
            Err(CollectionError::DuplicateKey)
        }
    }

    /// Insert a new key; returns false when the key is present.
    pub fn try_add(&mut self, key: K, value: V) -> bool {
        matches!(self.raw.insert(key, value, false), InsertOutcome::Inserted)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(key)
    }

    /// Remove `key` only if it currently maps to `value`.
    pub fn remove_pair<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        match self.raw.find(key) {
            Some(idx) if self.raw.entry_at(idx).is_some_and(|(_, v)| v == value) => {
                self.raw.remove_at(idx).is_some()
            }
            _ => false,
        }
    }

    /// Whether `other` holds exactly the entries of this map.
    ///
    /// One pass: fails on the first pair that is missing here or maps to a
    /// different value, then checks every entry of this map was matched.
    /// Repeated pairs in `other` count once.
    pub fn entries_equal<I, A, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = (A, B)>,
        A: Borrow<K>,
        B: Borrow<V>,
        V: PartialEq,
    {
        let mut matched = vec![false; self.raw.capacity()];
        let mut remaining = self.len();
        for (k, v) in other {
            let key: &K = k.borrow();
            let value: &V = v.borrow();
            let idx = match self.raw.find(key) {
                Some(idx) => idx,
                None => return false,
            };
            match self.raw.entry_at(idx) {
                Some((_, stored)) if stored == value => {}
                _ => return false,
            }
            if !matched[idx] {
                matched[idx] = true;
                remaining -= 1;
            }
        }
        remaining == 0
    }
}

impl<K, V, S> Clone for ProbeMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for ProbeMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries_equal(other.iter())
    }
}

impl<K, V, S> Eq for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for ProbeMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// Panics when the key is absent; use `get_checked` for a typed error.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not present in ProbeMap")
    }
}

/// Lenient bulk insert: the first occurrence of a key wins.
impl<K, V, S> Extend<(K, V)> for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.try_add(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> IntoIterator for ProbeMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.raw.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbeMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ProbeMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
