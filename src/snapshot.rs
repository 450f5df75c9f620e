//! Construction from entry sequences, snapshots, and optional serde.
//!
//! Two reload paths exist. The lenient one (`from_entries`,
//! `from_elements`, `FromIterator`) keeps the first of any repeated key.
//! The strict one (`try_from_entries`, `try_from_elements`, and
//! `Deserialize`) fails on the first repeat.
//!
//! Snapshots are taken in slot order; feeding one back rebuilds an equal
//! container, not necessarily with the same layout.

use crate::error::CollectionError;
use crate::map::ProbeMap;
use crate::set::ProbeSet;
use core::hash::{BuildHasher, Hash};

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Build from `(key, value)` pairs; a repeated key keeps its first value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries_with_capacity(0, entries)
    }

    pub fn from_entries_with_capacity<I>(capacity: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_capacity_and_hasher(capacity, S::default());
        map.extend(entries);
        map
    }

    /// Build from `(key, value)` pairs, failing on a repeated key.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_hasher(S::default());
        for (k, v) in entries {
            map.add(k, v)?;
        }
        Ok(map)
    }
}

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Clone,
    V: Clone,
{
    /// Every entry, cloned, in slot order.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<T, S> ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Build from elements; repeats are ignored.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_elements_with_capacity(0, elements)
    }

    pub fn from_elements_with_capacity<I>(capacity: usize, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_capacity_and_hasher(capacity, S::default());
        set.extend(elements);
        set
    }

    /// Build from elements, failing on a repeated one.
    pub fn try_from_elements<I>(elements: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_hasher(S::default());
        for t in elements {
            if !set.insert(t) {
                return Err(CollectionError::DuplicateKey);
            }
        }
        Ok(set)
    }
}

impl<T, S> ProbeSet<T, S>
where
    T: Clone,
{
    /// Every element, cloned, in slot order.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use core::fmt;
    use core::marker::PhantomData;
    use serde::de::{self, SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const DUPLICATE: &str = "duplicate key in snapshot";

    /// Most slots a load reserves up front; larger inputs grow as they arrive.
    const MAX_PREALLOC: usize = 4096;

    /// Initial capacity for a sequence of unverified length.
    pub(super) fn cautious(hint: Option<usize>) -> usize {
        hint.unwrap_or(0).min(MAX_PREALLOC)
    }

    impl<K, V, S> Serialize for ProbeMap<K, V, S>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (k, v) in self.iter() {
                seq.serialize_element(&(k, v))?;
            }
            seq.end()
        }
    }

    impl<'de, K, V, S> Deserialize<'de> for ProbeMap<K, V, S>
    where
        K: Eq + Hash + Deserialize<'de>,
        V: Deserialize<'de>,
        S: BuildHasher + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct MapVisitor<K, V, S>(PhantomData<(K, V, S)>);

            impl<'de, K, V, S> Visitor<'de> for MapVisitor<K, V, S>
            where
                K: Eq + Hash + Deserialize<'de>,
                V: Deserialize<'de>,
                S: BuildHasher + Default,
            {
                type Value = ProbeMap<K, V, S>;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "sequence of (key, value) pairs")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let capacity = cautious(seq.size_hint());
                    let mut map = ProbeMap::with_capacity_and_hasher(capacity, S::default());
                    while let Some((k, v)) = seq.next_element::<(K, V)>()? {
                        map.add(k, v).map_err(|_| de::Error::custom(DUPLICATE))?;
                    }
                    Ok(map)
                }
            }

            deserializer.deserialize_seq(MapVisitor(PhantomData))
        }
    }

    impl<T, S> Serialize for ProbeSet<T, S>
    where
        T: Serialize,
    {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: Serializer,
        {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, S> Deserialize<'de> for ProbeSet<T, S>
    where
        T: Eq + Hash + Deserialize<'de>,
        S: BuildHasher + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct SetVisitor<T, S>(PhantomData<(T, S)>);

            impl<'de, T, S> Visitor<'de> for SetVisitor<T, S>
            where
                T: Eq + Hash + Deserialize<'de>,
                S: BuildHasher + Default,
            {
                type Value = ProbeSet<T, S>;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "sequence of set elements")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let capacity = cautious(seq.size_hint());
                    let mut set = ProbeSet::with_capacity_and_hasher(capacity, S::default());
                    while let Some(t) = seq.next_element::<T>()? {
                        if !set.insert(t) {
                            return Err(de::Error::custom(DUPLICATE));
                        }
                    }
                    Ok(set)
                }
            }

            deserializer.deserialize_seq(SetVisitor(PhantomData))
        }
    }
}
