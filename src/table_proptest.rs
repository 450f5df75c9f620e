#![cfg(test)]

// Property tests for ProbeMap and ProbeSet kept inside the crate so each
// step can check the slot-table invariants directly.

use crate::error::CollectionError;
use crate::map::ProbeMap;
use crate::set::ProbeSet;
use proptest::prelude::*;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Collision variant: every key lands on the same home slot.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Pool-indexed operations: indices shrink to earlier keys and op lists
// shrink in length.
#[derive(Clone, Debug)]
enum MapOp {
    Insert(usize, i32),
    Add(usize, i32),
    Remove(usize),
    RemovePair(usize, i32),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    RetainEven,
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_map_scenario() -> impl Strategy<Value = (Vec<String>, Vec<MapOp>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| MapOp::Insert(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| MapOp::Add(i, v)),
            3 => idx.clone().prop_map(MapOp::Remove),
            1 => (idx.clone(), -2..2i32).prop_map(|(i, v)| MapOp::RemovePair(i, v)),
            2 => idx.clone().prop_map(MapOp::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}".prop_map(|s| s)].prop_map(MapOp::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| MapOp::Mutate(i, d)),
            1 => Just(MapOp::RetainEven),
            1 => Just(MapOp::Clear),
            1 => Just(MapOp::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap. After every
// op the table must satisfy its structural invariants (count, a free slot,
// unbroken probe chains) and agree with the model on size.
fn run_map_ops<S>(
    mut sut: ProbeMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<MapOp>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    for op in ops {
        match op {
            MapOp::Insert(i, v) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
            }
            MapOp::Add(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                match sut.add(k.clone(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "add must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(e) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(e, CollectionError::DuplicateKey);
                    }
                }
            }
            MapOp::Remove(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.remove_entry(&k), model.remove_entry(&k));
            }
            MapOp::RemovePair(i, v) => {
                let k = key_from(pool, i);
                let matches = model.get(&k) == Some(&v);
                prop_assert_eq!(sut.remove_pair(&k, &v), matches);
                if matches {
                    model.remove(&k);
                }
            }
            MapOp::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
                prop_assert_eq!(sut.get_checked(&k).ok(), model.get(&k));
            }
            MapOp::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            MapOp::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(v) = sut.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
            }
            MapOp::RetainEven => {
                let before = model.len();
                model.retain(|_, v| *v % 2 == 0);
                let removed = sut.remove_where(|_, v| *v % 2 != 0);
                prop_assert_eq!(removed, before - model.len());
            }
            MapOp::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), 1);
            }
            MapOp::Iterate => {
                let s: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let m: BTreeMap<_, _> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
                prop_assert!(sut.entries_equal(model.iter()));
            }
        }

        if let Err(msg) = sut.raw.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_map_state_machine((pool, ops) in arb_map_scenario()) {
        run_map_ops(ProbeMap::<Key, i32, RandomState>::new(), &pool, ops)?;
    }

    // Worst-case collisions: every probe walks one long cluster, so this
    // stresses wraparound and backward-shift deletion.
    #[test]
    fn prop_map_state_machine_with_collisions((pool, ops) in arb_map_scenario()) {
        run_map_ops(ProbeMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}

#[derive(Clone, Debug)]
enum SetOp {
    Insert(u8),
    Remove(u8),
    Union(Vec<u8>),
    Except(Vec<u8>),
    Intersect(Vec<u8>),
    SymmetricExcept(Vec<u8>),
    Compare(Vec<u8>),
}

fn arb_set_ops() -> impl Strategy<Value = Vec<SetOp>> {
    let elem = 0u8..32;
    let others = proptest::collection::vec(0u8..32, 0..12);
    let op = prop_oneof![
        3 => elem.clone().prop_map(SetOp::Insert),
        2 => elem.prop_map(SetOp::Remove),
        1 => others.clone().prop_map(SetOp::Union),
        1 => others.clone().prop_map(SetOp::Except),
        1 => others.clone().prop_map(SetOp::Intersect),
        1 => others.clone().prop_map(SetOp::SymmetricExcept),
        2 => others.prop_map(SetOp::Compare),
    ];
    proptest::collection::vec(op, 1..80)
}

// Set algebra against std::collections::HashSet. Arguments may repeat
// elements; every predicate must treat them as a set.
fn run_set_ops<S>(mut sut: ProbeSet<u8, S>, ops: Vec<SetOp>) -> Result<(), TestCaseError>
where
    S: BuildHasher + Clone,
{
    let mut model: HashSet<u8> = HashSet::new();
    for op in ops {
        match op {
            SetOp::Insert(x) => prop_assert_eq!(sut.insert(x), model.insert(x)),
            SetOp::Remove(x) => prop_assert_eq!(sut.remove(&x), model.remove(&x)),
            SetOp::Union(o) => {
                model.extend(o.iter().copied());
                sut.union_with(o);
            }
            SetOp::Except(o) => {
                for x in &o {
                    model.remove(x);
                }
                sut.except_with(&o);
            }
            SetOp::Intersect(o) => {
                let other: HashSet<u8> = o.iter().copied().collect();
                model.retain(|x| other.contains(x));
                sut.intersect_with(o);
            }
            SetOp::SymmetricExcept(o) => {
                let other: HashSet<u8> = o.iter().copied().collect();
                model = model.symmetric_difference(&other).copied().collect();
                sut.symmetric_except_with(o);
            }
            SetOp::Compare(o) => {
                let other: HashSet<u8> = o.iter().copied().collect();
                prop_assert_eq!(sut.set_equals(&o), model == other);
                prop_assert_eq!(sut.is_subset_of(&o), model.is_subset(&other));
                prop_assert_eq!(sut.is_superset_of(&o), model.is_superset(&other));
                prop_assert_eq!(
                    sut.is_proper_subset_of(&o),
                    model.is_subset(&other) && model.len() < other.len()
                );
                prop_assert_eq!(
                    sut.is_proper_superset_of(&o),
                    model.is_superset(&other) && model.len() > other.len()
                );
                prop_assert_eq!(sut.overlaps(&o), !model.is_disjoint(&other));
            }
        }

        if let Err(msg) = sut.raw.check_invariants() {
            return Err(TestCaseError::fail(msg));
        }
        let s: BTreeSet<u8> = sut.iter().copied().collect();
        let m: BTreeSet<u8> = model.iter().copied().collect();
        prop_assert_eq!(s, m);
        prop_assert_eq!(sut.len(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_set_algebra_state_machine(ops in arb_set_ops()) {
        run_set_ops(ProbeSet::<u8, RandomState>::new(), ops)?;
    }

    #[test]
    fn prop_set_algebra_with_collisions(ops in arb_set_ops()) {
        run_set_ops(ProbeSet::with_hasher(ConstBuildHasher), ops)?;
    }
}
