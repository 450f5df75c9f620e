// Set-algebra laws on ProbeSet.
//
// Arguments are plain sequences. Each law is checked with sequences that
// repeat elements and with sequences that are not sets at all, since the
// receiver must treat every argument as the set of its distinct elements.
use probe_collections::ProbeSet;

fn set(items: impl IntoIterator<Item = i32>) -> ProbeSet<i32> {
    items.into_iter().collect()
}

fn sorted(s: &ProbeSet<i32>) -> Vec<i32> {
    let mut v: Vec<i32> = s.iter().copied().collect();
    v.sort();
    v
}

// Test: union and intersection are commutative in content.
#[test]
fn union_and_intersection_commute() {
    let a = [1, 2, 3, 4, 5];
    let b = [4, 5, 6, 6, 7];

    let mut ab = set(a);
    ab.union_with(b);
    let mut ba = set(b);
    ba.union_with(a);
    assert_eq!(ab, ba);
    assert_eq!(sorted(&ab), vec![1, 2, 3, 4, 5, 6, 7]);

    let mut ab = set(a);
    ab.intersect_with(b);
    let mut ba = set(b);
    ba.intersect_with(a);
    assert_eq!(ab, ba);
    assert_eq!(sorted(&ab), vec![4, 5]);
}

// Test: A \ B, B \ A and A ∩ B partition A ∪ B, and A △ B equals their union.
#[test]
fn symmetric_difference_is_union_of_differences() {
    let a: Vec<i32> = (0..100).filter(|x| x % 2 == 0).collect();
    let b: Vec<i32> = (0..100).filter(|x| x % 3 == 0).chain([0, 0, 3]).collect();

    let mut a_minus_b = set(a.iter().copied());
    a_minus_b.except_with(&b);
    let mut b_minus_a = set(b.iter().copied());
    b_minus_a.except_with(&a);
    let mut both = set(a.iter().copied());
    both.intersect_with(&b);

    let mut sym = set(a.iter().copied());
    sym.symmetric_except_with(b.iter().copied());

    let mut expected = a_minus_b.clone();
    expected.union_with(b_minus_a.iter().copied());
    assert_eq!(sym, expected);
    assert!(!sym.overlaps(&both));

    let mut all = set(a.iter().copied());
    all.union_with(b.iter().copied());
    assert_eq!(sym.len() + both.len(), all.len());
}

// Test: symmetric difference with itself empties; twice restores.
#[test]
fn symmetric_difference_involution() {
    let a = set(0..30);
    let b: Vec<i32> = (20..50).collect();

    let mut x = a.clone();
    x.symmetric_except_with(a.iter().copied());
    assert!(x.is_empty());

    let mut y = a.clone();
    y.symmetric_except_with(b.iter().copied());
    y.symmetric_except_with(b.iter().copied());
    assert_eq!(y, a);
}

// Test: subset and superset are duals; proper variants exclude equality.
#[test]
fn containment_duality() {
    let small = set([2, 4]);
    let big = set([1, 2, 3, 4]);

    assert!(small.is_subset_of(big.iter()));
    assert!(big.is_superset_of(small.iter()));
    assert!(small.is_proper_subset_of(big.iter()));
    assert!(big.is_proper_superset_of(small.iter()));

    assert!(small.is_subset_of([4, 2, 2, 4]));
    assert!(!small.is_proper_subset_of([4, 2, 2, 4]));
    assert!(small.is_superset_of([4, 2, 2, 4]));
    assert!(!small.is_proper_superset_of([4, 2, 2, 4]));
    assert!(small.set_equals([4, 2, 2, 4]));

    assert!(!big.is_subset_of(small.iter()));
    assert!(!small.is_superset_of(big.iter()));
}

// Test: the empty set relates to everything the way the math says.
#[test]
fn empty_set_edge_cases() {
    let empty: ProbeSet<i32> = ProbeSet::new();
    let none: [i32; 0] = [];

    assert!(empty.is_subset_of(none));
    assert!(empty.is_superset_of(none));
    assert!(empty.set_equals(none));
    assert!(!empty.is_proper_subset_of(none));
    assert!(!empty.is_proper_superset_of(none));
    assert!(empty.is_proper_subset_of([9]));
    assert!(!empty.overlaps([9]));

    let full = set([1]);
    assert!(full.is_proper_superset_of(none));
    assert!(!full.is_subset_of(none));

    let mut s = set([1, 2]);
    s.intersect_with(none);
    assert!(s.is_empty());
    let mut s = set([1, 2]);
    s.union_with(none);
    s.except_with(none);
    assert_eq!(sorted(&s), vec![1, 2]);
}

// Test: algebra on a large set keeps every survivor reachable.
#[test]
fn large_intersection_then_lookup() {
    let mut s = set(0..20_000);
    s.intersect_with((0..20_000).filter(|x| x % 7 == 0));
    assert_eq!(s.len(), (0..20_000).filter(|x| x % 7 == 0).count());
    for x in 0..20_000 {
        assert_eq!(s.contains(&x), x % 7 == 0);
    }
    assert!(s.capacity() > s.len());
}
