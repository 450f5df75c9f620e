//! Set algebra on `ProbeSet`.
//!
//! Arguments are arbitrary sequences, consumed once. Each candidate is
//! resolved to a slot of the receiver through the probe engine; the
//! containment predicates record hits in a mask indexed by slot, sized to
//! the receiver's capacity, so a candidate repeated in the sequence
//! counts once.

use crate::set::ProbeSet;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// How a sequence relates to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Coverage {
    /// Distinct receiver slots hit by the sequence.
    matched: usize,
    /// Whether some candidate is absent from the receiver.
    missing: bool,
}

impl<T, S> ProbeSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Mark every receiver slot hit by `other`. With `stop_on_missing`, the
    /// scan ends at the first absent candidate.
    fn coverage<I, A>(&self, other: I, stop_on_missing: bool) -> Coverage
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        let mut mask = vec![false; self.raw.capacity()];
        let mut cov = Coverage {
            matched: 0,
            missing: false,
        };
        for candidate in other {
            let candidate: &T = candidate.borrow();
            match self.raw.find(candidate) {
                Some(idx) => {
                    if !mask[idx] {
                        mask[idx] = true;
                        cov.matched += 1;
                    }
                }
                None => {
                    cov.missing = true;
                    if stop_on_missing {
                        break;
                    }
                }
            }
        }
        cov
    }

    /// Insert every element of `other`.
    pub fn union_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
    {
        for t in other {
            self.insert(t);
        }
    }

    /// Remove every element of `other` that is present.
    ///
    /// A result with no elements is cleared, so it holds a single slot
    /// whether the receiver was emptied by `other` or was empty already
    /// and `other` is too.
    pub fn except_with<I, A>(&mut self, other: I)
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        let mut other = other.into_iter();
        if self.is_empty() {
            if other.next().is_none() {
                self.clear();
            }
            return;
        }
        for candidate in other {
            let candidate: &T = candidate.borrow();
            self.remove(candidate);
            if self.is_empty() {
                self.clear();
                return;
            }
        }
    }

    /// Keep the elements present in exactly one of the receiver and `other`.
    ///
    /// `other` is first collected into a set with the receiver's hasher, so
    /// repeated candidates toggle once. If it equals the receiver, the
    /// receiver is cleared.
    pub fn symmetric_except_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
        S: Clone,
    {
        let mut distinct = ProbeSet::with_hasher(self.hasher().clone());
        distinct.union_with(other);
        if self.set_equals(distinct.iter()) {
            self.clear();
            return;
        }
        for t in distinct {
            if !self.remove(&t) {
                self.insert(t);
            }
        }
    }

    /// Keep only the elements that also occur in `other`.
    pub fn intersect_with<I, A>(&mut self, other: I)
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        if self.is_empty() {
            return;
        }
        let mut keep = vec![false; self.raw.capacity()];
        for candidate in other {
            let candidate: &T = candidate.borrow();
            if let Some(idx) = self.raw.find(candidate) {
                keep[idx] = true;
            }
        }
        self.raw.remove_where(|idx, _, _| !keep[idx]);
    }

    /// Whether any element of `other` is present.
    pub fn overlaps<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        if self.is_empty() {
            return false;
        }
        other.into_iter().any(|c| {
            let c: &T = c.borrow();
            self.contains(c)
        })
    }

    /// Whether every element of the receiver occurs in `other`.
    pub fn is_subset_of<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        self.coverage(other, false).matched == self.len()
    }

    /// Subset, and `other` holds something the receiver lacks.
    pub fn is_proper_subset_of<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        let cov = self.coverage(other, false);
        cov.matched == self.len() && cov.missing
    }

    /// Whether every element of `other` is present.
    pub fn is_superset_of<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        !self.coverage(other, true).missing
    }

    /// Superset, and the receiver holds something `other` lacks.
    pub fn is_proper_superset_of<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        let cov = self.coverage(other, true);
        !cov.missing && cov.matched < self.len()
    }

    /// Whether `other` holds exactly the receiver's elements. Fails fast on
    /// the first absent candidate.
    pub fn set_equals<I, A>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Borrow<T>,
    {
        let cov = self.coverage(other, true);
        !cov.missing && cov.matched == self.len()
    }
}
