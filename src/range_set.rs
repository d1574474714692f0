// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RangeSet is a set of unsigned 64 bit integers, stored as a sorted list of
/// disjoint half-open ranges. It is typically used to hold the curve
/// indexes (see [`crate::curve`]) of the cells intersecting a region.
///
/// Ranges are written `[first, last)`. Ranges wrap around: if `first > last`
/// the range is `[first, 2^64) ∪ [0, last)`, and if `first == last` it is
/// the full range `[0, 2^64)`. An end of 0 in the output of
/// [`ranges`](RangeSet::ranges) stands for 2^64.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeSet {
    // Strictly increasing range boundaries. A value belongs to the set iff
    // an odd number of boundaries are less than or equal to it, so a
    // trailing unpaired boundary extends to 2^64.
    bounds: Vec<u64>,
}

impl RangeSet {
    /// Returns an empty set.
    pub fn new() -> Self {
        RangeSet { bounds: Vec::new() }
    }

    /// Returns the set containing every u64.
    pub fn full() -> Self {
        RangeSet { bounds: vec![0] }
    }

    /// Returns the set containing only v.
    pub fn from_value(v: u64) -> Self {
        Self::from_range(v, v.wrapping_add(1))
    }

    /// Returns the set containing the integers in `[first, last)`, wrapping
    /// around as described on the type.
    pub fn from_range(first: u64, last: u64) -> Self {
        let bounds = if first == last {
            vec![0]
        } else if first < last {
            vec![first, last]
        } else if last == 0 {
            vec![first]
        } else {
            vec![0, last, first]
        };
        RangeSet { bounds }
    }

    /// Reports whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Reports whether the set contains every u64.
    pub fn is_full(&self) -> bool {
        self.bounds.len() == 1 && self.bounds[0] == 0
    }

    /// Removes every value from the set.
    pub fn clear(&mut self) {
        self.bounds.clear();
    }

    /// Adds the range `[first, last)` to the set.
    pub fn insert(&mut self, first: u64, last: u64) {
        *self = self.union(&Self::from_range(first, last));
    }

    /// Adds v to the set.
    pub fn insert_value(&mut self, v: u64) {
        self.insert(v, v.wrapping_add(1));
    }

    /// Removes the range `[first, last)` from the set.
    pub fn erase(&mut self, first: u64, last: u64) {
        *self = self.difference(&Self::from_range(first, last));
    }

    /// Removes v from the set.
    pub fn erase_value(&mut self, v: u64) {
        self.erase(v, v.wrapping_add(1));
    }

    /// Returns the set of integers not in this set.
    pub fn complement(&self) -> RangeSet {
        let mut bounds = self.bounds.clone();
        if bounds.first() == Some(&0) {
            bounds.remove(0);
        } else {
            bounds.insert(0, 0);
        }
        RangeSet { bounds }
    }

    /// Returns the union of this set and other.
    pub fn union(&self, other: &RangeSet) -> RangeSet {
        self.combine(other, |a, b| a || b)
    }

    /// Returns the intersection of this set and other.
    pub fn intersection(&self, other: &RangeSet) -> RangeSet {
        self.combine(other, |a, b| a && b)
    }

    /// Returns the values in this set but not in other.
    pub fn difference(&self, other: &RangeSet) -> RangeSet {
        self.combine(other, |a, b| a && !b)
    }

    /// Returns the values in exactly one of this set and other.
    pub fn symmetric_difference(&self, other: &RangeSet) -> RangeSet {
        self.combine(other, |a, b| a != b)
    }

    // Sweeps the boundaries of both sets in order, emitting a boundary
    // wherever the membership predicate changes value.
    fn combine<F: Fn(bool, bool) -> bool>(&self, other: &RangeSet, op: F) -> RangeSet {
        let (a, b) = (&self.bounds, &other.bounds);
        let mut bounds = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        let (mut in_a, mut in_b) = (false, false);
        let mut inside = op(false, false);
        if inside {
            bounds.push(0);
        }
        while i < a.len() || j < b.len() {
            let v = match (a.get(i), b.get(j)) {
                (Some(&x), Some(&y)) => x.min(y),
                (Some(&x), None) => x,
                (None, Some(&y)) => y,
                (None, None) => break,
            };
            if i < a.len() && a[i] == v {
                in_a = !in_a;
                i += 1;
            }
            if j < b.len() && b[j] == v {
                in_b = !in_b;
                j += 1;
            }
            let now = op(in_a, in_b);
            if now != inside {
                // A boundary at 0 cancels the one pushed for op(false, false).
                if bounds.last() == Some(&v) {
                    bounds.pop();
                } else {
                    bounds.push(v);
                }
                inside = now;
            }
        }
        RangeSet { bounds }
    }

    /// Reports whether v is in the set.
    pub fn contains_value(&self, v: u64) -> bool {
        self.bounds.partition_point(|&b| b <= v) % 2 == 1
    }

    /// Reports whether every value of `[first, last)` is in the set.
    pub fn contains_range(&self, first: u64, last: u64) -> bool {
        self.contains(&Self::from_range(first, last))
    }

    /// Reports whether every value of other is in this set.
    pub fn contains(&self, other: &RangeSet) -> bool {
        other.difference(self).is_empty()
    }

    /// Reports whether every value of this set is in other.
    pub fn is_within(&self, other: &RangeSet) -> bool {
        other.contains(self)
    }

    /// Reports whether this set and other have a value in common.
    pub fn intersects(&self, other: &RangeSet) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Reports whether this set and other have no value in common.
    pub fn is_disjoint_from(&self, other: &RangeSet) -> bool {
        !self.intersects(other)
    }

    /// Returns the number of values in the set, modulo 2^64: both the empty
    /// and the full set have cardinality 0.
    pub fn cardinality(&self) -> u64 {
        self.iter()
            .fold(0u64, |n, (first, last)| n.wrapping_add(last.wrapping_sub(first)))
    }

    /// Returns the number of disjoint ranges in the set.
    pub fn num_ranges(&self) -> usize {
        (self.bounds.len() + 1) / 2
    }

    /// Iterates over the disjoint ranges of the set in increasing order. A
    /// range ending at 2^64 is reported with an end of 0.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.bounds
            .chunks(2)
            .map(|c| (c[0], if c.len() == 2 { c[1] } else { 0 }))
    }

    /// Returns the disjoint ranges of the set in increasing order.
    pub fn ranges(&self) -> Vec<(u64, u64)> {
        self.iter().collect()
    }

    /// Coarsens the set so that every range starts and ends on a multiple
    /// of 2^n. Ranges are only ever grown, and ranges that come to overlap
    /// are merged. This maps a set of curve indexes at one level to the
    /// indexes of their ancestors (scaled back up) n/2 levels higher.
    pub fn simplify(&mut self, n: u32) {
        if n == 0 || self.is_empty() {
            return;
        }
        if n >= 64 {
            *self = Self::full();
            return;
        }
        let mask = (1u64 << n) - 1;
        let mut simplified = RangeSet::new();
        for (first, last) in self.iter() {
            let first = first & !mask;
            let last = last.wrapping_add(mask) & !mask;
            // A rounded up end of 0 means the range now reaches 2^64.
            simplified = simplified.union(&Self::from_range(first, last));
        }
        *self = simplified;
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (first, last)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", first, last)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeSet({})", self)
    }
}

impl FromIterator<u64> for RangeSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut s = RangeSet::new();
        for v in iter {
            s.insert_value(v);
        }
        s
    }
}

impl FromIterator<(u64, u64)> for RangeSet {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut s = RangeSet::new();
        for (first, last) in iter {
            s.insert(first, last);
        }
        s
    }
}

impl Not for &RangeSet {
    type Output = RangeSet;
    fn not(self) -> RangeSet {
        self.complement()
    }
}

impl Not for RangeSet {
    type Output = RangeSet;
    fn not(self) -> RangeSet {
        self.complement()
    }
}

macro_rules! range_set_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:ident) => {
        impl $trait<&RangeSet> for &RangeSet {
            type Output = RangeSet;
            fn $method(self, other: &RangeSet) -> RangeSet {
                self.$op(other)
            }
        }

        impl $trait for RangeSet {
            type Output = RangeSet;
            fn $method(self, other: RangeSet) -> RangeSet {
                self.$op(&other)
            }
        }

        impl $assign_trait<&RangeSet> for RangeSet {
            fn $assign_method(&mut self, other: &RangeSet) {
                *self = self.$op(other);
            }
        }

        impl $assign_trait for RangeSet {
            fn $assign_method(&mut self, other: RangeSet) {
                *self = self.$op(&other);
            }
        }
    };
}

range_set_op!(BitOr, bitor, BitOrAssign, bitor_assign, union);
range_set_op!(BitAnd, bitand, BitAndAssign, bitand_assign, intersection);
range_set_op!(Sub, sub, SubAssign, sub_assign, difference);
range_set_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_construction() {
        let s1 = RangeSet::from_value(1);
        let s2 = RangeSet::new();
        let s3 = RangeSet::from_range(2, 1);
        assert!(s2.is_empty());
        assert_eq!(s1, s3.complement());
        assert!(RangeSet::from_range(7, 7).is_full());
        assert_eq!(RangeSet::from_value(u64::MAX).ranges(), vec![(u64::MAX, 0)]);
    }

    #[test]
    fn test_comparison() {
        let mut s1 = RangeSet::from_value(1);
        let mut s2 = RangeSet::from_value(2);
        assert_ne!(s1, s2);
        s1.insert_value(2);
        s2.insert_value(1);
        assert_eq!(s1, s2);
        assert_eq!(s1.ranges(), vec![(1, 3)]);

        assert!(RangeSet::from_range(2, 1).contains(&RangeSet::from_range(3, 4)));
        assert!(RangeSet::from_range(2, 1).contains_range(3, 4));
        assert!(RangeSet::from_range(2, 1).contains_value(3));
        assert!(!RangeSet::from_range(2, 1).contains_value(1));
        assert!(RangeSet::from_range(2, 4).is_within(&RangeSet::from_range(1, 5)));
        assert!(!RangeSet::from_range(2, 4).is_within(&RangeSet::from_value(3)));
        assert!(RangeSet::from_range(2, 4).intersects(&RangeSet::from_range(3, 5)));
        assert!(RangeSet::from_range(2, 4).intersects(&RangeSet::from_value(3)));
        assert!(RangeSet::from_range(2, 4).is_disjoint_from(&RangeSet::from_range(6, 8)));
        assert!(RangeSet::from_range(2, 4).is_disjoint_from(&RangeSet::from_value(6)));
    }

    #[test]
    fn test_set_operators() {
        let mut a = RangeSet::from_value(1);
        let mut b = !&a;
        assert!((&a | &b).is_full());
        assert!((&a & &b).is_empty());
        assert_eq!(&a - &b, a);
        assert_eq!(&b - &a, b);
        a &= a.clone();
        b &= b.clone();
        let mut c = (&a ^ &b) - RangeSet::from_range(2, 4);
        assert_eq!(c, RangeSet::from_range(4, 2));
        c |= &b;
        assert!(c.is_full());
        c ^= c.clone();
        assert!(c.is_empty());
    }

    #[test]
    fn test_ranges() {
        let mut s = RangeSet::new();
        s.insert(0, 1);
        s.insert(2, 3);
        assert_eq!(s.ranges(), vec![(0, 1), (2, 3)]);
        let s = RangeSet::from_range(4, 2);
        assert_eq!(s.ranges(), vec![(0, 2), (4, 0)]);
        assert_eq!(s.num_ranges(), 2);
        assert_eq!(RangeSet::full().ranges(), vec![(0, 0)]);
    }

    #[test]
    fn test_insert_merges_adjacent() {
        let mut s = RangeSet::new();
        s.insert(10, 20);
        s.insert(20, 30);
        s.insert(5, 12);
        assert_eq!(s.ranges(), vec![(5, 30)]);
        s.erase(8, 9);
        assert_eq!(s.ranges(), vec![(5, 8), (9, 30)]);
        s.erase_value(29);
        assert_eq!(s.ranges(), vec![(5, 8), (9, 29)]);
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(RangeSet::new().cardinality(), 0);
        assert_eq!(RangeSet::full().cardinality(), 0);
        assert_eq!(RangeSet::from_range(1, 10).cardinality(), 9);
        assert_eq!(RangeSet::from_range(u64::MAX - 1, 2).cardinality(), 4);
    }

    #[test]
    fn test_simplify() {
        let mut s: RangeSet = vec![(1u64, 3u64), (17, 18)].into_iter().collect();
        s.simplify(2);
        assert_eq!(s.ranges(), vec![(0, 4), (16, 20)]);
        s.simplify(4);
        assert_eq!(s.ranges(), vec![(0, 32)]);

        let mut s = RangeSet::from_range(u64::MAX - 3, u64::MAX);
        s.simplify(8);
        assert_eq!(s.ranges(), vec![(u64::MAX - 255, 0)]);

        let mut s = RangeSet::from_value(3);
        s.simplify(64);
        assert!(s.is_full());
    }

    #[test]
    fn test_display() {
        let s = RangeSet::from_range(1, 10);
        assert_eq!(s.to_string(), "[(1, 10)]");
        assert_eq!(format!("{:?}", s), "RangeSet([(1, 10)])");
        let s: RangeSet = vec![2u64, 3, 5, 7, 11, 13, 17, 19].into_iter().collect();
        assert_eq!(
            s.to_string(),
            "[(2, 4), (5, 6), (7, 8), (11, 12), (13, 14), (17, 18), (19, 20)]"
        );
    }

    // Reference membership over a small window of values.
    fn model(ranges: &[(u64, u64)]) -> Vec<bool> {
        let mut m = vec![false; 64];
        for &(a, b) in ranges {
            for v in a..b {
                m[v as usize] = true;
            }
        }
        m
    }

    fn build(ranges: &[(u64, u64)]) -> RangeSet {
        let mut s = RangeSet::new();
        for &(a, b) in ranges {
            if a < b {
                s.insert(a, b);
            }
        }
        s
    }

    fn arb_ranges() -> impl Strategy<Value = Vec<(u64, u64)>> {
        prop::collection::vec((0u64..64, 0u64..64), 0..8)
            .prop_map(|v| v.into_iter().filter(|(a, b)| a < b).collect())
    }

    proptest! {
        #[test]
        fn prop_set_algebra_matches_model(ra in arb_ranges(), rb in arb_ranges()) {
            let (a, b) = (build(&ra), build(&rb));
            let (ma, mb) = (model(&ra), model(&rb));
            let union = &a | &b;
            let inter = &a & &b;
            let diff = &a - &b;
            let xor = &a ^ &b;
            for v in 0..64u64 {
                let (x, y) = (ma[v as usize], mb[v as usize]);
                prop_assert_eq!(a.contains_value(v), x);
                prop_assert_eq!(union.contains_value(v), x || y);
                prop_assert_eq!(inter.contains_value(v), x && y);
                prop_assert_eq!(diff.contains_value(v), x && !y);
                prop_assert_eq!(xor.contains_value(v), x != y);
                prop_assert_eq!(a.complement().contains_value(v), !x);
            }
            prop_assert!(a.complement().contains_value(u64::MAX));
            prop_assert_eq!(a.complement().complement(), a.clone());
            prop_assert_eq!(a.intersects(&b), !inter.is_empty());
            prop_assert!(a.contains(&inter));
        }
    }
}
