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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval represents a closed interval on ℝ.
/// Zero-length intervals (where lo == hi) represent single points.
/// If lo > hi then the interval is empty.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// EMPTY is the canonical empty interval.
pub const EMPTY: Interval = Interval { lo: 1.0, hi: 0.0 };

impl Interval {
    /// Returns a new interval with the given endpoints.
    pub fn new(lo: f64, hi: f64) -> Self {
        Interval { lo, hi }
    }

    /// Returns the empty interval.
    pub fn empty() -> Self {
        EMPTY
    }

    /// Returns an interval containing only the given point.
    pub fn from_point(p: f64) -> Self {
        Interval { lo: p, hi: p }
    }

    /// Returns the minimal interval containing both points.
    pub fn from_point_pair(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    /// Reports whether the interval is empty.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Returns the midpoint of the interval. It is undefined for empty
    /// intervals.
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// Returns the length of the interval, negative if it is empty.
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }

    /// Reports whether the interval contains p.
    pub fn contains(&self, p: f64) -> bool {
        self.lo <= p && p <= self.hi
    }

    /// Reports whether the interval contains oi.
    pub fn contains_interval(&self, oi: &Interval) -> bool {
        if oi.is_empty() {
            return true;
        }
        self.lo <= oi.lo && oi.hi <= self.hi
    }

    /// Reports whether the interval contains any points in common with oi.
    pub fn intersects(&self, oi: &Interval) -> bool {
        if self.lo <= oi.lo {
            oi.lo <= self.hi && oi.lo <= oi.hi
        } else {
            self.lo <= oi.hi && self.lo <= self.hi
        }
    }

    /// Returns the interval expanded so that it contains the given point.
    pub fn add_point(&self, p: f64) -> Self {
        if self.is_empty() {
            return Interval::from_point(p);
        }
        Interval {
            lo: self.lo.min(p),
            hi: self.hi.max(p),
        }
    }

    /// Returns the smallest interval that contains this interval and oi.
    pub fn union(&self, oi: &Interval) -> Self {
        if self.is_empty() {
            return *oi;
        }
        if oi.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo.min(oi.lo),
            hi: self.hi.max(oi.hi),
        }
    }

    /// Returns the interval containing all points common to both intervals.
    pub fn intersection(&self, oi: &Interval) -> Self {
        Interval {
            lo: self.lo.max(oi.lo),
            hi: self.hi.min(oi.hi),
        }
    }

    /// Returns an interval that has been expanded on each side by margin.
    /// If margin is negative, then the function shrinks the interval on
    /// each side by margin instead. The resulting interval may be empty.
    /// Any expansion of an empty interval remains empty.
    pub fn expanded(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo - margin,
            hi: self.hi + margin,
        }
    }

    /// Returns the interval clamped to `[lo, hi]`.
    pub fn clamped(&self, lo: f64, hi: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo.max(lo),
            hi: self.hi.min(hi),
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        EMPTY
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Interval::empty().is_empty());
        assert!(!Interval::from_point(1.0).is_empty());
        assert!(Interval::empty().add_point(2.0).contains(2.0));
        assert_eq!(Interval::default(), EMPTY);
    }

    #[test]
    fn test_contains_and_intersects() {
        let unit = Interval::new(0.0, 1.0);
        let half = Interval::new(0.5, 1.0);
        let disjoint = Interval::new(1.5, 2.0);
        assert!(unit.contains(0.0));
        assert!(unit.contains(1.0));
        assert!(!unit.contains(1.1));
        assert!(unit.contains_interval(&half));
        assert!(!half.contains_interval(&unit));
        assert!(unit.contains_interval(&EMPTY));
        assert!(unit.intersects(&half));
        assert!(!unit.intersects(&disjoint));
        assert!(!unit.intersects(&EMPTY));
        assert!(unit.intersection(&disjoint).is_empty());
    }

    #[test]
    fn test_union_and_expanded() {
        let a = Interval::new(0.0, 1.0);
        let b = Interval::new(3.0, 4.0);
        assert_eq!(a.union(&b), Interval::new(0.0, 4.0));
        assert_eq!(a.union(&EMPTY), a);
        assert_eq!(a.expanded(0.5), Interval::new(-0.5, 1.5));
        assert!(a.expanded(-0.6).is_empty());
        assert!(EMPTY.expanded(1.0).is_empty());
        assert_eq!(Interval::new(-2.0, 2.0).clamped(-1.0, 1.0), Interval::new(-1.0, 1.0));
        assert_eq!(Interval::from_point_pair(2.0, -1.0), Interval::new(-1.0, 2.0));
    }
}
