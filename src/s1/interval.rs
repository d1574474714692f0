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

use std::f64::consts::PI;
use std::fmt;

use crate::consts::DBL_EPSILON;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval represents a closed interval on a unit circle (also known as a
/// 1-dimensional sphere). It is capable of representing the empty interval
/// (containing no points), the full interval (containing all points), and
/// zero-length intervals (containing a single point).
///
/// Points are represented by the angle they make with the positive x-axis in
/// the range [-π, π]. An interval is represented by its lower and upper
/// bounds (both inclusive, since the interval is closed). The lower bound
/// may be greater than the upper bound, in which case the interval is
/// "inverted" (i.e. it passes through the point (-1, 0)).
///
/// The point (-1, 0) has two valid representations, π and -π. The normalized
/// representation of this point is π, so that endpoints of normal intervals
/// are in the range (-π, π]. We normalize the latter to the former in
/// from_endpoints. The empty and full intervals are the exception: they
/// are [π, -π] and [-π, π] respectively.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// EMPTY is the canonical empty interval.
pub const EMPTY: Interval = Interval { lo: PI, hi: -PI };

/// FULL is the interval containing every point of the circle.
pub const FULL: Interval = Interval { lo: -PI, hi: PI };

impl Interval {
    /// Returns a new interval with the given endpoints, which are reduced to
    /// (-π, π] first. If both endpoints reduce to the same value the result
    /// is a single point. Use [`FULL`] for the full interval.
    pub fn from_endpoints(lo: f64, hi: f64) -> Self {
        let mut i = Interval {
            lo: reduce(lo),
            hi: reduce(hi),
        };
        if i.lo == -PI && i.hi != PI {
            i.lo = PI;
        }
        if i.hi == -PI && i.lo != -PI {
            i.hi = PI;
        }
        i
    }

    /// Returns the minimal interval containing the two given points, both of
    /// which must be in [-π, π].
    pub fn from_point_pair(mut a: f64, mut b: f64) -> Self {
        if a == -PI {
            a = PI;
        }
        if b == -PI {
            b = PI;
        }
        if positive_distance(a, b) <= PI {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    /// Reports whether the interval is empty.
    pub fn is_empty(&self) -> bool {
        self.lo == PI && self.hi == -PI
    }

    /// Reports whether the interval is full.
    pub fn is_full(&self) -> bool {
        self.lo == -PI && self.hi == PI
    }

    /// Reports whether the interval is inverted; that is, whether lo > hi.
    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }

    /// Returns the midpoint of the interval. It is undefined for full and
    /// empty intervals.
    pub fn center(&self) -> f64 {
        let c = 0.5 * (self.lo + self.hi);
        if !self.is_inverted() {
            return c;
        }
        if c <= 0.0 {
            c + PI
        } else {
            c - PI
        }
    }

    /// Returns the length of the interval. The length of an empty interval
    /// is negative.
    pub fn length(&self) -> f64 {
        let mut l = self.hi - self.lo;
        if l >= 0.0 {
            return l;
        }
        l += 2.0 * PI;
        if l > 0.0 {
            return l;
        }
        -1.0
    }

    /// Reports whether the interval contains the point p, which must be in
    /// [-π, π].
    pub fn contains(&self, mut p: f64) -> bool {
        if p == -PI {
            p = PI;
        }
        self.fast_contains(p)
    }

    // Like contains, but p must already be normalized (not -π).
    fn fast_contains(&self, p: f64) -> bool {
        if self.is_inverted() {
            (p >= self.lo || p <= self.hi) && !self.is_empty()
        } else {
            p >= self.lo && p <= self.hi
        }
    }

    /// Reports whether the interval contains oi.
    pub fn contains_interval(&self, oi: &Interval) -> bool {
        if self.is_inverted() {
            if oi.is_inverted() {
                return oi.lo >= self.lo && oi.hi <= self.hi;
            }
            return (oi.lo >= self.lo || oi.hi <= self.hi) && !self.is_empty();
        }
        if oi.is_inverted() {
            return self.is_full() || oi.is_empty();
        }
        oi.lo >= self.lo && oi.hi <= self.hi
    }

    /// Reports whether the interval contains any points in common with oi.
    pub fn intersects(&self, oi: &Interval) -> bool {
        if self.is_empty() || oi.is_empty() {
            return false;
        }
        if self.is_inverted() {
            return oi.is_inverted() || oi.lo <= self.hi || oi.hi >= self.lo;
        }
        if oi.is_inverted() {
            return oi.lo <= self.hi || oi.hi >= self.lo;
        }
        oi.lo <= self.hi && oi.hi >= self.lo
    }

    /// Returns the interval expanded by the minimum amount necessary such
    /// that it contains the given point p (an angle in the range [-π, π]).
    pub fn add_point(&self, mut p: f64) -> Self {
        if p.abs() > PI {
            return *self;
        }
        if p == -PI {
            p = PI;
        }
        if self.fast_contains(p) {
            return *self;
        }
        if self.is_empty() {
            return Interval { lo: p, hi: p };
        }
        if positive_distance(p, self.lo) < positive_distance(self.hi, p) {
            Interval { lo: p, hi: self.hi }
        } else {
            Interval { lo: self.lo, hi: p }
        }
    }

    /// Returns an interval that has been expanded on each side by margin.
    /// If margin is negative, then the function shrinks the interval on
    /// each side by margin instead. The resulting interval may be empty or
    /// full. Any expansion (positive or negative) of a full interval remains
    /// full, and any expansion of an empty interval remains empty.
    pub fn expanded(&self, margin: f64) -> Self {
        if margin >= 0.0 {
            if self.is_empty() {
                return *self;
            }
            // Check whether this interval will be full after expansion,
            // allowing for a rounding error when computing each endpoint.
            if self.length() + 2.0 * margin + 2.0 * DBL_EPSILON >= 2.0 * PI {
                return FULL;
            }
        } else {
            if self.is_full() {
                return *self;
            }
            // Check whether this interval will be empty after expansion,
            // allowing for a rounding error when computing each endpoint.
            if self.length() + 2.0 * margin - 2.0 * DBL_EPSILON <= 0.0 {
                return EMPTY;
            }
        }
        let mut result = Interval {
            lo: reduce(self.lo - margin),
            hi: reduce(self.hi + margin),
        };
        if result.lo <= -PI {
            result.lo = PI;
        }
        result
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

// Reduces an angle to [-π, π].
fn reduce(a: f64) -> f64 {
    libm::remainder(a, 2.0 * PI)
}

/// Returns the distance from a to b in the range [0, 2π). This is
/// equivalent to remainder(b - a - π, 2π) + π, except that it is more
/// numerically stable (it does not lose precision for very small positive
/// distances).
pub fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0.0 {
        return d;
    }
    // We want to ensure that if b == π and a == (-π + eps),
    // the return result is approximately 2*π and not zero.
    (b + PI) - (a - PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_empty_and_full() {
        assert!(EMPTY.is_empty());
        assert!(!EMPTY.is_full());
        assert!(FULL.is_full());
        assert!(!FULL.is_empty());
        assert!(FULL.contains(0.0));
        assert!(FULL.contains(-PI));
        assert!(!EMPTY.contains(0.0));
        assert!(EMPTY.length() < 0.0);
        assert_eq!(FULL.length(), 2.0 * PI);
    }

    #[test]
    fn test_inverted() {
        // The interval from 3π/4 through π to -3π/4.
        let i = Interval::from_point_pair(0.75 * PI, -0.75 * PI);
        assert!(i.is_inverted());
        assert!(i.contains(PI));
        assert!(i.contains(-PI));
        assert!(!i.contains(0.0));
        assert!((i.length() - 0.5 * PI).abs() < 1e-15);
        assert!((i.center() - PI).abs() < 1e-15);
    }

    #[test]
    fn test_contains_interval() {
        let quad1 = Interval::from_endpoints(0.0, FRAC_PI_2);
        let quad12 = Interval::from_endpoints(0.0, PI);
        let quad23 = Interval::from_endpoints(FRAC_PI_2, -FRAC_PI_2);
        assert!(quad12.contains_interval(&quad1));
        assert!(!quad1.contains_interval(&quad12));
        assert!(FULL.contains_interval(&quad23));
        assert!(!quad12.contains_interval(&quad23));
        assert!(quad23.contains_interval(&Interval::from_endpoints(PI, PI)));
        assert!(quad12.intersects(&quad23));
        assert!(!quad1.intersects(&Interval::from_endpoints(-FRAC_PI_2, -0.1)));
        assert!(!quad1.intersects(&EMPTY));
    }

    #[test]
    fn test_add_point() {
        let mut i = EMPTY;
        i = i.add_point(0.0);
        assert_eq!(i, Interval { lo: 0.0, hi: 0.0 });
        i = i.add_point(0.5);
        assert_eq!(i, Interval { lo: 0.0, hi: 0.5 });
        i = i.add_point(-0.5);
        assert_eq!(i, Interval { lo: -0.5, hi: 0.5 });
        let j = Interval { lo: 3.0, hi: 3.0 }.add_point(-3.0);
        assert!(j.is_inverted());
        assert!(j.contains(PI));
    }

    #[test]
    fn test_expanded() {
        let i = Interval::from_endpoints(-0.5, 0.5);
        let e = i.expanded(0.25);
        assert!((e.lo + 0.75).abs() < 1e-15 && (e.hi - 0.75).abs() < 1e-15);
        assert!(i.expanded(PI).is_full());
        assert!(i.expanded(-0.6).is_empty());
        assert!(EMPTY.expanded(1.0).is_empty());
        let w = Interval::from_endpoints(3.0, -3.0).expanded(0.1);
        assert!(w.is_inverted());
        assert!(w.contains(2.95) && w.contains(-2.95));
    }
}
