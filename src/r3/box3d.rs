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

use crate::r1;
use crate::r3::vector::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Box3d is an axis-aligned box in ℝ³, the cartesian product of three
/// closed intervals. A box is empty if any of its intervals is empty.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Box3d {
    pub x: r1::interval::Interval,
    pub y: r1::interval::Interval,
    pub z: r1::interval::Interval,
}

impl Box3d {
    pub fn new(
        x: r1::interval::Interval,
        y: r1::interval::Interval,
        z: r1::interval::Interval,
    ) -> Self {
        Box3d { x, y, z }
    }

    /// Returns the empty box.
    pub fn empty() -> Self {
        Box3d {
            x: r1::interval::EMPTY,
            y: r1::interval::EMPTY,
            z: r1::interval::EMPTY,
        }
    }

    /// Returns the box [-1, 1]³, which contains the whole unit sphere.
    pub fn around_unit_sphere() -> Self {
        let i = r1::interval::Interval::new(-1.0, 1.0);
        Box3d { x: i, y: i, z: i }
    }

    /// Returns the box containing the single point v.
    pub fn from_point(v: &Vector) -> Self {
        Box3d {
            x: r1::interval::Interval::from_point(v.x),
            y: r1::interval::Interval::from_point(v.y),
            z: r1::interval::Interval::from_point(v.z),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Reports whether the box contains the point v.
    pub fn contains(&self, v: &Vector) -> bool {
        self.x.contains(v.x) && self.y.contains(v.y) && self.z.contains(v.z)
    }

    /// Reports whether the box contains other.
    pub fn contains_box(&self, other: &Box3d) -> bool {
        other.is_empty()
            || (self.x.contains_interval(&other.x)
                && self.y.contains_interval(&other.y)
                && self.z.contains_interval(&other.z))
    }

    /// Reports whether the box and other have any points in common.
    pub fn intersects(&self, other: &Box3d) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y) && self.z.intersects(&other.z)
    }

    /// Returns the box expanded to contain v.
    pub fn add_point(&self, v: &Vector) -> Self {
        Box3d {
            x: self.x.add_point(v.x),
            y: self.y.add_point(v.y),
            z: self.z.add_point(v.z),
        }
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &Box3d) -> Self {
        Box3d {
            x: self.x.union(&other.x),
            y: self.y.union(&other.y),
            z: self.z.union(&other.z),
        }
    }

    /// Returns the box widened by margin on every side, then clamped to
    /// [-1, 1] on every axis.
    pub fn dilated_by(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Box3d {
            x: self.x.expanded(margin).clamped(-1.0, 1.0),
            y: self.y.expanded(margin).clamped(-1.0, 1.0),
            z: self.z.expanded(margin).clamped(-1.0, 1.0),
        }
    }
}

impl Default for Box3d {
    fn default() -> Self {
        Box3d::empty()
    }
}

impl fmt::Display for Box3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} x {} x {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_points() {
        let b = Box3d::empty();
        assert!(b.is_empty());
        let v = Vector::new(0.5, -0.5, 0.25);
        let b = b.add_point(&v);
        assert!(!b.is_empty());
        assert!(b.contains(&v));
        assert_eq!(b, Box3d::from_point(&v));
        assert!(!b.contains(&Vector::new(0.5, -0.5, 0.3)));
    }

    #[test]
    fn test_contains_box_and_intersects() {
        let all = Box3d::around_unit_sphere();
        let small = Box3d::from_point(&Vector::new(0.0, 0.0, 1.0))
            .add_point(&Vector::new(0.1, 0.1, 0.9));
        assert!(all.contains_box(&small));
        assert!(!small.contains_box(&all));
        assert!(all.contains_box(&Box3d::empty()));
        assert!(all.intersects(&small));
        let far = Box3d::from_point(&Vector::new(0.5, 0.5, 0.0));
        assert!(!small.intersects(&far));
        assert!(!small.intersects(&Box3d::empty()));
    }

    #[test]
    fn test_dilated_by() {
        let b = Box3d::from_point(&Vector::new(1.0, 0.0, 0.0)).dilated_by(0.5);
        assert_eq!(b.x, r1::interval::Interval::new(0.5, 1.0));
        assert_eq!(b.y, r1::interval::Interval::new(-0.5, 0.5));
        assert!(Box3d::empty().dilated_by(1.0).is_empty());
    }
}
