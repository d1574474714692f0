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

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use crate::r3::vector::Vector;
use crate::s1::angle::Angle;
use crate::s2::latlng::LatLng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point represents a point on the unit sphere as a normalized 3D vector.
/// Fields should be treated as read-only. Use one of the constructors
/// below to build points that are guaranteed to be of unit length.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub Vector);

impl Point {
    /// Creates a new normalized point from coordinates.
    ///
    /// This always returns a valid point. If the given coordinates can not
    /// be normalized the origin point will be returned.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        if x == 0.0 && y == 0.0 && z == 0.0 {
            return Point::origin();
        }
        Point(Vector::new(x, y, z).normalize())
    }

    /// Returns a unique "origin" on the sphere for operations that need a
    /// fixed reference point. In particular, this is the "point at
    /// infinity" used for point-in-polygon testing.
    ///
    /// It should *not* be a point that is commonly used in edge tests in
    /// order to avoid triggering code to handle degenerate cases.
    pub fn origin() -> Self {
        Point(Vector::new(
            -0.0099994664350250197,
            0.0025924542609324121,
            0.99994664350250195,
        ))
    }

    /// Returns the angle between the two points.
    pub fn distance(&self, other: &Point) -> Angle {
        self.0.angle(&other.0)
    }

    /// Reports whether the two points are equal within a small epsilon.
    pub fn approx_eq(&self, other: &Point) -> bool {
        self.0.approx_eq(&other.0)
    }

    /// Returns the dot product of the two underlying vectors.
    pub fn dot(&self, other: &Point) -> f64 {
        self.0.dot(&other.0)
    }

    /// Returns the (non-normalized) cross product of the two points.
    pub fn cross(&self, other: &Point) -> Vector {
        self.0.cross(&other.0)
    }

    /// Reports whether this point is of approximately unit length.
    pub fn is_unit(&self) -> bool {
        self.0.is_unit()
    }

    /// Returns a total order on points, comparing x, then y, then z.
    pub fn total_cmp(&self, other: &Point) -> Ordering {
        self.0
            .x
            .total_cmp(&other.0.x)
            .then_with(|| self.0.y.total_cmp(&other.0.y))
            .then_with(|| self.0.z.total_cmp(&other.0.z))
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point(-self.0)
    }
}

impl From<LatLng> for Point {
    fn from(ll: LatLng) -> Self {
        ll.to_point()
    }
}

impl From<&LatLng> for Point {
    fn from(ll: &LatLng) -> Self {
        ll.to_point()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_from_coords() {
        let p = Point::from_coords(3.0, 0.0, 4.0);
        assert!(p.is_unit());
        assert!(p.approx_eq(&Point(Vector::new(0.6, 0.0, 0.8))));
        assert_eq!(Point::from_coords(0.0, 0.0, 0.0), Point::origin());
        assert!(Point::origin().is_unit());
    }

    #[test]
    fn test_distance() {
        let x = Point::from_coords(1.0, 0.0, 0.0);
        let y = Point::from_coords(0.0, 1.0, 0.0);
        assert!(f64_eq(x.distance(&y).rad(), PI / 2.0));
        assert!(f64_eq(x.distance(&-x).rad(), PI));
        assert_eq!(x.distance(&x).rad(), 0.0);
    }

    #[test]
    fn test_total_cmp() {
        let a = Point::from_coords(0.0, 1.0, 0.0);
        let b = Point::from_coords(1.0, 0.0, 0.0);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert_eq!(a.total_cmp(&a), Ordering::Equal);
    }
}
