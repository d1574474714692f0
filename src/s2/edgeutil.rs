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

//! Utilities for great circle edges: crossing tests, point to edge
//! distances and coordinate extrema along an edge.

use crate::r1;
use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Rad};
use crate::s2::point::Point;
use crate::s2::predicates::{orientation, Direction};

/// Reports whether the edge AB crosses the edge CD at a point that is
/// interior to both edges. Edges that share a vertex, or where a vertex of
/// one edge lies exactly on the other, do not cross.
///
/// Properties of crossing_sign:
///
///  (1) crossing_sign(b,a,c,d) == crossing_sign(a,b,c,d)
///  (2) crossing_sign(c,d,a,b) == crossing_sign(a,b,c,d)
pub fn crossing_sign(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    // For there to be a crossing the triangles ACB, CBD, BDA and DAC must
    // all have the same nonzero orientation.
    let acb = -orientation(a, b, c);
    let bda = orientation(a, b, d);
    if bda == Direction::Indeterminate || acb != bda {
        return false;
    }
    let cbd = -orientation(c, d, b);
    if cbd != acb {
        return false;
    }
    orientation(c, d, a) == acb
}

// Reports whether x lies in the lune bounded by the planes through the
// edge normal n and each of a and b, i.e. whether the closest point to x
// on the great circle through a and b falls inside the edge.
fn in_lune(x: &Vector, a: &Vector, b: &Vector, n: &Vector) -> bool {
    x.dot(&n.cross(a)) > 0.0 && x.dot(&b.cross(n)) > 0.0
}

/// Returns the angular distance from x to the edge AB.
pub fn distance_from_edge(x: &Point, a: &Point, b: &Point) -> Angle {
    let n = a.0.cross(&b.0);
    let n2 = n.norm2();
    if n2 > 0.0 && in_lune(&x.0, &a.0, &b.0, &n) {
        let s = (x.0.dot(&n) / n2.sqrt()).abs().min(1.0);
        return Rad(s.asin()).into();
    }
    x.distance(a).min(x.distance(b))
}

/// Returns the range of p·axis over all points p on the edge AB. The axis
/// must be of unit length.
pub fn edge_axis_interval(a: &Point, b: &Point, axis: &Vector) -> r1::interval::Interval {
    let mut i = r1::interval::Interval::from_point_pair(a.0.dot(axis), b.0.dot(axis));
    let n = a.0.cross(&b.0);
    if n.norm2() == 0.0 {
        return i;
    }
    // The point of the great circle closest to the axis.
    let v = (*axis * n.norm2() - n * n.dot(axis)).normalize();
    if v.norm2() == 0.0 {
        return i;
    }
    if in_lune(&v, &a.0, &b.0, &n) {
        i = i.add_point(v.dot(axis).min(1.0));
    }
    if in_lune(&-v, &a.0, &b.0, &n) {
        i = i.add_point((-v).dot(axis).max(-1.0));
    }
    i
}
