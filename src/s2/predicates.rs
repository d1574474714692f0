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

//! Orientation predicates.
//!
//! These answer the question "which side of the plane through the origin
//! and two points does a third point lie on?" exactly. A fast floating
//! point determinant is tried first; when its magnitude is below the
//! rounding error bound the answer is recomputed with exact arithmetic.

use std::cmp::Ordering;
use std::ops::Neg;

use crate::consts::DBL_EPSILON;
use crate::r3::precisevector::{self, PreciseVector};
use crate::s2::point::Point;

/// Direction is the orientation of a triangle of points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Clockwise,
    Indeterminate,
    CounterClockwise,
}

impl Neg for Direction {
    type Output = Direction;
    fn neg(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::Indeterminate => Direction::Indeterminate,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl From<Ordering> for Direction {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Less => Direction::Clockwise,
            Ordering::Equal => Direction::Indeterminate,
            Ordering::Greater => Direction::CounterClockwise,
        }
    }
}

/// Maximum error of a·(b×c) for unit-length inputs. The cross product
/// contributes at most (1 + 2/√3)ε per component and the dot product a
/// further 3ε relative; 4ε covers both with a margin.
const MAX_DETERMINANT_ERROR: f64 = 4.0 * DBL_EPSILON;

/// Returns the orientation of the triangle (a, b, c): CounterClockwise
/// when c lies to the left of the directed great circle a→b, Clockwise
/// when it lies to the right and Indeterminate only when the three points
/// are exactly coplanar with the origin.
///
/// The result is exact, and so satisfies:
///
///  (1) orientation(a,b,c) == orientation(b,c,a) == orientation(c,a,b)
///  (2) orientation(c,b,a) == -orientation(a,b,c)
///  (3) orientation(a,b,a) == Indeterminate
pub fn orientation(a: &Point, b: &Point, c: &Point) -> Direction {
    let d = triage_sign(a, b, c);
    if d != Direction::Indeterminate {
        return d;
    }
    exact_sign(a, b, c)
}

/// Returns the orientation of (a, b, c) if the floating point determinant
/// is decisive, and Indeterminate otherwise.
pub fn triage_sign(a: &Point, b: &Point, c: &Point) -> Direction {
    let det = a.0.dot(&b.0.cross(&c.0));
    if det > MAX_DETERMINANT_ERROR {
        Direction::CounterClockwise
    } else if det < -MAX_DETERMINANT_ERROR {
        Direction::Clockwise
    } else {
        Direction::Indeterminate
    }
}

/// Returns the exact orientation of (a, b, c) computed with arbitrary
/// precision arithmetic.
pub fn exact_sign(a: &Point, b: &Point, c: &Point) -> Direction {
    let pa = PreciseVector::from(a.0);
    let pb = PreciseVector::from(b.0);
    let pc = PreciseVector::from(c.0);
    precisevector::sign(&pa.dot(&pb.cross(&pc))).into()
}
