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
use std::ops::{Add, Mul, Neg, Sub};

use crate::consts::EPSILON;
use crate::s1::angle::{Angle, Rad};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vector represents a point in ℝ³.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// Reports whether v and other are equal within a small epsilon.
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }

    /// Returns the vector's norm.
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Returns the square of the norm.
    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    /// Returns a unit vector in the same direction as v. The zero vector is
    /// returned unchanged.
    pub fn normalize(&self) -> Self {
        let n2 = self.norm2();
        if n2 == 0.0 {
            return Vector::default();
        }
        *self * (1.0 / n2.sqrt())
    }

    /// Reports whether this vector is of approximately unit length.
    pub fn is_unit(&self) -> bool {
        const EPS: f64 = 5e-14;
        (self.norm2() - 1.0).abs() <= EPS
    }

    /// Returns the vector with nonnegative components.
    pub fn abs(&self) -> Self {
        Vector {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// Returns the standard dot product of v and other.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the standard cross product of v and other.
    pub fn cross(&self, other: &Self) -> Self {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Returns the Euclidean distance between v and other.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// Returns the angle between v and other.
    pub fn angle(&self, other: &Self) -> Angle {
        Angle::from(Rad(self.cross(other).norm().atan2(self.dot(other))))
    }

    /// Returns the index of the largest component by absolute value.
    pub fn largest_component(&self) -> usize {
        let t = self.abs();
        if t.x > t.y {
            if t.x > t.z {
                0
            } else {
                2
            }
        } else if t.y > t.z {
            1
        } else {
            2
        }
    }

    /// Returns a unit vector that is orthogonal to v.
    /// ortho(-v) = -ortho(v) for all v.
    pub fn ortho(&self) -> Self {
        let mut ov = Vector::new(0.012, 0.0053, 0.00457);
        match self.largest_component() {
            0 => ov.z = 1.0,
            1 => ov.x = 1.0,
            _ => ov.y = 1.0,
        }
        self.cross(&ov).normalize()
    }

    /// Returns the components as an array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, m: f64) -> Vector {
        Vector {
            x: self.x * m,
            y: self.y * m,
            z: self.z * m,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.24}, {:.24}, {:.24})", self.x, self.y, self.z)
    }
}
