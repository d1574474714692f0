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
use std::ops::{Add, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle represents a 1D angle, stored in radians.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle(f64);

/// Rad is an angle expressed in radians.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Rad(pub f64);

/// Deg is an angle expressed in degrees.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Deg(pub f64);

impl Angle {
    /// Returns the angle in radians.
    pub fn rad(&self) -> f64 {
        self.0
    }

    /// Returns the angle in degrees.
    pub fn deg(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Returns the absolute value of the angle.
    pub fn abs(&self) -> Self {
        Angle(self.0.abs())
    }

    /// Returns an equivalent angle in (-π, π].
    pub fn normalized(&self) -> Self {
        let mut rad = libm::remainder(self.0, 2.0 * PI);
        if rad <= -PI {
            rad = PI;
        }
        Angle(rad)
    }

    /// Reports whether the angle is finite.
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl From<Rad> for Angle {
    fn from(r: Rad) -> Self {
        Angle(r.0)
    }
}

impl From<Deg> for Angle {
    fn from(d: Deg) -> Self {
        Angle(d.0.to_radians())
    }
}

impl From<Angle> for Rad {
    fn from(a: Angle) -> Self {
        Rad(a.0)
    }
}

impl From<Angle> for Deg {
    fn from(a: Angle) -> Self {
        Deg(a.deg())
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Angle {
        Angle(self.0 + other.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, other: Angle) -> Angle {
        Angle(self.0 - other.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, m: f64) -> Angle {
        Angle(self.0 * m)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7}", self.deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{f64_eq, f64_near};

    #[test]
    fn test_conversions() {
        let a: Angle = Deg(180.0).into();
        assert!(f64_eq(a.rad(), PI));
        let b: Angle = Rad(PI / 2.0).into();
        assert!(f64_near(b.deg(), 90.0, 1e-12));
        assert!(f64_near(Deg::from(b).0, 90.0, 1e-12));
    }

    #[test]
    fn test_normalized() {
        assert!(f64_eq(Angle::from(Rad(3.0 * PI)).normalized().rad(), PI));
        assert!(f64_eq(Angle::from(Rad(-PI)).normalized().rad(), PI));
        assert!(f64_eq(Angle::from(Deg(-90.0)).normalized().rad(), -PI / 2.0));
        assert!(f64_eq(Angle::from(Deg(450.0)).normalized().rad(), PI / 2.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Angle::from(Rad(1.0));
        let b = Angle::from(Rad(0.25));
        assert_eq!((a + b).rad(), 1.25);
        assert_eq!((a - b).rad(), 0.75);
        assert_eq!((a * 2.0).rad(), 2.0);
        assert_eq!((-a).rad(), -1.0);
        assert_eq!(a.max(b), a);
        assert_eq!(a.min(b), b);
    }
}
