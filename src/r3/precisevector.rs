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

use bigdecimal::BigDecimal;

use crate::r3::vector::Vector;

/// PreciseVector represents a point in ℝ³ using exact arithmetic.
///
/// A vector converted from f64 components is scaled by a positive power of
/// two so that every component becomes an integer. The scaling changes the
/// magnitude but never the direction, which is all the orientation
/// predicates need: the sign of a dot or triple product is unaffected.
#[derive(Clone, PartialEq, Debug)]
pub struct PreciseVector {
    pub x: BigDecimal,
    pub y: BigDecimal,
    pub z: BigDecimal,
}

impl From<Vector> for PreciseVector {
    fn from(v: Vector) -> Self {
        let parts = [decompose(v.x), decompose(v.y), decompose(v.z)];
        let emin = parts
            .iter()
            .filter(|(m, _)| *m != 0)
            .map(|(_, e)| *e)
            .min()
            .unwrap_or(0);
        let scaled = |(m, e): (i64, i32)| {
            if m == 0 {
                BigDecimal::from(0)
            } else {
                BigDecimal::from(m) * pow2((e - emin) as u32)
            }
        };
        PreciseVector {
            x: scaled(parts[0]),
            y: scaled(parts[1]),
            z: scaled(parts[2]),
        }
    }
}

impl PreciseVector {
    /// Returns the standard dot product of v and other.
    pub fn dot(&self, other: &Self) -> BigDecimal {
        &self.x * &other.x + &self.y * &other.y + &self.z * &other.z
    }

    /// Returns the standard cross product of v and other.
    pub fn cross(&self, other: &Self) -> Self {
        PreciseVector {
            x: &self.y * &other.z - &self.z * &other.y,
            y: &self.z * &other.x - &self.x * &other.z,
            z: &self.x * &other.y - &self.y * &other.x,
        }
    }

    /// Reports whether all components are exactly zero.
    pub fn is_zero(&self) -> bool {
        let zero = BigDecimal::from(0);
        self.x == zero && self.y == zero && self.z == zero
    }
}

/// Returns the sign of the given value as an Ordering relative to zero.
pub fn sign(v: &BigDecimal) -> Ordering {
    let zero = BigDecimal::from(0);
    if *v > zero {
        Ordering::Greater
    } else if *v < zero {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

// Splits a finite f64 into an integer mantissa and a binary exponent such
// that x == m * 2^e exactly.
fn decompose(x: f64) -> (i64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (0, 0);
    }
    let bits = x.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let frac = (bits & ((1u64 << 52) - 1)) as i64;
    let (mut m, mut e) = if exp_bits == 0 {
        (frac, -1074)
    } else {
        (frac | (1i64 << 52), exp_bits - 1075)
    };
    let tz = m.trailing_zeros();
    m >>= tz;
    e += tz as i32;
    if x < 0.0 {
        (-m, e)
    } else {
        (m, e)
    }
}

// Returns 2^n by repeated squaring.
fn pow2(mut n: u32) -> BigDecimal {
    let mut result = BigDecimal::from(1);
    let mut base = BigDecimal::from(2);
    while n > 0 {
        if n & 1 == 1 {
            result = result * base.clone();
        }
        n >>= 1;
        if n > 0 {
            base = base.clone() * base;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose() {
        assert_eq!(decompose(0.0), (0, 0));
        assert_eq!(decompose(1.0), (1, 0));
        assert_eq!(decompose(-0.75), (-3, -2));
        assert_eq!(decompose(6.0), (3, 1));
        assert_eq!(decompose(f64::MIN_POSITIVE / 4.0), (1, -1024));
    }

    #[test]
    fn test_pow2() {
        assert_eq!(pow2(0), BigDecimal::from(1));
        assert_eq!(pow2(10), BigDecimal::from(1024));
        assert_eq!(pow2(40), BigDecimal::from(1i64 << 40));
    }

    #[test]
    fn test_scaling_preserves_ratios() {
        let p = PreciseVector::from(Vector::new(0.5, -0.25, 0.0));
        assert_eq!(p.x, BigDecimal::from(2));
        assert_eq!(p.y, BigDecimal::from(-1));
        assert_eq!(p.z, BigDecimal::from(0));
        assert!(PreciseVector::from(Vector::default()).is_zero());
    }

    #[test]
    fn test_cross_dot_signs() {
        let x = PreciseVector::from(Vector::new(1.0, 0.0, 0.0));
        let y = PreciseVector::from(Vector::new(0.0, 1.0, 0.0));
        let z = PreciseVector::from(Vector::new(0.0, 0.0, 1.0));
        assert_eq!(sign(&x.cross(&y).dot(&z)), Ordering::Greater);
        assert_eq!(sign(&y.cross(&x).dot(&z)), Ordering::Less);
        assert_eq!(sign(&x.cross(&x).dot(&z)), Ordering::Equal);
    }

    #[test]
    fn test_tiny_triple_product() {
        // Nearly collinear points whose determinant underflows in f64 but
        // is exactly representable once scaled.
        let a = PreciseVector::from(Vector::new(1.0, 1e-200, 0.0));
        let b = PreciseVector::from(Vector::new(1.0, 0.0, 1e-200));
        let c = PreciseVector::from(Vector::new(1.0, 0.0, 0.0));
        assert_eq!(sign(&a.cross(&b).dot(&c)), Ordering::Greater);
    }
}
