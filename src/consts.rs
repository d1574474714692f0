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

/// DBL_EPSILON is the machine epsilon for f64, i.e. the difference between
/// 1.0 and the next representable value.
pub const DBL_EPSILON: f64 = f64::EPSILON;

/// EPSILON is the tolerance used for approximate floating point comparisons.
pub const EPSILON: f64 = 1e-14;

/// The angle, in radians, by which longitude/latitude bounding boxes are
/// dilated to absorb rounding error in their computation (~0.1 milliarcsec).
pub const BOUNDING_BOX_DILATION: f64 = 5.0e-10;

/// The amount by which 3-D bounding boxes are widened on every side. It
/// covers the rounding error of edge extrema computed from normalized
/// vectors.
pub const BOUNDING_BOX3D_PADDING: f64 = 1.0e-14;

/// The angle, in radians, by which bounding circles are widened.
pub const BOUNDING_CIRCLE_PADDING: f64 = 4.0 * DBL_EPSILON;

/// f64_eq reports whether the two values are within EPSILON of each other.
pub fn f64_eq(x: f64, y: f64) -> bool {
    f64_near(x, y, EPSILON)
}

/// f64_near reports whether the two values are within the given epsilon.
pub fn f64_near(x: f64, y: f64, eps: f64) -> bool {
    (x - y).abs() <= eps
}

/// next_up returns the smallest representable value greater than x.
#[cfg(feature = "float_extras")]
pub fn next_up(x: f64) -> f64 {
    float_extras::f64::nextafter(x, f64::INFINITY)
}

/// next_up returns a value slightly greater than x.
#[cfg(not(feature = "float_extras"))]
pub fn next_up(x: f64) -> f64 {
    x + x.abs().max(f64::MIN_POSITIVE) * DBL_EPSILON
}

/// next_down returns the largest representable value smaller than x.
#[cfg(feature = "float_extras")]
pub fn next_down(x: f64) -> f64 {
    float_extras::f64::nextafter(x, f64::NEG_INFINITY)
}

/// next_down returns a value slightly smaller than x.
#[cfg(not(feature = "float_extras"))]
pub fn next_down(x: f64) -> f64 {
    x - x.abs().max(f64::MIN_POSITIVE) * DBL_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_up_down() {
        for &x in &[-2.5, -1.0, 0.0, 1e-300, 0.5, 1.0, 3.0] {
            assert!(next_up(x) > x);
            assert!(next_down(x) < x);
        }
        assert!(f64_eq(1.0, 1.0 + 1e-15));
        assert!(!f64_eq(1.0, 1.0 + 1e-12));
    }
}
