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

use rand::Rng;

use crate::s2::point::Point;

/// random_point returns a point distributed uniformly over the sphere.
pub fn random_point<R: Rng>(rng: &mut R) -> Point {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let lng: f64 = rng.gen_range(-PI..PI);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Point::from_coords(r * lng.cos(), r * lng.sin(), z)
}

/// random_point_in_cap returns a point distributed uniformly over the cap
/// of the given angular radius around center.
pub fn random_point_in_cap<R: Rng>(rng: &mut R, center: &Point, radius: f64) -> Point {
    let cos_rho: f64 = rng.gen_range(radius.cos()..=1.0);
    let sin_rho = (1.0 - cos_rho * cos_rho).max(0.0).sqrt();
    let theta: f64 = rng.gen_range(-PI..PI);
    let u = center.0.ortho();
    let v = center.0.cross(&u);
    let dir = u * theta.cos() + v * theta.sin();
    Point((center.0 * cos_rho + dir * sin_rho).normalize())
}

/// Asserts that a.relate(b) is the given relationship and that b.relate(a)
/// is its inverse.
#[macro_export]
macro_rules! assert_relation {
    ($a:expr, $b:expr, $rel:expr) => {
        let a_val = &$a;
        let b_val = &$b;
        let forward = $crate::s2::region::Region::relate(a_val, b_val);
        let backward = $crate::s2::region::Region::relate(b_val, a_val);
        if forward != $rel || backward != $rel.invert() {
            panic!(
                concat!(
                    "relationship mismatch\n",
                    "A:        {:?}\n",
                    "B:        {:?}\n",
                    "Expected: {:?}\n",
                    "A vs B:   {:?}\n",
                    "B vs A:   {:?}",
                ),
                a_val, b_val, $rel, forward, backward
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_points() {
        let mut rng = rand::thread_rng();
        let center = Point::from_coords(0.3, -0.2, 0.9);
        for _ in 0..200 {
            assert!(random_point(&mut rng).is_unit());
            let p = random_point_in_cap(&mut rng, &center, 0.25);
            assert!(p.is_unit());
            assert!(center.distance(&p).rad() <= 0.25 + 1e-12);
        }
    }
}
