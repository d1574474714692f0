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

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Deg, Rad};
use crate::s2::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LatLng represents a point on the unit sphere as a pair of angles.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
    pub lat: Angle,
    pub lng: Angle,
}

impl LatLng {
    pub fn new(lat: Angle, lng: Angle) -> Self {
        LatLng { lat, lng }
    }

    /// Returns a LatLng for the coordinates given in degrees.
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Deg(lat).into(),
            lng: Deg(lng).into(),
        }
    }

    /// Returns the latitude of the given point.
    pub fn latitude(p: &Point) -> Angle {
        let v = p.0;
        Rad(v.z.atan2((v.x * v.x + v.y * v.y).sqrt())).into()
    }

    /// Returns the longitude of the given point.
    pub fn longitude(p: &Point) -> Angle {
        Rad(p.0.y.atan2(p.0.x)).into()
    }

    /// Returns the LatLng of the given point.
    pub fn from_point(p: &Point) -> Self {
        LatLng {
            lat: LatLng::latitude(p),
            lng: LatLng::longitude(p),
        }
    }

    /// Reports whether the latitude is in [-π/2, π/2] and the longitude is
    /// in [-π, π].
    pub fn is_valid(&self) -> bool {
        self.lat.rad().abs() <= FRAC_PI_2 && self.lng.rad().abs() <= PI
    }

    /// Returns the LatLng with the latitude clamped to [-π/2, π/2] and the
    /// longitude wrapped into [-π, π].
    pub fn normalized(&self) -> Self {
        let lat = self.lat.rad().max(-FRAC_PI_2).min(FRAC_PI_2);
        LatLng {
            lat: Rad(lat).into(),
            lng: self.lng.normalized(),
        }
    }

    /// Returns the unit vector for this LatLng.
    pub fn to_point(&self) -> Point {
        let phi = self.lat.rad();
        let theta = self.lng.rad();
        let cosphi = phi.cos();
        Point(Vector::new(
            theta.cos() * cosphi,
            theta.sin() * cosphi,
            phi.sin(),
        ))
    }

    /// Returns the angle between the two LatLngs, computed with the
    /// haversine formula.
    pub fn distance(&self, other: &LatLng) -> Angle {
        let lat1 = self.lat.rad();
        let lat2 = other.lat.rad();
        let lng1 = self.lng.rad();
        let lng2 = other.lng.rad();
        let dlat = (0.5 * (lat2 - lat1)).sin();
        let dlng = (0.5 * (lng2 - lng1)).sin();
        let x = dlat * dlat + dlng * dlng * lat1.cos() * lat2.cos();
        Rad(2.0 * x.sqrt().atan2((1.0 - x).max(0.0).sqrt())).into()
    }
}

impl From<Point> for LatLng {
    fn from(p: Point) -> Self {
        LatLng::from_point(&p)
    }
}

impl From<&Point> for LatLng {
    fn from(p: &Point) -> Self {
        LatLng::from_point(p)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lat.deg(), self.lng.deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::f64_near;

    #[test]
    fn test_point_conversion() {
        for &(lat, lng) in &[(0.0, 0.0), (45.0, 90.0), (-30.0, -120.0), (89.0, 179.0)] {
            let ll = LatLng::from_degrees(lat, lng);
            let back = LatLng::from_point(&ll.to_point());
            assert!(f64_near(back.lat.deg(), lat, 1e-12), "{} {}", back, ll);
            assert!(f64_near(back.lng.deg(), lng, 1e-12), "{} {}", back, ll);
        }
        let north = LatLng::from_point(&Point::from_coords(0.0, 0.0, 1.0));
        assert!(f64_near(north.lat.rad(), FRAC_PI_2, 1e-15));
    }

    #[test]
    fn test_distance() {
        let a = LatLng::from_degrees(0.0, 0.0);
        let b = LatLng::from_degrees(0.0, 90.0);
        let c = LatLng::from_degrees(90.0, 0.0);
        assert!(f64_near(a.distance(&b).deg(), 90.0, 1e-12));
        assert!(f64_near(a.distance(&c).deg(), 90.0, 1e-12));
        assert!(f64_near(
            a.distance(&b).rad(),
            a.to_point().distance(&b.to_point()).rad(),
            1e-14
        ));
    }

    #[test]
    fn test_normalized() {
        let ll = LatLng::from_degrees(120.0, 270.0).normalized();
        assert!(ll.is_valid());
        assert!(f64_near(ll.lat.deg(), 90.0, 1e-12));
        assert!(f64_near(ll.lng.deg(), -90.0, 1e-12));
        assert!(!LatLng::from_degrees(91.0, 0.0).is_valid());
    }
}
