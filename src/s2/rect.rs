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

use crate::consts::{next_up, BOUNDING_BOX3D_PADDING, BOUNDING_CIRCLE_PADDING};
use crate::r1;
use crate::r3::box3d::Box3d;
use crate::s1;
use crate::s1::angle::{Angle, Rad};
use crate::s2::circle::Circle;
use crate::s2::encoding::{decode_region, Encoder};
use crate::s2::error::Result;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::region::{Region, Shape};
use crate::s2::relationship::Relationship;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rect represents a closed longitude/latitude box on the sphere. The
/// longitude interval may wrap around the antimeridian; the latitude
/// interval is a subset of [-π/2, π/2].
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub lat: r1::interval::Interval,
    pub lng: s1::interval::Interval,
}

fn valid_rect_lat_range() -> r1::interval::Interval {
    r1::interval::Interval::new(-FRAC_PI_2, FRAC_PI_2)
}

const ENCODED_LEN: usize = 1 + 4 * 8;

impl Rect {
    /// The type code of an encoded Rect.
    pub const TYPE_CODE: u8 = b'b';

    pub fn new(lat: r1::interval::Interval, lng: s1::interval::Interval) -> Self {
        Rect { lat, lng }
    }

    /// Returns the empty box.
    pub fn empty() -> Self {
        Rect {
            lat: r1::interval::EMPTY,
            lng: s1::interval::EMPTY,
        }
    }

    /// Returns the box containing the whole sphere.
    pub fn full() -> Self {
        Rect {
            lat: valid_rect_lat_range(),
            lng: s1::interval::FULL,
        }
    }

    /// Returns the box with the given corners, in degrees. The longitude
    /// range runs eastward from lng_lo to lng_hi.
    pub fn from_degrees(lat_lo: f64, lng_lo: f64, lat_hi: f64, lng_hi: f64) -> Self {
        let lng = if lng_hi - lng_lo >= 360.0 {
            s1::interval::FULL
        } else {
            s1::interval::Interval::from_endpoints(lng_lo.to_radians(), lng_hi.to_radians())
        };
        Rect {
            lat: r1::interval::Interval::new(lat_lo.to_radians(), lat_hi.to_radians()),
            lng,
        }
    }

    /// Returns the box containing the single given point.
    pub fn from_latlng(ll: &LatLng) -> Self {
        Rect {
            lat: r1::interval::Interval::from_point(ll.lat.rad()),
            lng: s1::interval::Interval::from_endpoints(ll.lng.rad(), ll.lng.rad()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty() || self.lng.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lat == valid_rect_lat_range() && self.lng.is_full()
    }

    /// Returns the center of the box.
    pub fn center(&self) -> LatLng {
        LatLng::new(Rad(self.lat.center()).into(), Rad(self.lng.center()).into())
    }

    /// Returns the k-th corner of the box, k in 0..4, counter-clockwise
    /// starting from the lower left.
    pub fn vertex(&self, k: usize) -> LatLng {
        let (lat, lng) = match k & 3 {
            0 => (self.lat.lo, self.lng.lo),
            1 => (self.lat.lo, self.lng.hi),
            2 => (self.lat.hi, self.lng.hi),
            _ => (self.lat.hi, self.lng.lo),
        };
        LatLng::new(Rad(lat).into(), Rad(lng).into())
    }

    /// Reports whether the box contains the given LatLng.
    pub fn contains_latlng(&self, ll: &LatLng) -> bool {
        let lat = ll.lat.rad();
        if lat.abs() >= FRAC_PI_2 {
            // Every longitude names the pole.
            return self.lat.contains(lat.max(-FRAC_PI_2).min(FRAC_PI_2)) && !self.lng.is_empty();
        }
        self.lat.contains(lat) && self.lng.contains(ll.lng.rad())
    }

    /// Reports whether the box contains the given point.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contains_latlng(&LatLng::from_point(p))
    }

    /// Reports whether the box contains other.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (self.lat.contains_interval(&other.lat) && self.lng.contains_interval(&other.lng))
    }

    /// Reports whether the box and other have any points in common.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.lat.intersects(&other.lat) && self.lng.intersects(&other.lng)
    }

    /// Returns the box with the longitude range made full if the box
    /// touches either pole.
    pub fn polar_closure(&self) -> Self {
        if self.lat.lo <= -FRAC_PI_2 || self.lat.hi >= FRAC_PI_2 {
            return Rect {
                lat: self.lat,
                lng: s1::interval::FULL,
            };
        }
        *self
    }

    /// Returns the box widened by margin radians on every side. The
    /// latitude range is clamped to the valid range and the result is
    /// closed at the poles.
    pub fn dilated_by(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Rect {
            lat: self
                .lat
                .expanded(margin)
                .clamped(-FRAC_PI_2, FRAC_PI_2),
            lng: self.lng.expanded(margin),
        }
        .polar_closure()
    }

    /// Returns the box widened so that it also contains the given LatLng.
    pub fn add_latlng(&self, ll: &LatLng) -> Self {
        Rect {
            lat: self.lat.add_point(ll.lat.rad()),
            lng: self.lng.add_point(ll.lng.rad()),
        }
    }

    /// Returns the relationship between the box and a circle, using the
    /// box's own bounding circle where an exact test would be required.
    fn relate_circle(&self, c: &Circle) -> Relationship {
        if self.is_empty() || c.is_empty() {
            return Relationship::Disjoint;
        }
        if !self.intersects(&c.bounding_box()) || c.is_disjoint_from(&self.bounding_circle()) {
            return Relationship::Disjoint;
        }
        if self.contains_rect(&c.bounding_box()) {
            return Relationship::Contains;
        }
        if c.contains_circle(&self.bounding_circle()) {
            return Relationship::Within;
        }
        Relationship::Intersects
    }

    /// Decodes a Rect from its binary encoding.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_region(data, Rect::TYPE_CODE, |mut d| {
            d.expect_len(ENCODED_LEN)?;
            let lng_lo = d.get_f64()?;
            let lng_hi = d.get_f64()?;
            let lat_lo = d.get_f64()?;
            let lat_hi = d.get_f64()?;
            Ok(Rect {
                lat: r1::interval::Interval::new(lat_lo, lat_hi),
                lng: s1::interval::Interval {
                    lo: lng_lo,
                    hi: lng_hi,
                },
            })
        })
    }
}

// Returns the range of cos over the circular interval i.
fn cos_range(i: &s1::interval::Interval) -> r1::interval::Interval {
    let mut r = r1::interval::Interval::from_point_pair(i.lo.cos(), i.hi.cos());
    if i.contains(0.0) {
        r = r.add_point(1.0);
    }
    if i.contains(PI) {
        r = r.add_point(-1.0);
    }
    r
}

// Returns the range of sin over the circular interval i.
fn sin_range(i: &s1::interval::Interval) -> r1::interval::Interval {
    let mut r = r1::interval::Interval::from_point_pair(i.lo.sin(), i.hi.sin());
    if i.contains(FRAC_PI_2) {
        r = r.add_point(1.0);
    }
    if i.contains(-FRAC_PI_2) {
        r = r.add_point(-1.0);
    }
    r
}

// Returns the range of the product of values drawn from a and b.
fn product_range(a: &r1::interval::Interval, b: &r1::interval::Interval) -> r1::interval::Interval {
    let p = [a.lo * b.lo, a.lo * b.hi, a.hi * b.lo, a.hi * b.hi];
    r1::interval::Interval::new(
        p.iter().cloned().fold(f64::INFINITY, f64::min),
        p.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    )
}

impl Region for Rect {
    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(*self)
    }

    fn bounding_box(&self) -> Rect {
        *self
    }

    fn bounding_box3d(&self) -> Box3d {
        if self.is_empty() {
            return Box3d::empty();
        }
        if self.is_full() {
            return Box3d::around_unit_sphere();
        }
        let mut cos_lat =
            r1::interval::Interval::from_point_pair(self.lat.lo.cos(), self.lat.hi.cos());
        if self.lat.contains(0.0) {
            cos_lat = cos_lat.add_point(1.0);
        }
        let z = r1::interval::Interval::new(self.lat.lo.sin(), self.lat.hi.sin());
        Box3d::new(
            product_range(&cos_lat, &cos_range(&self.lng)),
            product_range(&cos_lat, &sin_range(&self.lng)),
            z,
        )
        .dilated_by(BOUNDING_BOX3D_PADDING)
    }

    fn bounding_circle(&self) -> Circle {
        if self.is_empty() {
            return Circle::empty();
        }
        if self.is_full() {
            return Circle::full();
        }
        if self.lng.length() > PI {
            // Wider than a hemisphere of longitude: a polar cap is tighter.
            let (pole, radius) = if self.lat.lo + self.lat.hi >= 0.0 {
                (Point::from_coords(0.0, 0.0, 1.0), FRAC_PI_2 - self.lat.lo)
            } else {
                (Point::from_coords(0.0, 0.0, -1.0), FRAC_PI_2 + self.lat.hi)
            };
            return Circle::new(pole, Rad(next_up(radius + BOUNDING_CIRCLE_PADDING)).into());
        }
        let center = self.center().to_point();
        let radius = (0..4)
            .map(|k| center.distance(&self.vertex(k).to_point()))
            .fold(Angle::default(), Angle::max);
        Circle::new(
            center,
            Rad(next_up(radius.rad() + BOUNDING_CIRCLE_PADDING)).into(),
        )
    }

    fn contains(&self, p: &Point) -> bool {
        self.contains_point(p)
    }

    fn relate(&self, other: &dyn Region) -> Relationship {
        match other.shape() {
            Some(Shape::Rect(r)) => {
                if !self.intersects(r) {
                    Relationship::Disjoint
                } else if self.contains_rect(r) {
                    Relationship::Contains
                } else if r.contains_rect(self) {
                    Relationship::Within
                } else {
                    Relationship::Intersects
                }
            }
            Some(Shape::Circle(c)) => self.relate_circle(c),
            Some(Shape::ConvexPolygon(p)) => p.relate_rect(self).invert(),
            Some(Shape::Ellipse(e)) => {
                match self.relate_circle(&e.bounding_circle()) {
                    Relationship::Disjoint => Relationship::Disjoint,
                    Relationship::Contains => Relationship::Contains,
                    _ if e.inscribed_circle().contains_circle(&self.bounding_circle()) => {
                        Relationship::Within
                    }
                    _ => Relationship::Intersects,
                }
            }
            None => other.relate(self).invert(),
        }
    }

    fn encode(&self) -> Vec<u8> {
        let mut e = Encoder::new(Rect::TYPE_CODE, ENCODED_LEN);
        e.put_f64(self.lng.lo);
        e.put_f64(self.lng.hi);
        e.put_f64(self.lat.lo);
        e.put_f64(self.lat.hi);
        e.finish()
    }

    fn shape(&self) -> Option<Shape<'_>> {
        Some(Shape::Rect(self))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::empty()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Lo{}, Hi{}]", self.vertex(0), self.vertex(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s1::angle::Deg;
    use crate::s2::error::{DecodeError, Error};

    fn ll(lat: f64, lng: f64) -> LatLng {
        LatLng::from_degrees(lat, lng)
    }

    #[test]
    fn test_empty_and_full() {
        assert!(Rect::empty().is_empty());
        assert!(Rect::full().is_full());
        assert!(Rect::from_degrees(-90.0, -180.0, 90.0, 180.0).is_full());
        assert!(Rect::full().contains_point(&Point::from_coords(0.3, -0.2, 0.9)));
        assert!(!Rect::empty().contains_point(&Point::from_coords(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_contains() {
        let r = Rect::from_degrees(0.0, -10.0, 30.0, 10.0);
        assert!(r.contains_latlng(&ll(15.0, 0.0)));
        assert!(r.contains_latlng(&ll(30.0, 10.0)));
        assert!(!r.contains_latlng(&ll(31.0, 0.0)));
        assert!(!r.contains_latlng(&ll(15.0, 11.0)));
        // Crossing the antimeridian.
        let w = Rect::from_degrees(-10.0, 170.0, 10.0, -170.0);
        assert!(w.contains_latlng(&ll(0.0, 180.0)));
        assert!(w.contains_latlng(&ll(0.0, -175.0)));
        assert!(!w.contains_latlng(&ll(0.0, 0.0)));
        // A cap around the north pole contains the pole itself.
        let cap = Rect::new(
            r1::interval::Interval::new(Angle::from(Deg(80.0)).rad(), FRAC_PI_2),
            s1::interval::Interval::from_endpoints(0.1, 0.2),
        );
        assert!(cap.contains_point(&Point::from_coords(0.0, 0.0, 1.0)));
        assert!(!cap.contains_point(&Point::from_coords(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_relate_rects() {
        let a = Rect::from_degrees(0.0, 0.0, 20.0, 20.0);
        let b = Rect::from_degrees(5.0, 5.0, 10.0, 10.0);
        let c = Rect::from_degrees(10.0, 10.0, 30.0, 30.0);
        let d = Rect::from_degrees(-30.0, 100.0, -20.0, 120.0);
        assert_eq!(a.relate(&b), Relationship::Contains);
        assert_eq!(b.relate(&a), Relationship::Within);
        assert_eq!(a.relate(&c), Relationship::Intersects);
        assert_eq!(a.relate(&d), Relationship::Disjoint);
    }

    #[test]
    fn test_relate_circles() {
        let r = Rect::from_degrees(-10.0, -10.0, 10.0, 10.0);
        let origin = ll(0.0, 0.0).to_point();
        let small = Circle::new(origin, Deg(1.0).into());
        let huge = Circle::new(origin, Deg(60.0).into());
        let far = Circle::new(ll(0.0, 90.0).to_point(), Deg(5.0).into());
        assert_eq!(r.relate(&small), Relationship::Contains);
        assert_eq!(r.relate(&huge), Relationship::Within);
        assert_eq!(r.relate(&far), Relationship::Disjoint);
        assert_eq!(r.relate(&Circle::new(origin, Deg(12.0).into())), Relationship::Intersects);
    }

    #[test]
    fn test_bounding_shapes() {
        let r = Rect::from_degrees(20.0, 30.0, 40.0, 60.0);
        let c = r.bounding_circle();
        let b = r.bounding_box3d();
        for k in 0..4 {
            let p = r.vertex(k).to_point();
            assert!(c.contains(&p));
            assert!(b.contains(&p.0));
        }
        // Midpoint of the northern edge bulges towards the pole.
        let mid = ll(40.0, 45.0).to_point();
        assert!(c.contains(&mid));
        assert!(b.contains(&mid.0));
        // A box wider than π of longitude is bounded by a polar cap.
        let wide = Rect::from_degrees(60.0, -150.0, 80.0, 150.0);
        let cap = wide.bounding_circle();
        assert!(cap.center.approx_eq(&Point::from_coords(0.0, 0.0, 1.0)));
        assert!(cap.contains(&ll(61.0, 0.0).to_point()));
        assert!(cap.contains(&ll(61.0, 149.0).to_point()));
    }

    #[test]
    fn test_dilated_by() {
        let r = Rect::from_degrees(80.0, 0.0, 89.0, 10.0).dilated_by(Angle::from(Deg(2.0)).rad());
        assert!(r.lng.is_full());
        assert_eq!(r.lat.hi, FRAC_PI_2);
    }

    #[test]
    fn test_encode_decode() {
        let r = Rect::from_degrees(-10.0, 170.0, 10.0, -170.0);
        let data = r.encode();
        assert_eq!(data.len(), 33);
        assert_eq!(data[0], b'b');
        assert_eq!(Rect::decode(&data).unwrap(), r);
        let mut bad = data.clone();
        bad[0] = b'c';
        assert_eq!(
            Rect::decode(&bad),
            Err(Error::Decode(DecodeError::TypeCode {
                expected: b'b',
                found: b'c'
            }))
        );
    }
}
