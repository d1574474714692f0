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

use crate::consts::{BOUNDING_BOX3D_PADDING, BOUNDING_BOX_DILATION};
use crate::r1;
use crate::r3::box3d::Box3d;
use crate::r3::vector::Vector;
use crate::s1;
use crate::s1::angle::{Angle, Rad};
use crate::s2::encoding::{decode_region, Encoder};
use crate::s2::error::Result;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::region::{Region, Shape};
use crate::s2::relationship::Relationship;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Circle is a spherical cap: the set of points within a given angle (the
/// opening angle) of a center point. A negative opening angle denotes the
/// empty circle and an opening angle of π or more the full sphere.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Point,
    pub opening_angle: Angle,
}

const ENCODED_LEN: usize = 1 + 4 * 8;

impl Circle {
    /// The type code of an encoded Circle.
    pub const TYPE_CODE: u8 = b'c';

    pub fn new(center: Point, opening_angle: Angle) -> Self {
        Circle {
            center,
            opening_angle,
        }
    }

    /// Returns the empty circle.
    pub fn empty() -> Self {
        Circle::new(Point::from_coords(0.0, 0.0, 1.0), Rad(-1.0).into())
    }

    /// Returns the circle covering the whole sphere.
    pub fn full() -> Self {
        Circle::new(Point::from_coords(0.0, 0.0, 1.0), Rad(PI).into())
    }

    pub fn is_empty(&self) -> bool {
        self.opening_angle.rad() < 0.0
    }

    pub fn is_full(&self) -> bool {
        self.opening_angle.rad() >= PI
    }

    /// Reports whether the circle contains the given point.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.is_full() {
            return true;
        }
        !self.is_empty() && self.center.distance(p).rad() <= self.opening_angle.rad()
    }

    /// Reports whether the circle contains other.
    pub fn contains_circle(&self, other: &Circle) -> bool {
        if self.is_full() || other.is_empty() {
            return true;
        }
        if self.is_empty() || other.is_full() {
            return false;
        }
        self.center.distance(&other.center).rad() + other.opening_angle.rad()
            <= self.opening_angle.rad()
    }

    /// Reports whether the circle and other have no points in common.
    pub fn is_disjoint_from(&self, other: &Circle) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        self.center.distance(&other.center).rad()
            > self.opening_angle.rad() + other.opening_angle.rad()
    }

    /// Returns the relationship between two circles.
    pub fn relate_circle(&self, other: &Circle) -> Relationship {
        if self.is_disjoint_from(other) {
            Relationship::Disjoint
        } else if self.contains_circle(other) {
            Relationship::Contains
        } else if other.contains_circle(self) {
            Relationship::Within
        } else {
            Relationship::Intersects
        }
    }

    /// Returns the complement of the circle: the circle centered on the
    /// antipode whose opening angle is π minus this one.
    pub fn complement(&self) -> Self {
        if self.is_empty() {
            return Circle::full();
        }
        if self.is_full() {
            return Circle::empty();
        }
        Circle::new(-self.center, Rad(PI - self.opening_angle.rad()).into())
    }

    /// Returns the circle with its opening angle widened by margin.
    pub fn dilated_by(&self, margin: Angle) -> Self {
        if self.is_empty() || self.is_full() {
            return *self;
        }
        let r = (self.opening_angle.rad() + margin.rad()).min(PI);
        Circle::new(self.center, Rad(r).into())
    }

    /// Decodes a Circle from its binary encoding.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_region(data, Circle::TYPE_CODE, |mut d| {
            d.expect_len(ENCODED_LEN)?;
            let center = Point(d.get_vector()?);
            let opening_angle = Rad(d.get_f64()?).into();
            Ok(Circle {
                center,
                opening_angle,
            })
        })
    }
}

impl Region for Circle {
    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(*self)
    }

    fn bounding_box(&self) -> Rect {
        if self.is_empty() {
            return Rect::empty();
        }
        if self.is_full() {
            return Rect::full();
        }
        let r = self.opening_angle.rad();
        let center = LatLng::from_point(&self.center);
        let lat_c = center.lat.rad();
        let lat = r1::interval::Interval::new(lat_c - r, lat_c + r);
        let lng = if lat.lo <= -FRAC_PI_2 || lat.hi >= FRAC_PI_2 {
            s1::interval::FULL
        } else {
            let s = (r.sin() / lat_c.cos()).min(1.0);
            let half_width = s.asin();
            let lng_c = center.lng.rad();
            s1::interval::Interval::from_endpoints(lng_c - half_width, lng_c + half_width)
        };
        Rect::new(lat, lng).dilated_by(BOUNDING_BOX_DILATION)
    }

    fn bounding_box3d(&self) -> Box3d {
        if self.is_empty() {
            return Box3d::empty();
        }
        if self.is_full() {
            return Box3d::around_unit_sphere();
        }
        let r = self.opening_angle.rad();
        let axis_range = |axis: Vector| {
            let theta = self.center.0.angle(&axis).rad();
            r1::interval::Interval::new((theta + r).min(PI).cos(), (theta - r).max(0.0).cos())
        };
        Box3d::new(
            axis_range(Vector::new(1.0, 0.0, 0.0)),
            axis_range(Vector::new(0.0, 1.0, 0.0)),
            axis_range(Vector::new(0.0, 0.0, 1.0)),
        )
        .dilated_by(BOUNDING_BOX3D_PADDING)
    }

    fn bounding_circle(&self) -> Circle {
        *self
    }

    fn contains(&self, p: &Point) -> bool {
        self.contains_point(p)
    }

    fn relate(&self, other: &dyn Region) -> Relationship {
        match other.shape() {
            Some(Shape::Circle(c)) => self.relate_circle(c),
            Some(Shape::Rect(r)) => {
                if self.is_empty() || r.is_empty() {
                    Relationship::Disjoint
                } else if !r.intersects(&self.bounding_box())
                    || self.is_disjoint_from(&r.bounding_circle())
                {
                    Relationship::Disjoint
                } else if self.contains_circle(&r.bounding_circle()) {
                    Relationship::Contains
                } else if r.contains_rect(&self.bounding_box()) {
                    Relationship::Within
                } else {
                    Relationship::Intersects
                }
            }
            Some(Shape::ConvexPolygon(p)) => p.relate_circle(self).invert(),
            Some(Shape::Ellipse(e)) => {
                let outer = e.bounding_circle();
                match self.relate_circle(&outer) {
                    Relationship::Disjoint => Relationship::Disjoint,
                    Relationship::Contains => Relationship::Contains,
                    _ if e.inscribed_circle().contains_circle(self) => Relationship::Within,
                    _ => Relationship::Intersects,
                }
            }
            None => other.relate(self).invert(),
        }
    }

    fn encode(&self) -> Vec<u8> {
        let mut e = Encoder::new(Circle::TYPE_CODE, ENCODED_LEN);
        e.put_vector(&self.center.0);
        e.put_f64(self.opening_angle.rad());
        e.finish()
    }

    fn shape(&self) -> Option<Shape<'_>> {
        Some(Shape::Circle(self))
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({}, {})", self.center, self.opening_angle)
    }
}
