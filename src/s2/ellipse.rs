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

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use cgmath::{Matrix, Matrix3, Vector3};

use crate::consts::{next_down, BOUNDING_CIRCLE_PADDING};
use crate::r3::box3d::Box3d;
use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Rad};
use crate::s2::circle::Circle;
use crate::s2::encoding::{decode_region, Encoder};
use crate::s2::error::{DecodeError, Result};
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::region::{Region, Shape};
use crate::s2::relationship::Relationship;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ellipse is the intersection of the unit sphere with an elliptical cone
/// whose apex is the origin.
///
/// It is described by its center, the semi-major and semi-minor axis
/// angles alpha ≥ beta (both below π/2) and the orientation of the major
/// axis, measured from north towards east at the center.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ellipse {
    center: Point,
    alpha: Angle,
    beta: Angle,
    orientation: Angle,
}

const ENCODED_LEN: usize = 1 + 6 * 8;

impl Ellipse {
    /// The type code of an encoded Ellipse.
    pub const TYPE_CODE: u8 = b'e';

    /// Returns the ellipse with the given center, semi-axis angles and
    /// orientation. If beta exceeds alpha the axes are swapped and the
    /// orientation turned by a quarter turn. Axis angles are clamped to
    /// [0, π/2).
    pub fn new(center: Point, alpha: Angle, beta: Angle, orientation: Angle) -> Self {
        let limit = next_down(FRAC_PI_2);
        let clamp = |a: Angle| a.rad().max(0.0).min(limit);
        let (a, b, o) = if beta.rad() > alpha.rad() {
            (clamp(beta), clamp(alpha), orientation.rad() + FRAC_PI_2)
        } else {
            (clamp(alpha), clamp(beta), orientation.rad())
        };
        Ellipse {
            center,
            alpha: Rad(a).into(),
            beta: Rad(b).into(),
            orientation: Rad(o).into(),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the semi-major axis angle.
    pub fn alpha(&self) -> Angle {
        self.alpha
    }

    /// Returns the semi-minor axis angle.
    pub fn beta(&self) -> Angle {
        self.beta
    }

    pub fn orientation(&self) -> Angle {
        self.orientation
    }

    /// Returns the rotation taking the sphere into the ellipse frame. Its
    /// rows are the major axis tangent, the minor axis tangent and the
    /// center.
    pub fn frame(&self) -> Matrix3<f64> {
        let c = self.center.0;
        let mut east = Vector::new(0.0, 0.0, 1.0).cross(&c);
        if east.norm2() < 1e-30 {
            east = c.ortho();
        }
        let east = east.normalize();
        let north = c.cross(&east);
        let (s, cs) = self.orientation.rad().sin_cos();
        let major = north * cs + east * s;
        let minor = c.cross(&major);
        let col = |v: Vector| Vector3::from(v.to_array());
        Matrix3::from_cols(col(major), col(minor), col(c)).transpose()
    }

    /// Returns the largest circle centered on the ellipse center that is
    /// contained in the ellipse.
    pub fn inscribed_circle(&self) -> Circle {
        Circle::new(self.center, self.beta)
    }

    /// Decodes an Ellipse from its binary encoding.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_region(data, Ellipse::TYPE_CODE, |mut d| {
            d.expect_len(ENCODED_LEN)?;
            let center = Point(d.get_vector()?);
            let alpha = d.get_f64()?;
            let beta = d.get_f64()?;
            let orientation = d.get_f64()?;
            if !(0.0 <= beta && beta <= alpha && alpha < FRAC_PI_2) || !orientation.is_finite() {
                return Err(DecodeError::Degenerate);
            }
            Ok(Ellipse {
                center,
                alpha: Rad(alpha).into(),
                beta: Rad(beta).into(),
                orientation: Rad(orientation).into(),
            })
        })
    }
}

impl Region for Ellipse {
    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(*self)
    }

    fn bounding_box(&self) -> Rect {
        self.bounding_circle().bounding_box()
    }

    fn bounding_box3d(&self) -> Box3d {
        self.bounding_circle().bounding_box3d()
    }

    fn bounding_circle(&self) -> Circle {
        Circle::new(
            self.center,
            Rad(self.alpha.rad() + BOUNDING_CIRCLE_PADDING).into(),
        )
    }

    fn contains(&self, p: &Point) -> bool {
        let q = self.frame() * Vector3::from(p.0.to_array());
        if q.z <= 0.0 {
            return false;
        }
        let ta = self.alpha.rad().tan();
        let tb = self.beta.rad().tan();
        q.x.abs() <= q.z * ta
            && q.y.abs() <= q.z * tb
            && q.x * q.x * tb * tb + q.y * q.y * ta * ta <= q.z * q.z * ta * ta * tb * tb
    }

    fn relate(&self, other: &dyn Region) -> Relationship {
        let outer = self.bounding_circle();
        let inner = self.inscribed_circle();
        let (outer_rel, inner_rel) = match other.shape() {
            Some(Shape::Circle(c)) => (outer.relate_circle(c), inner.relate_circle(c)),
            Some(Shape::Rect(r)) => (outer.relate(r), inner.relate(r)),
            Some(Shape::ConvexPolygon(p)) => (
                p.relate_circle(&outer).invert(),
                p.relate_circle(&inner).invert(),
            ),
            Some(Shape::Ellipse(e)) => {
                let other_outer = e.bounding_circle();
                if outer.is_disjoint_from(&other_outer) {
                    return Relationship::Disjoint;
                }
                if inner.contains_circle(&other_outer) {
                    return Relationship::Contains;
                }
                if e.inscribed_circle().contains_circle(&outer) {
                    return Relationship::Within;
                }
                return Relationship::Intersects;
            }
            None => return other.relate(self).invert(),
        };
        match (outer_rel, inner_rel) {
            (Relationship::Disjoint, _) => Relationship::Disjoint,
            (Relationship::Within, _) => Relationship::Within,
            (_, Relationship::Contains) => Relationship::Contains,
            _ => Relationship::Intersects,
        }
    }

    fn encode(&self) -> Vec<u8> {
        let mut e = Encoder::new(Ellipse::TYPE_CODE, ENCODED_LEN);
        e.put_vector(&self.center.0);
        e.put_f64(self.alpha.rad());
        e.put_f64(self.beta.rad());
        e.put_f64(self.orientation.rad());
        e.finish()
    }

    fn shape(&self) -> Option<Shape<'_>> {
        Some(Shape::Ellipse(self))
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ellipse({}, {}, {}, {})",
            self.center, self.alpha, self.beta, self.orientation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s1::angle::Deg;
    use crate::s2::error::Error;
    use crate::s2::latlng::LatLng;
    use crate::s2::test_util::random_point;

    fn deg(d: f64) -> Angle {
        Deg(d).into()
    }

    fn at(lat: f64, lng: f64) -> Point {
        LatLng::from_degrees(lat, lng).to_point()
    }

    #[test]
    fn test_axes() {
        // Major axis pointing north.
        let e = Ellipse::new(at(0.0, 0.0), deg(20.0), deg(5.0), deg(0.0));
        assert!(e.contains(&at(0.0, 0.0)));
        assert!(e.contains(&at(19.0, 0.0)));
        assert!(!e.contains(&at(21.0, 0.0)));
        assert!(e.contains(&at(0.0, 4.0)));
        assert!(!e.contains(&at(0.0, 6.0)));
        assert!(!e.contains(&at(0.0, 180.0)));
        // Turned to point east.
        let e = Ellipse::new(at(0.0, 0.0), deg(20.0), deg(5.0), deg(90.0));
        assert!(e.contains(&at(0.0, 19.0)));
        assert!(!e.contains(&at(19.0, 0.0)));
    }

    #[test]
    fn test_swapped_axes() {
        let e = Ellipse::new(at(10.0, 10.0), deg(5.0), deg(20.0), deg(0.0));
        assert!((e.alpha().deg() - 20.0).abs() < 1e-12);
        assert!((e.beta().deg() - 5.0).abs() < 1e-12);
        assert!((e.orientation().deg() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_center() {
        let e = Ellipse::new(Point::from_coords(0.0, 0.0, 1.0), deg(10.0), deg(10.0), deg(0.0));
        assert!(e.contains(&at(81.0, 123.0)));
        assert!(!e.contains(&at(79.0, 123.0)));
    }

    #[test]
    fn test_circles_bound_ellipse() {
        let mut rng = rand::thread_rng();
        let e = Ellipse::new(at(-20.0, 50.0), deg(30.0), deg(10.0), deg(35.0));
        let outer = e.bounding_circle();
        let inner = e.inscribed_circle();
        for _ in 0..2000 {
            let p = random_point(&mut rng);
            if e.contains(&p) {
                assert!(outer.contains_point(&p));
                assert!(e.bounding_box().contains_point(&p));
            }
            if inner.contains_point(&p) {
                assert!(e.contains(&p));
            }
        }
    }

    #[test]
    fn test_relate() {
        let e = Ellipse::new(at(0.0, 0.0), deg(20.0), deg(5.0), deg(0.0));
        let tiny = Circle::new(at(0.0, 0.0), deg(1.0));
        let huge = Circle::new(at(0.0, 0.0), deg(40.0));
        let far = Circle::new(at(0.0, 90.0), deg(10.0));
        assert_eq!(e.relate(&tiny), Relationship::Contains);
        assert_eq!(e.relate(&huge), Relationship::Within);
        assert_eq!(e.relate(&far), Relationship::Disjoint);
        assert_eq!(tiny.relate(&e), Relationship::Within);
        assert_eq!(huge.relate(&e), Relationship::Contains);
        assert_eq!(far.relate(&e), Relationship::Disjoint);
        let ring = Circle::new(at(0.0, 0.0), deg(10.0));
        assert_eq!(e.relate(&ring), Relationship::Intersects);
    }

    #[test]
    fn test_encode_decode() {
        let e = Ellipse::new(at(-20.0, 50.0), deg(30.0), deg(10.0), deg(35.0));
        let data = e.encode();
        assert_eq!(data.len(), 49);
        assert_eq!(data[0], b'e');
        assert_eq!(Ellipse::decode(&data).unwrap(), e);

        // beta > alpha cannot come from a valid ellipse.
        let mut bad = data.clone();
        bad[25..33].copy_from_slice(&0.1f64.to_le_bytes());
        assert_eq!(
            Ellipse::decode(&bad),
            Err(Error::Decode(DecodeError::Degenerate))
        );
    }
}
