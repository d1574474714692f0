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

use tracing::{debug, trace};

use crate::consts::{
    next_up, BOUNDING_BOX3D_PADDING, BOUNDING_BOX_DILATION, BOUNDING_CIRCLE_PADDING,
};
use crate::r1;
use crate::r3::box3d::Box3d;
use crate::r3::vector::Vector;
use crate::s1;
use crate::s1::angle::Rad;
use crate::s2::circle::Circle;
use crate::s2::edgeutil::{crossing_sign, distance_from_edge, edge_axis_interval};
use crate::s2::ellipse::Ellipse;
use crate::s2::encoding::{decode_region, Encoder};
use crate::s2::error::{DecodeError, GeometryError, Result};
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::predicates::{orientation, Direction};
use crate::s2::rect::Rect;
use crate::s2::region::{Region, Shape};
use crate::s2::relationship::Relationship;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ConvexPolygon is a closed convex polygon on the unit sphere.
///
/// Its vertices are stored in counter-clockwise order when viewed from
/// outside the sphere. The polygon always fits inside an open hemisphere,
/// so it never contains a pair of antipodal points, and no three
/// consecutive vertices lie on a common great circle. Edges are the
/// minor great circle arcs between consecutive vertices.
///
/// Two polygons are equal when they have the same set of vertices,
/// regardless of which vertex comes first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvexPolygon {
    vertices: Vec<Point>,
}

// Reports whether the closed polygon with the given counter-clockwise
// vertices contains p.
fn hull_contains(vertices: &[Point], p: &Point) -> bool {
    let n = vertices.len();
    (0..n).all(|i| orientation(&vertices[i], &vertices[(i + 1) % n], p) != Direction::Clockwise)
}

// Returns p with every negative zero coordinate replaced by positive zero,
// so that equal points also compare equal under total_cmp.
fn without_negative_zero(p: &Point) -> Point {
    Point(Vector::new(p.0.x + 0.0, p.0.y + 0.0, p.0.z + 0.0))
}

// Builds the counter-clockwise convex hull of points.
fn compute_hull(points: &[Point]) -> std::result::Result<Vec<Point>, GeometryError> {
    let mut pts: Vec<Point> = points.iter().map(without_negative_zero).collect();
    pts.sort_by(Point::total_cmp);
    pts.dedup();
    if pts.len() < 3 {
        return Err(GeometryError::TooFewPoints);
    }
    if pts
        .iter()
        .any(|p| pts.binary_search_by(|q| q.total_cmp(&-*p)).is_ok())
    {
        return Err(GeometryError::NotInHemisphere);
    }

    // Seed the hull with the first triangle of non-coplanar points.
    let a = pts[0];
    let b = pts[1];
    let (k, dir) = pts
        .iter()
        .enumerate()
        .skip(2)
        .map(|(k, c)| (k, orientation(&a, &b, c)))
        .find(|(_, d)| *d != Direction::Indeterminate)
        .ok_or(GeometryError::Coplanar)?;
    let c = pts[k];
    let mut hull = if dir == Direction::CounterClockwise {
        vec![a, b, c]
    } else {
        vec![a, c, b]
    };

    for (j, p) in pts.iter().enumerate().skip(2) {
        if j == k || hull_contains(&hull, p) {
            continue;
        }
        if hull_contains(&hull, &-*p) {
            return Err(GeometryError::NotInHemisphere);
        }
        let n = hull.len();
        let visible: Vec<bool> = (0..n)
            .map(|i| orientation(&hull[i], &hull[(i + 1) % n], p) != Direction::CounterClockwise)
            .collect();
        // The visible edges form a single run s..=e.
        let starts: Vec<usize> = (0..n)
            .filter(|&i| visible[i] && !visible[(i + n - 1) % n])
            .collect();
        if starts.len() != 1 {
            return Err(GeometryError::NotInHemisphere);
        }
        let s = starts[0];
        let mut e = s;
        while visible[(e + 1) % n] {
            e = (e + 1) % n;
        }
        let mut next = Vec::with_capacity(n + 1);
        let mut i = (e + 1) % n;
        loop {
            next.push(hull[i]);
            if i == s {
                break;
            }
            i = (i + 1) % n;
        }
        next.push(*p);
        trace!(
            removed = n + 1 - next.len(),
            vertices = next.len(),
            "grew convex hull"
        );
        hull = next;
    }
    Ok(hull)
}

const HEADER_LEN: usize = 5;
const VERTEX_LEN: usize = 24;

impl ConvexPolygon {
    /// The type code of an encoded ConvexPolygon.
    pub const TYPE_CODE: u8 = b'p';

    /// Returns the convex hull of the given points.
    ///
    /// Duplicate points and points inside the hull (including those on its
    /// edges) are discarded, and the result does not depend on the order
    /// of the input. An error is returned if fewer than 3 distinct points
    /// are given, if all points lie on one great circle, or if the points
    /// do not fit inside an open hemisphere.
    pub fn convex_hull(points: &[Point]) -> Result<Self> {
        match compute_hull(points) {
            Ok(vertices) => Ok(ConvexPolygon { vertices }),
            Err(e) => {
                debug!(num_points = points.len(), error = %e, "rejected convex hull");
                Err(e.into())
            }
        }
    }

    /// Returns the triangle with the given vertices without validating
    /// them.
    ///
    /// # Safety
    ///
    /// The vertices must be distinct and (v0, v1, v2) must be
    /// counter-clockwise. Violating this yields a polygon whose queries
    /// return meaningless results.
    pub unsafe fn triangle_unchecked(v0: Point, v1: Point, v2: Point) -> Self {
        ConvexPolygon {
            vertices: vec![v0, v1, v2],
        }
    }

    /// Returns the quadrilateral with the given vertices without
    /// validating them.
    ///
    /// # Safety
    ///
    /// The vertices must be distinct and every consecutive triple
    /// (v0, v1, v2), (v1, v2, v3), (v2, v3, v0) and (v3, v0, v1) must be
    /// counter-clockwise. Violating this yields a polygon whose queries
    /// return meaningless results.
    pub unsafe fn quad_unchecked(v0: Point, v1: Point, v2: Point, v3: Point) -> Self {
        ConvexPolygon {
            vertices: vec![v0, v1, v2, v3],
        }
    }

    /// Returns the vertices in counter-clockwise order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Returns the centroid of the polygon surface projected onto the unit
    /// sphere.
    pub fn centroid(&self) -> Point {
        let sum = self.edges().fold(Vector::default(), |acc, (a, b)| {
            let n = a.cross(b);
            let len = n.norm();
            if len == 0.0 {
                return acc;
            }
            acc + n * (len.atan2(a.dot(b)) / len)
        });
        Point(sum.normalize())
    }

    /// Reports whether the closed polygon contains p. The test is exact.
    pub fn contains_point(&self, p: &Point) -> bool {
        hull_contains(&self.vertices, p)
    }

    /// Reports whether the polygon contains every point of other.
    pub fn contains_polygon(&self, other: &ConvexPolygon) -> bool {
        other.vertices.iter().all(|v| self.contains_point(v))
    }

    /// Reports whether any edge of the polygon crosses an edge of other
    /// at a point interior to both.
    fn edges_cross(&self, other: &ConvexPolygon) -> bool {
        self.edges()
            .any(|(a, b)| other.edges().any(|(c, d)| crossing_sign(a, b, c, d)))
    }

    pub(crate) fn relate_polygon(&self, other: &ConvexPolygon) -> Relationship {
        if self.contains_polygon(other) {
            return Relationship::Contains;
        }
        if other.contains_polygon(self) {
            return Relationship::Within;
        }
        if other.vertices.iter().any(|v| self.contains_point(v))
            || self.vertices.iter().any(|v| other.contains_point(v))
            || self.edges_cross(other)
        {
            return Relationship::Intersects;
        }
        Relationship::Disjoint
    }

    pub(crate) fn relate_circle(&self, c: &Circle) -> Relationship {
        if c.is_empty() {
            return Relationship::Disjoint;
        }
        if c.is_full() {
            return Relationship::Within;
        }
        let r = c.opening_angle.rad();
        let inside = self
            .vertices
            .iter()
            .filter(|v| c.contains_point(v))
            .count();
        if inside == self.vertices.len() {
            if r <= FRAC_PI_2 {
                return Relationship::Within;
            }
            // A circle wider than a hemisphere is not convex; the polygon
            // is within it only if it misses the open complement.
            let hole = c.complement();
            let reaches_hole = self.contains_point(&hole.center)
                || self
                    .edges()
                    .any(|(a, b)| distance_from_edge(&hole.center, a, b).rad() < hole.opening_angle.rad());
            if reaches_hole {
                return Relationship::Intersects;
            }
            return Relationship::Within;
        }
        if inside > 0 {
            return Relationship::Intersects;
        }
        if self
            .edges()
            .any(|(a, b)| distance_from_edge(&c.center, a, b).rad() <= r)
        {
            return Relationship::Intersects;
        }
        if self.contains_point(&c.center) {
            return Relationship::Contains;
        }
        Relationship::Disjoint
    }

    pub(crate) fn relate_rect(&self, r: &Rect) -> Relationship {
        if r.is_empty() {
            return Relationship::Disjoint;
        }
        let bbox = self.bounding_box();
        if !bbox.intersects(r) {
            return Relationship::Disjoint;
        }
        if r.contains_rect(&bbox) {
            return Relationship::Within;
        }
        Relationship::Intersects
    }

    pub(crate) fn relate_ellipse(&self, e: &Ellipse) -> Relationship {
        let outer = self.relate_circle(&e.bounding_circle());
        if outer.is_disjoint() || outer == Relationship::Contains {
            return outer;
        }
        if self.relate_circle(&e.inscribed_circle()) == Relationship::Within {
            return Relationship::Within;
        }
        Relationship::Intersects
    }

    /// Decodes a ConvexPolygon from its binary encoding. Vertex coordinates
    /// are restored exactly as encoded and must all be finite.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode_region(data, ConvexPolygon::TYPE_CODE, |mut d| {
            let count = d.get_u32()? as usize;
            let expected = count
                .checked_mul(VERTEX_LEN)
                .and_then(|n| n.checked_add(HEADER_LEN))
                .unwrap_or(usize::MAX);
            d.expect_len(expected)?;
            if count < 3 {
                return Err(DecodeError::Degenerate);
            }
            let vertices = (0..count)
                .map(|_| d.get_vector().map(Point))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if vertices
                .iter()
                .any(|v| !v.0.to_array().iter().all(|c| c.is_finite()))
            {
                return Err(DecodeError::Degenerate);
            }
            Ok(ConvexPolygon { vertices })
        })
    }

    // Returns the range of p·axis over all points p of the polygon. The
    // extremes lie on the boundary unless the polygon contains ±axis.
    fn axis_range(&self, axis: Vector) -> r1::interval::Interval {
        let i = self
            .edges()
            .fold(r1::interval::EMPTY, |acc, (a, b)| acc.union(&edge_axis_interval(a, b, &axis)));
        let hi = if self.contains_point(&Point(axis)) { 1.0 } else { i.hi.min(1.0) };
        let lo = if self.contains_point(&Point(-axis)) { -1.0 } else { i.lo.max(-1.0) };
        r1::interval::Interval::new(lo, hi)
    }

    // Returns the vertices sorted into a canonical order.
    fn sorted_vertices(&self) -> Vec<Point> {
        let mut v: Vec<Point> = self.vertices.iter().map(without_negative_zero).collect();
        v.sort_by(Point::total_cmp);
        v
    }
}

impl PartialEq for ConvexPolygon {
    fn eq(&self, other: &ConvexPolygon) -> bool {
        self.vertices.len() == other.vertices.len()
            && self
                .sorted_vertices()
                .iter()
                .zip(other.sorted_vertices().iter())
                .all(|(a, b)| a == b)
    }
}

impl Region for ConvexPolygon {
    fn clone_region(&self) -> Box<dyn Region> {
        Box::new(self.clone())
    }

    fn bounding_box(&self) -> Rect {
        let zs = self.axis_range(Vector::new(0.0, 0.0, 1.0));
        let lat = r1::interval::Interval::new(zs.lo.asin(), zs.hi.asin());

        let lng = if lat.lo <= -FRAC_PI_2 || lat.hi >= FRAC_PI_2 {
            s1::interval::FULL
        } else {
            // Longitude changes monotonically along an edge that misses
            // the poles, so unwrapping the per-edge deltas traces the range.
            let lng0 = LatLng::longitude(&self.vertices[0]).rad();
            let (mut acc, mut lo, mut hi) = (0.0f64, 0.0f64, 0.0f64);
            for (a, b) in self.edges() {
                let delta = libm::remainder(
                    LatLng::longitude(b).rad() - LatLng::longitude(a).rad(),
                    2.0 * PI,
                );
                acc += delta;
                lo = lo.min(acc);
                hi = hi.max(acc);
            }
            if hi - lo >= 2.0 * PI {
                s1::interval::FULL
            } else {
                s1::interval::Interval::from_endpoints(lng0 + lo, lng0 + hi)
            }
        };
        Rect::new(lat, lng).dilated_by(BOUNDING_BOX_DILATION)
    }

    fn bounding_box3d(&self) -> Box3d {
        Box3d::new(
            self.axis_range(Vector::new(1.0, 0.0, 0.0)),
            self.axis_range(Vector::new(0.0, 1.0, 0.0)),
            self.axis_range(Vector::new(0.0, 0.0, 1.0)),
        )
        .dilated_by(BOUNDING_BOX3D_PADDING)
    }

    fn bounding_circle(&self) -> Circle {
        let center = self.centroid();
        let antipode = -center;
        // The farthest point of an edge from the center is the point of the
        // edge closest to the antipode.
        let radius = self
            .edges()
            .map(|(a, b)| PI - distance_from_edge(&antipode, a, b).rad())
            .chain(self.vertices.iter().map(|v| center.distance(v).rad()))
            .fold(0.0f64, f64::max);
        Circle::new(center, Rad(next_up(radius + BOUNDING_CIRCLE_PADDING)).into())
    }

    fn contains(&self, p: &Point) -> bool {
        self.contains_point(p)
    }

    fn relate(&self, other: &dyn Region) -> Relationship {
        match other.shape() {
            Some(Shape::ConvexPolygon(p)) => self.relate_polygon(p),
            Some(Shape::Circle(c)) => self.relate_circle(c),
            Some(Shape::Rect(r)) => self.relate_rect(r),
            Some(Shape::Ellipse(e)) => self.relate_ellipse(e),
            None => other.relate(self).invert(),
        }
    }

    fn encode(&self) -> Vec<u8> {
        let mut e = Encoder::new(
            ConvexPolygon::TYPE_CODE,
            HEADER_LEN + VERTEX_LEN * self.vertices.len(),
        );
        e.put_u32(self.vertices.len() as u32);
        for v in &self.vertices {
            e.put_vector(&v.0);
        }
        e.finish()
    }

    fn shape(&self) -> Option<Shape<'_>> {
        Some(Shape::ConvexPolygon(self))
    }
}

impl fmt::Display for ConvexPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConvexPolygon([")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "])")
    }
}
