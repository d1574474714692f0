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

use std::convert::TryInto;

use crate::r3::box3d::Box3d;
use crate::s2::circle::Circle;
use crate::s2::convex_polygon::ConvexPolygon;
use crate::s2::ellipse::Ellipse;
use crate::s2::error::DecodeError;
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::relationship::Relationship;

/// A Region represents a two-dimensional region on the unit sphere.
///
/// Every region can produce conservative bounding shapes of each kind,
/// test points for containment, relate itself to any other region and
/// serialize itself to a byte string whose first byte identifies its
/// type.
#[enum_delegate::register]
pub trait Region {
    /// Returns an independent copy of the region.
    fn clone_region(&self) -> Box<dyn Region>;

    /// Returns a longitude/latitude box that contains the region.
    fn bounding_box(&self) -> Rect;

    /// Returns a 3-D axis-aligned box that contains the region.
    fn bounding_box3d(&self) -> Box3d;

    /// Returns a circle that contains the region.
    fn bounding_circle(&self) -> Circle;

    /// Reports whether the region contains the given point.
    fn contains(&self, p: &Point) -> bool;

    /// Returns the relationship between this region and other.
    ///
    /// Implementations handle every kind exposed through [`Shape`]
    /// directly and fall back to `other.relate(self).invert()` for
    /// anything else.
    fn relate(&self, other: &dyn Region) -> Relationship;

    /// Returns the binary encoding of the region.
    fn encode(&self) -> Vec<u8>;

    /// Exposes the concrete kind of the region for relationship dispatch.
    /// Regions outside the closed set of kinds return None.
    fn shape(&self) -> Option<Shape<'_>> {
        None
    }
}

/// Shape is a borrowed view of one of the region kinds that every region
/// knows how to relate itself to directly.
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Rect(&'a Rect),
    Circle(&'a Circle),
    ConvexPolygon(&'a ConvexPolygon),
    Ellipse(&'a Ellipse),
}

/// AnyRegion owns a region of any of the known kinds.
#[enum_delegate::implement(Region)]
#[derive(Clone, PartialEq, Debug)]
pub enum AnyRegion {
    Rect(Rect),
    Circle(Circle),
    ConvexPolygon(ConvexPolygon),
    Ellipse(Ellipse),
}

impl AnyRegion {
    /// Decodes a region of any known kind, dispatching on the leading type
    /// code.
    pub fn decode(data: &[u8]) -> crate::s2::error::Result<AnyRegion> {
        match data.first() {
            None => Err(DecodeError::Truncated {
                needed: 1,
                found: 0,
            }
            .into()),
            Some(&Rect::TYPE_CODE) => Ok(AnyRegion::Rect(Rect::decode(data)?)),
            Some(&Circle::TYPE_CODE) => Ok(AnyRegion::Circle(Circle::decode(data)?)),
            Some(&ConvexPolygon::TYPE_CODE) => {
                Ok(AnyRegion::ConvexPolygon(ConvexPolygon::decode(data)?))
            }
            Some(&Ellipse::TYPE_CODE) => Ok(AnyRegion::Ellipse(Ellipse::decode(data)?)),
            Some(&code) => {
                tracing::debug!(code, len = data.len(), "unknown region type code");
                Err(DecodeError::UnknownTypeCode(code).into())
            }
        }
    }
}
