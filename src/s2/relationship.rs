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

use std::fmt;

/// Relationship describes how two regions A and B relate, from the point
/// of view of A.
///
/// Relationships computed for shapes without an exact algorithm are
/// conservative: `Disjoint`, `Contains` and `Within` are only reported when
/// they are certain, and `Intersects` means the regions may overlap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Relationship {
    /// A and B have no points in common.
    Disjoint,
    /// A and B may have points in common, and neither is known to contain
    /// the other.
    Intersects,
    /// A contains every point of B.
    Contains,
    /// Every point of A is in B.
    Within,
}

impl Relationship {
    /// Returns the relationship from the point of view of the other region,
    /// swapping `Contains` and `Within`.
    pub fn invert(self) -> Self {
        match self {
            Relationship::Contains => Relationship::Within,
            Relationship::Within => Relationship::Contains,
            r => r,
        }
    }

    pub fn is_disjoint(self) -> bool {
        self == Relationship::Disjoint
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relationship::Disjoint => "DISJOINT",
            Relationship::Intersects => "INTERSECTS",
            Relationship::Contains => "CONTAINS",
            Relationship::Within => "WITHIN",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert() {
        assert_eq!(Relationship::Contains.invert(), Relationship::Within);
        assert_eq!(Relationship::Within.invert(), Relationship::Contains);
        assert_eq!(Relationship::Disjoint.invert(), Relationship::Disjoint);
        assert_eq!(Relationship::Intersects.invert(), Relationship::Intersects);
        for r in &[
            Relationship::Disjoint,
            Relationship::Intersects,
            Relationship::Contains,
            Relationship::Within,
        ] {
            assert_eq!(r.invert().invert(), *r);
        }
    }

    #[test]
    fn test_is_disjoint() {
        assert!(Relationship::Disjoint.is_disjoint());
        assert!(!Relationship::Intersects.is_disjoint());
        assert!(!Relationship::Within.invert().is_disjoint());
    }

    #[test]
    fn test_display() {
        assert_eq!(Relationship::Within.to_string(), "WITHIN");
    }
}
