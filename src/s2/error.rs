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

use std::error;
use std::fmt;

/// GeometryError describes why a region could not be constructed from a
/// set of points.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GeometryError {
    /// Fewer than 3 distinct points were supplied.
    TooFewPoints,
    /// All points lie on a single great circle.
    Coplanar,
    /// The points do not fit inside an open hemisphere, so their hull would
    /// contain a pair of antipodal points.
    NotInHemisphere,
}

/// DecodeError describes why a byte string could not be decoded into a
/// region.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeError {
    /// The buffer ended before a complete header or value.
    Truncated { needed: usize, found: usize },
    /// The leading byte names a different region type.
    TypeCode { expected: u8, found: u8 },
    /// The leading byte names no known region type.
    UnknownTypeCode(u8),
    /// The buffer length disagrees with the length implied by its header.
    LengthMismatch { expected: usize, found: usize },
    /// The encoded region cannot be valid, e.g. a polygon with fewer than
    /// 3 vertices.
    Degenerate,
}

/// Error represents errors that can occur in region operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    Geometry(GeometryError),
    Decode(DecodeError),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::TooFewPoints => write!(f, "fewer than 3 distinct points"),
            GeometryError::Coplanar => write!(f, "all points lie on one great circle"),
            GeometryError::NotInHemisphere => {
                write!(f, "points do not fit inside an open hemisphere")
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { needed, found } => {
                write!(f, "truncated input: need {} bytes, found {}", needed, found)
            }
            DecodeError::TypeCode { expected, found } => write!(
                f,
                "wrong type code: expected {:?}, found {:?}",
                *expected as char, *found as char
            ),
            DecodeError::UnknownTypeCode(code) => write!(f, "unknown type code {:#04x}", code),
            DecodeError::LengthMismatch { expected, found } => write!(
                f,
                "length mismatch: expected {} bytes, found {}",
                expected, found
            ),
            DecodeError::Degenerate => write!(f, "encoded region is degenerate"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Geometry(e) => write!(f, "invalid geometry: {}", e),
            Error::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl error::Error for GeometryError {}

impl error::Error for DecodeError {}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Geometry(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

/// Result type for region operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        let e: Error = GeometryError::Coplanar.into();
        assert_eq!(e.to_string(), "invalid geometry: all points lie on one great circle");
        let e: Error = DecodeError::TypeCode {
            expected: b'p',
            found: b'x',
        }
        .into();
        assert_eq!(e.to_string(), "decode error: wrong type code: expected 'p', found 'x'");
        assert_eq!(
            DecodeError::UnknownTypeCode(0x7f).to_string(),
            "unknown type code 0x7f"
        );
        assert!(e.source().is_some());
    }
}
