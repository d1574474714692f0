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

//! Little-endian encoding helpers shared by the region types.
//!
//! Every encoded region starts with a one byte type code followed by a
//! fixed or counted body of little-endian fields.

use tracing::debug;

use crate::r3::vector::Vector;
use crate::s2::error::{DecodeError, Error};

/// Decodes a region with the given type code, logging failures.
pub(crate) fn decode_region<'a, T, F>(data: &'a [u8], type_code: u8, body: F) -> Result<T, Error>
where
    F: FnOnce(Decoder<'a>) -> Result<T, DecodeError>,
{
    Decoder::new(data, type_code).and_then(body).map_err(|e| {
        debug!(
            type_code = %(type_code as char),
            len = data.len(),
            error = %e,
            "failed to decode region"
        );
        Error::from(e)
    })
}

/// Encoder accumulates the encoding of a single region.
pub(crate) struct Encoder {
    data: Vec<u8>,
}

impl Encoder {
    /// Starts an encoding with the given type code and total length.
    pub fn new(type_code: u8, len: usize) -> Self {
        let mut data = Vec::with_capacity(len);
        data.push(type_code);
        Encoder { data }
    }

    pub fn put_u32(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_f64(&mut self, v: f64) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn put_vector(&mut self, v: &Vector) {
        self.put_f64(v.x);
        self.put_f64(v.y);
        self.put_f64(v.z);
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Decoder reads the fields of a single encoded region.
pub(crate) struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Checks the type code of data and positions the decoder after it.
    pub fn new(data: &'a [u8], type_code: u8) -> Result<Self, DecodeError> {
        match data.first() {
            None => Err(DecodeError::Truncated {
                needed: 1,
                found: 0,
            }),
            Some(&found) if found != type_code => Err(DecodeError::TypeCode {
                expected: type_code,
                found,
            }),
            Some(_) => Ok(Decoder { data, pos: 1 }),
        }
    }

    /// Checks that the whole buffer is exactly len bytes long.
    pub fn expect_len(&self, len: usize) -> Result<(), DecodeError> {
        if self.data.len() != len {
            return Err(DecodeError::LengthMismatch {
                expected: len,
                found: self.data.len(),
            });
        }
        Ok(())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos + N;
        let mut out = [0u8; N];
        match self.data.get(self.pos..end) {
            Some(bytes) => out.copy_from_slice(bytes),
            None => {
                return Err(DecodeError::Truncated {
                    needed: end,
                    found: self.data.len(),
                })
            }
        }
        self.pos = end;
        Ok(out)
    }

    pub fn get_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    pub fn get_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.take::<8>()?))
    }

    pub fn get_vector(&mut self) -> Result<Vector, DecodeError> {
        let x = self.get_f64()?;
        let y = self.get_f64()?;
        let z = self.get_f64()?;
        Ok(Vector { x, y, z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        let mut e = Encoder::new(b'x', 13);
        e.put_u32(1);
        e.put_f64(1.0);
        let data = e.finish();
        assert_eq!(data.len(), 13);
        assert_eq!(&data[..5], &[b'x', 1, 0, 0, 0]);
        assert_eq!(&data[5..], &1.0f64.to_le_bytes());

        let mut d = Decoder::new(&data, b'x').unwrap();
        d.expect_len(13).unwrap();
        assert_eq!(d.get_u32().unwrap(), 1);
        assert_eq!(d.get_f64().unwrap(), 1.0);
        assert_eq!(
            d.get_f64(),
            Err(DecodeError::Truncated {
                needed: 21,
                found: 13
            })
        );
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(
            Decoder::new(&[], b'x').err(),
            Some(DecodeError::Truncated {
                needed: 1,
                found: 0
            })
        );
        assert_eq!(
            Decoder::new(&[b'y'], b'x').err(),
            Some(DecodeError::TypeCode {
                expected: b'x',
                found: b'y'
            })
        );
        let d = Decoder::new(&[b'x', 0], b'x').unwrap();
        assert_eq!(
            d.expect_len(3),
            Err(DecodeError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
