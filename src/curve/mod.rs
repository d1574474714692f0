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

//! Space-filling curves over the 2-D integer grid.
//!
//! Points with non-negative integer coordinates are mapped to and from their
//! Morton (z-order) and Hilbert indexes. The Morton index is a plain bit
//! interleave; the Hilbert index is derived from it with a table driven
//! finite-state transducer (see [`hilbert`]).
//!
//! Every function in this module is pure, allocation free and runs in time
//! that depends only on the curve order, so they are safe to call from any
//! thread and on hot paths.

pub mod hilbert;
pub mod morton;

pub use self::hilbert::{
    hilbert_index, hilbert_index_inverse, hilbert_to_morton, morton_to_hilbert,
};
pub use self::morton::{morton_index, morton_index_inverse};

/// The maximum supported curve order. A curve of order m covers the
/// `2^m x 2^m` grid, so coordinates must fit in 32 bits.
pub const MAX_ORDER: u32 = 32;

// Minimal perfect hash tables for powers of two (64-bit) and for values of
// the form 2^k - 1 (32-bit). See "Using de Bruijn Sequences to Index a 1 in
// a Computer Word" by Leiserson, Prokop and Randall.
#[repr(align(64))]
struct PerfectHash64([u8; 64]);

#[repr(align(32))]
struct PerfectHash32([u8; 32]);

static PERFECT_HASH_TABLE_64: PerfectHash64 = PerfectHash64([
    0, 1, 2, 7, 3, 13, 8, 19, 4, 25, 14, 28, 9, 34, 20, 40, //
    5, 17, 26, 38, 15, 46, 29, 48, 10, 31, 35, 54, 21, 50, 41, 57, //
    63, 6, 12, 18, 24, 27, 33, 39, 16, 37, 45, 47, 30, 53, 49, 56, //
    62, 11, 23, 32, 36, 44, 52, 55, 61, 22, 43, 51, 60, 42, 59, 58,
]);

static PERFECT_HASH_TABLE_32: PerfectHash32 = PerfectHash32([
    0, 9, 1, 10, 13, 21, 2, 29, 11, 14, 16, 18, 22, 25, 3, 30, //
    8, 12, 20, 28, 15, 17, 24, 7, 19, 27, 23, 6, 26, 5, 4, 31,
]);

const DE_BRUIJN_SEQUENCE_64: u64 = 0x0218_a392_cd3d_5dbf;
const DE_BRUIJN_SEQUENCE_32: u32 = 0x07c4_acdd;

/// MostSignificantBit is implemented by the unsigned integer widths that
/// support a branch-free most significant bit lookup.
pub trait MostSignificantBit: Copy {
    /// Returns the index of the most significant 1 bit, or 0 if the value
    /// is 0.
    fn most_significant_bit_index(self) -> u8;
}

impl MostSignificantBit for u64 {
    #[inline]
    fn most_significant_bit_index(self) -> u8 {
        let mut x = self;
        // Set every bit below the MSB, then subtract them away.
        x |= x >> 1;
        x |= x >> 2;
        x |= x >> 4;
        x |= x >> 8;
        x |= x >> 16;
        x |= x >> 32;
        x -= x >> 1;
        // Multiplying by a power of two shifts the sequence left by the MSB
        // index, and the top 6 bits of the shifted de Bruijn sequence are
        // distinct for every shift amount.
        PERFECT_HASH_TABLE_64.0[(DE_BRUIJN_SEQUENCE_64.wrapping_mul(x) >> 58) as usize]
    }
}

impl MostSignificantBit for u32 {
    #[inline]
    fn most_significant_bit_index(self) -> u8 {
        let mut x = self;
        x |= x >> 1;
        x |= x >> 2;
        x |= x >> 4;
        x |= x >> 8;
        x |= x >> 16;
        PERFECT_HASH_TABLE_32.0[(DE_BRUIJN_SEQUENCE_32.wrapping_mul(x) >> 27) as usize]
    }
}

/// most_significant_bit_index returns the index of the most significant 1
/// bit in x. If x is 0, the return value is 0.
#[inline]
pub fn most_significant_bit_index<T: MostSignificantBit>(x: T) -> u8 {
    x.most_significant_bit_index()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_msb_zero() {
        assert_eq!(most_significant_bit_index(0u32), 0);
        assert_eq!(most_significant_bit_index(0u64), 0);
    }

    #[test]
    fn test_msb_powers_of_two() {
        for i in 0..64 {
            assert_eq!(most_significant_bit_index(1u64 << i), i as u8);
            assert_eq!(most_significant_bit_index((1u64 << i) | 1), i as u8);
            assert_eq!(most_significant_bit_index(u64::MAX >> (63 - i)), i as u8);
        }
        for i in 0..32 {
            assert_eq!(most_significant_bit_index(1u32 << i), i as u8);
            assert_eq!(most_significant_bit_index(u32::MAX >> (31 - i)), i as u8);
        }
    }

    proptest! {
        #[test]
        fn prop_msb_u64(x in 1u64..=u64::MAX) {
            prop_assert_eq!(x.most_significant_bit_index() as u32, 63 - x.leading_zeros());
        }

        #[test]
        fn prop_msb_u32(x in 1u32..=u32::MAX) {
            prop_assert_eq!(x.most_significant_bit_index() as u32, 31 - x.leading_zeros());
        }
    }
}
