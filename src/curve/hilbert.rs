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

//! Hilbert curve indexes.
//!
//! The implementation follows Algorithm 2 of C. Hamilton, "Compact Hilbert
//! indices", Dalhousie University technical report CS-2006-07, with the
//! dimension fixed at 2.
//!
//! Each iteration of the algorithm consumes one 2-bit symbol of the Morton
//! index and updates a state made of the entry point e and direction d, both
//! of which fit in a single bit. One iteration is therefore a lookup in a
//! 16 entry table of nibbles, which fits in a single u64 constant
//! ([`HILBERT_LUT_1`]).
//!
//! The fast path runs three iterations at once: the state (2 bits) and the
//! next 6 input bits index a 256 byte table whose entries hold the 6 output
//! bits in the low bits and the next state in the top 2 bits. The table
//! spans 4 cache lines, so it becomes cache resident almost immediately.

/// Single step Morton to Hilbert transition table. Nibble `i` (state in
/// bits 2-3, input symbol in bits 0-1) holds the next state and the output
/// symbol.
pub const HILBERT_LUT_1: u64 = 0x8d3e_c79a_6b50_21f4;

/// Single step Hilbert to Morton transition table.
pub const HILBERT_INVERSE_LUT_1: u64 = 0x1ceb_689f_a750_d324;

#[repr(align(64))]
struct Lut([u8; 256]);

static HILBERT_LUT_3: Lut = Lut([
    0x40, 0xc3, 0x01, 0x02, 0x04, 0x45, 0x87, 0x46, //
    0x8e, 0x8d, 0x4f, 0xcc, 0x08, 0x49, 0x8b, 0x4a, //
    0xfa, 0x3b, 0xf9, 0xb8, 0x7c, 0xff, 0x3d, 0x3e, //
    0xf6, 0x37, 0xf5, 0xb4, 0xb2, 0xb1, 0x73, 0xf0, //
    0x10, 0x51, 0x93, 0x52, 0xde, 0x1f, 0xdd, 0x9c, //
    0x54, 0xd7, 0x15, 0x16, 0x58, 0xdb, 0x19, 0x1a, //
    0x20, 0x61, 0xa3, 0x62, 0xee, 0x2f, 0xed, 0xac, //
    0x64, 0xe7, 0x25, 0x26, 0x68, 0xeb, 0x29, 0x2a, //
    0x00, 0x41, 0x83, 0x42, 0xce, 0x0f, 0xcd, 0x8c, //
    0x44, 0xc7, 0x05, 0x06, 0x48, 0xcb, 0x09, 0x0a, //
    0x50, 0xd3, 0x11, 0x12, 0x14, 0x55, 0x97, 0x56, //
    0x9e, 0x9d, 0x5f, 0xdc, 0x18, 0x59, 0x9b, 0x5a, //
    0xba, 0xb9, 0x7b, 0xf8, 0xb6, 0xb5, 0x77, 0xf4, //
    0x3c, 0x7d, 0xbf, 0x7e, 0xf2, 0x33, 0xf1, 0xb0, //
    0x60, 0xe3, 0x21, 0x22, 0x24, 0x65, 0xa7, 0x66, //
    0xae, 0xad, 0x6f, 0xec, 0x28, 0x69, 0xab, 0x6a, //
    0xaa, 0xa9, 0x6b, 0xe8, 0xa6, 0xa5, 0x67, 0xe4, //
    0x2c, 0x6d, 0xaf, 0x6e, 0xe2, 0x23, 0xe1, 0xa0, //
    0x9a, 0x99, 0x5b, 0xd8, 0x96, 0x95, 0x57, 0xd4, //
    0x1c, 0x5d, 0x9f, 0x5e, 0xd2, 0x13, 0xd1, 0x90, //
    0x70, 0xf3, 0x31, 0x32, 0x34, 0x75, 0xb7, 0x76, //
    0xbe, 0xbd, 0x7f, 0xfc, 0x38, 0x79, 0xbb, 0x7a, //
    0xca, 0x0b, 0xc9, 0x88, 0x4c, 0xcf, 0x0d, 0x0e, //
    0xc6, 0x07, 0xc5, 0x84, 0x82, 0x81, 0x43, 0xc0, //
    0xea, 0x2b, 0xe9, 0xa8, 0x6c, 0xef, 0x2d, 0x2e, //
    0xe6, 0x27, 0xe5, 0xa4, 0xa2, 0xa1, 0x63, 0xe0, //
    0x30, 0x71, 0xb3, 0x72, 0xfe, 0x3f, 0xfd, 0xbc, //
    0x74, 0xf7, 0x35, 0x36, 0x78, 0xfb, 0x39, 0x3a, //
    0xda, 0x1b, 0xd9, 0x98, 0x5c, 0xdf, 0x1d, 0x1e, //
    0xd6, 0x17, 0xd5, 0x94, 0x92, 0x91, 0x53, 0xd0, //
    0x8a, 0x89, 0x4b, 0xc8, 0x86, 0x85, 0x47, 0xc4, //
    0x0c, 0x4d, 0x8f, 0x4e, 0xc2, 0x03, 0xc1, 0x80,
]);

static HILBERT_INVERSE_LUT_3: Lut = Lut([
    0x40, 0x02, 0x03, 0xc1, 0x04, 0x45, 0x47, 0x86, //
    0x0c, 0x4d, 0x4f, 0x8e, 0xcb, 0x89, 0x88, 0x4a, //
    0x20, 0x61, 0x63, 0xa2, 0x68, 0x2a, 0x2b, 0xe9, //
    0x6c, 0x2e, 0x2f, 0xed, 0xa7, 0xe6, 0xe4, 0x25, //
    0x30, 0x71, 0x73, 0xb2, 0x78, 0x3a, 0x3b, 0xf9, //
    0x7c, 0x3e, 0x3f, 0xfd, 0xb7, 0xf6, 0xf4, 0x35, //
    0xdf, 0x9d, 0x9c, 0x5e, 0x9b, 0xda, 0xd8, 0x19, //
    0x93, 0xd2, 0xd0, 0x11, 0x54, 0x16, 0x17, 0xd5, //
    0x00, 0x41, 0x43, 0x82, 0x48, 0x0a, 0x0b, 0xc9, //
    0x4c, 0x0e, 0x0f, 0xcd, 0x87, 0xc6, 0xc4, 0x05, //
    0x50, 0x12, 0x13, 0xd1, 0x14, 0x55, 0x57, 0x96, //
    0x1c, 0x5d, 0x5f, 0x9e, 0xdb, 0x99, 0x98, 0x5a, //
    0x70, 0x32, 0x33, 0xf1, 0x34, 0x75, 0x77, 0xb6, //
    0x3c, 0x7d, 0x7f, 0xbe, 0xfb, 0xb9, 0xb8, 0x7a, //
    0xaf, 0xee, 0xec, 0x2d, 0xe7, 0xa5, 0xa4, 0x66, //
    0xe3, 0xa1, 0xa0, 0x62, 0x28, 0x69, 0x6b, 0xaa, //
    0xff, 0xbd, 0xbc, 0x7e, 0xbb, 0xfa, 0xf8, 0x39, //
    0xb3, 0xf2, 0xf0, 0x31, 0x74, 0x36, 0x37, 0xf5, //
    0x9f, 0xde, 0xdc, 0x1d, 0xd7, 0x95, 0x94, 0x56, //
    0xd3, 0x91, 0x90, 0x52, 0x18, 0x59, 0x5b, 0x9a, //
    0x8f, 0xce, 0xcc, 0x0d, 0xc7, 0x85, 0x84, 0x46, //
    0xc3, 0x81, 0x80, 0x42, 0x08, 0x49, 0x4b, 0x8a, //
    0x60, 0x22, 0x23, 0xe1, 0x24, 0x65, 0x67, 0xa6, //
    0x2c, 0x6d, 0x6f, 0xae, 0xeb, 0xa9, 0xa8, 0x6a, //
    0xbf, 0xfe, 0xfc, 0x3d, 0xf7, 0xb5, 0xb4, 0x76, //
    0xf3, 0xb1, 0xb0, 0x72, 0x38, 0x79, 0x7b, 0xba, //
    0xef, 0xad, 0xac, 0x6e, 0xab, 0xea, 0xe8, 0x29, //
    0xa3, 0xe2, 0xe0, 0x21, 0x64, 0x26, 0x27, 0xe5, //
    0xcf, 0x8d, 0x8c, 0x4e, 0x8b, 0xca, 0xc8, 0x09, //
    0x83, 0xc2, 0xc0, 0x01, 0x44, 0x06, 0x07, 0xc5, //
    0x10, 0x51, 0x53, 0x92, 0x58, 0x1a, 0x1b, 0xd9, //
    0x5c, 0x1e, 0x1f, 0xdd, 0x97, 0xd6, 0xd4, 0x15,
]);

// Runs the 3-step transducer over the low 2m bits of v.
#[inline]
fn transduce(lut: &Lut, v: u64, m: u32) -> u64 {
    debug_assert!(m <= super::MAX_ORDER, "curve order {} out of range", m);
    let mut out = 0u64;
    let mut state = 0u64;
    let mut bits = 2 * m;
    while bits >= 6 {
        bits -= 6;
        let j = lut.0[(state | ((v >> bits) & 0x3f)) as usize];
        out = (out << 6) | (j & 0x3f) as u64;
        state = (j & 0xc0) as u64;
    }
    if bits != 0 {
        // 2 or 4 trailing bits: shift them to the top of a 6-bit group and
        // drop the surplus output bits.
        let r = 6 - bits;
        let j = lut.0[(state | ((v << r) & 0x3f)) as usize];
        out = (out << bits) | ((j & 0x3f) >> r) as u64;
    }
    out
}

// Runs the single step transducer over the low 2m bits of v.
#[inline]
fn transduce_stepwise(lut: u64, v: u64, m: u32) -> u64 {
    debug_assert!(m <= super::MAX_ORDER, "curve order {} out of range", m);
    let mut out = 0u64;
    let mut i = 0u64;
    let mut bits = 2 * m;
    while bits != 0 {
        bits -= 2;
        i = (i & 0xc) | ((v >> bits) & 3);
        i = (lut >> (i * 4)) & 0xf;
        out = (out << 2) | (i & 3);
    }
    out
}

/// morton_to_hilbert converts the 2m-bit Morton index z to the
/// corresponding Hilbert index. Bits of z above the low 2m are ignored.
#[inline]
pub fn morton_to_hilbert(z: u64, m: u32) -> u64 {
    transduce(&HILBERT_LUT_3, z, m)
}

/// hilbert_to_morton converts the 2m-bit Hilbert index h to the
/// corresponding Morton index. Bits of h above the low 2m are ignored.
#[inline]
pub fn hilbert_to_morton(h: u64, m: u32) -> u64 {
    transduce(&HILBERT_INVERSE_LUT_3, h, m)
}

/// morton_to_hilbert_stepwise is the reference form of morton_to_hilbert,
/// consuming one 2-bit symbol per iteration.
pub fn morton_to_hilbert_stepwise(z: u64, m: u32) -> u64 {
    transduce_stepwise(HILBERT_LUT_1, z, m)
}

/// hilbert_to_morton_stepwise is the reference form of hilbert_to_morton,
/// consuming one 2-bit symbol per iteration.
pub fn hilbert_to_morton_stepwise(h: u64, m: u32) -> u64 {
    transduce_stepwise(HILBERT_INVERSE_LUT_1, h, m)
}

/// hilbert_index returns the index of (x, y) on the order m Hilbert curve.
///
/// Only the m least significant bits of x and y are used, and m must not
/// exceed 32. The result lies in `[0, 4^m)`; for m = 0 it is always 0.
#[inline]
pub fn hilbert_index(x: u32, y: u32, m: u32) -> u64 {
    morton_to_hilbert(super::morton_index(x, y), m)
}

/// hilbert_index_inverse returns the point (x, y) with Hilbert index h on
/// the order m curve. Both coordinates are m bit integers.
#[inline]
pub fn hilbert_index_inverse(h: u64, m: u32) -> (u32, u32) {
    super::morton_index_inverse(hilbert_to_morton(h, m))
}
