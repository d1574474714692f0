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

//! Morton (z-order) bit interleaving.
//!
//! On `x86_64` both coordinates are spread in a single SSE2 register; all
//! other targets, and builds with the `portable` feature, use the scalar
//! shift-or-mask sequence. The two paths produce identical results.

/// morton_index interleaves the bits of x and y.
///
/// The 32 even bits of the return value are the bits of x, and the 32 odd
/// bits those of y. This is the z-value of (x, y) in Morton order.
#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
#[inline]
pub fn morton_index(x: u32, y: u32) -> u64 {
    // SAFETY: SSE2 is part of the x86_64 baseline.
    unsafe { morton_index_sse2(x, y) }
}

/// morton_index interleaves the bits of x and y.
///
/// The 32 even bits of the return value are the bits of x, and the 32 odd
/// bits those of y. This is the z-value of (x, y) in Morton order.
#[cfg(not(all(target_arch = "x86_64", not(feature = "portable"))))]
#[inline]
pub fn morton_index(x: u32, y: u32) -> u64 {
    morton_index_portable(x, y)
}

/// morton_index_inverse separates the even and odd bits of z.
///
/// The even bits of z are returned as the first element of the result and
/// the odd bits as the second. This is the inverse of morton_index.
#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
#[inline]
pub fn morton_index_inverse(z: u64) -> (u32, u32) {
    // SAFETY: SSE2 is part of the x86_64 baseline.
    unsafe { morton_index_inverse_sse2(z) }
}

/// morton_index_inverse separates the even and odd bits of z.
///
/// The even bits of z are returned as the first element of the result and
/// the odd bits as the second. This is the inverse of morton_index.
#[cfg(not(all(target_arch = "x86_64", not(feature = "portable"))))]
#[inline]
pub fn morton_index_inverse(z: u64) -> (u32, u32) {
    morton_index_inverse_portable(z)
}

// A 64-bit extension of
// http://graphics.stanford.edu/~seander/bithacks.html#InterleaveBMN
#[inline]
#[cfg_attr(all(target_arch = "x86_64", not(feature = "portable")), allow(dead_code))]
pub(crate) fn morton_index_portable(x: u32, y: u32) -> u64 {
    let mut a = x as u64;
    let mut b = y as u64;
    a = (a | (a << 16)) & 0x0000_ffff_0000_ffff;
    b = (b | (b << 16)) & 0x0000_ffff_0000_ffff;
    a = (a | (a << 8)) & 0x00ff_00ff_00ff_00ff;
    b = (b | (b << 8)) & 0x00ff_00ff_00ff_00ff;
    a = (a | (a << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    b = (b | (b << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    a = (a | (a << 2)) & 0x3333_3333_3333_3333;
    b = (b | (b << 2)) & 0x3333_3333_3333_3333;
    a = (a | (a << 1)) & 0x5555_5555_5555_5555;
    b = (b | (b << 1)) & 0x5555_5555_5555_5555;
    a | (b << 1)
}

#[inline]
#[cfg_attr(all(target_arch = "x86_64", not(feature = "portable")), allow(dead_code))]
pub(crate) fn morton_index_inverse_portable(z: u64) -> (u32, u32) {
    let mut x = z & 0x5555_5555_5555_5555;
    let mut y = (z >> 1) & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    y = (y | (y >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    y = (y | (y >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    y = (y | (y >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x >> 8)) & 0x0000_ffff_0000_ffff;
    y = (y | (y >> 8)) & 0x0000_ffff_0000_ffff;
    ((x | (x >> 16)) as u32, (y | (y >> 16)) as u32)
}

// Both coordinates travel through the same spreading sequence, one per
// 64-bit lane. Masks are given per 32-bit element, so they repeat across
// each lane.
#[cfg(target_arch = "x86_64")]
#[cfg_attr(feature = "portable", allow(dead_code))]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn morton_index_sse2(x: u32, y: u32) -> u64 {
    use std::arch::x86_64::*;

    let mut xy = _mm_set_epi64x(y as i64, x as i64);
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_slli_epi64::<16>(xy)),
        _mm_set1_epi32(0x0000_ffff),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_slli_epi64::<8>(xy)),
        _mm_set1_epi32(0x00ff_00ff),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_slli_epi64::<4>(xy)),
        _mm_set1_epi32(0x0f0f_0f0f),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_slli_epi64::<2>(xy)),
        _mm_set1_epi32(0x3333_3333),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_slli_epi64::<1>(xy)),
        _mm_set1_epi32(0x5555_5555),
    );
    let hi = _mm_unpackhi_epi64(xy, _mm_setzero_si128());
    let r = _mm_or_si128(xy, _mm_slli_epi64::<1>(hi));
    _mm_cvtsi128_si64(r) as u64
}

#[cfg(target_arch = "x86_64")]
#[cfg_attr(feature = "portable", allow(dead_code))]
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn morton_index_inverse_sse2(z: u64) -> (u32, u32) {
    use std::arch::x86_64::*;

    let mut xy = _mm_set_epi64x((z >> 1) as i64, z as i64);
    xy = _mm_and_si128(xy, _mm_set1_epi32(0x5555_5555));
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_srli_epi64::<1>(xy)),
        _mm_set1_epi32(0x3333_3333),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_srli_epi64::<2>(xy)),
        _mm_set1_epi32(0x0f0f_0f0f),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_srli_epi64::<4>(xy)),
        _mm_set1_epi32(0x00ff_00ff),
    );
    xy = _mm_and_si128(
        _mm_or_si128(xy, _mm_srli_epi64::<8>(xy)),
        _mm_set1_epi32(0x0000_ffff),
    );
    xy = _mm_or_si128(xy, _mm_srli_epi64::<16>(xy));
    // Gather the low 32-bit element of each lane into the low 64 bits.
    let r = _mm_cvtsi128_si64(_mm_shuffle_epi32::<0b00_00_10_00>(xy)) as u64;
    (r as u32, (r >> 32) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_morton_index() {
        assert_eq!(morton_index(0, 0), 0);
        assert_eq!(morton_index(5, 2), 25);
        assert_eq!(morton_index(1, 0), 1);
        assert_eq!(morton_index(0, 1), 2);
        assert_eq!(morton_index(u32::MAX, 0), 0x5555_5555_5555_5555);
        assert_eq!(morton_index(0, u32::MAX), 0xaaaa_aaaa_aaaa_aaaa);
        assert_eq!(morton_index(u32::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn test_morton_index_inverse() {
        assert_eq!(morton_index_inverse(25), (5, 2));
        assert_eq!(morton_index_inverse(0x5555_5555_5555_5555), (u32::MAX, 0));
        assert_eq!(morton_index_inverse(0xaaaa_aaaa_aaaa_aaaa), (0, u32::MAX));
        assert_eq!(morton_index_inverse(u64::MAX), (u32::MAX, u32::MAX));
    }

    proptest! {
        #[test]
        fn prop_morton_round_trip(x in any::<u32>(), y in any::<u32>()) {
            prop_assert_eq!(morton_index_inverse(morton_index(x, y)), (x, y));
        }

        #[test]
        fn prop_morton_inverse_round_trip(z in any::<u64>()) {
            let (x, y) = morton_index_inverse(z);
            prop_assert_eq!(morton_index(x, y), z);
        }

        #[test]
        fn prop_morton_bit_placement(x in any::<u32>(), y in any::<u32>()) {
            let z = morton_index_portable(x, y);
            for i in 0..32 {
                prop_assert_eq!((z >> (2 * i)) & 1, ((x >> i) & 1) as u64);
                prop_assert_eq!((z >> (2 * i + 1)) & 1, ((y >> i) & 1) as u64);
            }
        }
    }

    #[cfg(target_arch = "x86_64")]
    proptest! {
        #[test]
        fn prop_sse2_matches_portable(x in any::<u32>(), y in any::<u32>(), z in any::<u64>()) {
            // SAFETY: SSE2 is part of the x86_64 baseline.
            unsafe {
                prop_assert_eq!(morton_index_sse2(x, y), morton_index_portable(x, y));
                prop_assert_eq!(
                    morton_index_inverse_sse2(z),
                    morton_index_inverse_portable(z)
                );
            }
        }
    }
}
