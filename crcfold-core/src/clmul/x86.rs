//! x86_64 carry-less multiply using `PCLMULQDQ`.

use super::Clmul;
use crate::fold::{BARRETT_CONSTANTS, FOLD_CONSTANTS, split_head};
use crate::lane::{LANE_BYTES, Lane};
use core::arch::x86_64::*;

/// Capability token for `PCLMULQDQ`.
///
/// Only [`Pclmulqdq::new`] hands these out, after the CPU check passed.
#[derive(Debug, Clone, Copy)]
pub struct Pclmulqdq {
    _private: (),
}

impl Pclmulqdq {
    /// Check if PCLMULQDQ is available at runtime.
    #[inline]
    pub fn is_supported() -> bool {
        #[cfg(all(target_feature = "pclmulqdq", target_feature = "sse2"))]
        {
            true
        }
        #[cfg(not(all(target_feature = "pclmulqdq", target_feature = "sse2")))]
        {
            is_x86_feature_detected!("pclmulqdq") && is_x86_feature_detected!("sse2")
        }
    }

    /// Get a token if the CPU supports the instruction.
    #[inline]
    pub fn new() -> Option<Self> {
        Self::is_supported().then_some(Self { _private: () })
    }
}

impl Clmul for Pclmulqdq {
    #[inline(always)]
    fn clmul(self, a: u64, b: u64) -> Lane {
        // SAFETY: a token exists only after `is_supported()` returned true.
        unsafe { clmul_pclmulqdq(a, b) }
    }
}

/// Multiply two 64-bit polynomials with one `PCLMULQDQ`.
///
/// # Safety
///
/// Requires PCLMULQDQ and SSE2 support.
#[inline]
#[target_feature(enable = "pclmulqdq", enable = "sse2")]
unsafe fn clmul_pclmulqdq(a: u64, b: u64) -> Lane {
    unsafe {
        let va = _mm_set_epi64x(0, a as i64);
        let vb = _mm_set_epi64x(0, b as i64);
        let product = _mm_clmulepi64_si128(va, vb, 0x00);
        let lo = _mm_cvtsi128_si64(product) as u64;
        let hi = _mm_cvtsi128_si64(_mm_unpackhi_epi64(product, product)) as u64;
        Lane::new(lo, hi)
    }
}

#[inline(always)]
unsafe fn to_m128(lane: Lane) -> __m128i {
    unsafe { _mm_set_epi64x(lane.hi as i64, lane.lo as i64) }
}

#[inline(always)]
unsafe fn load_block(block: &[u8]) -> __m128i {
    debug_assert!(block.len() >= LANE_BYTES);
    // SAFETY: `block` holds at least 16 bytes; `loadu` has no alignment needs.
    unsafe { _mm_loadu_si128(block.as_ptr().cast::<__m128i>()) }
}

/// `clmul(x.lo, k.lo) ^ clmul(x.hi, k.hi)` in vector registers.
#[inline(always)]
unsafe fn fold_16(x: __m128i, k: __m128i) -> __m128i {
    unsafe {
        let h = _mm_clmulepi64_si128::<0x11>(x, k);
        let l = _mm_clmulepi64_si128::<0x00>(x, k);
        _mm_xor_si128(h, l)
    }
}

/// Run a whole fold step in `__m128i` registers.
///
/// Only the accumulator split is done on [`Lane`]; every block load, fold
/// and reduction stays in vector registers.
///
/// # Safety
///
/// Requires PCLMULQDQ and SSE2 support, and `data.len() >= 16`.
#[target_feature(enable = "pclmulqdq", enable = "sse2")]
pub(crate) unsafe fn fold_pclmulqdq(accumulator: u64, data: &[u8]) -> u64 {
    let (first, carry, rest) = split_head(accumulator, data);

    unsafe {
        let k = to_m128(FOLD_CONSTANTS);
        let mut x = to_m128(first);

        let mut blocks = rest.chunks_exact(LANE_BYTES);
        if let Some(block) = blocks.next() {
            x = _mm_xor_si128(_mm_xor_si128(fold_16(x, k), to_m128(carry)), load_block(block));
        }
        for block in blocks {
            x = _mm_xor_si128(fold_16(x, k), load_block(block));
        }

        // 128 -> 64 bits
        let r = _mm_xor_si128(_mm_clmulepi64_si128::<0x10>(x, k), _mm_srli_si128::<8>(x));

        // Barrett reduction
        let polymu = to_m128(BARRETT_CONSTANTS);
        let t1 = _mm_clmulepi64_si128::<0x00>(r, polymu);
        let t2 = _mm_xor_si128(
            _mm_xor_si128(_mm_clmulepi64_si128::<0x10>(t1, polymu), _mm_slli_si128::<8>(t1)),
            r,
        );

        !(_mm_cvtsi128_si64(_mm_srli_si128::<8>(t2)) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clmul::clmul_portable;

    #[test]
    fn test_matches_portable() {
        let Some(hw) = Pclmulqdq::new() else {
            println!("PCLMULQDQ not available, skipping");
            return;
        };

        let operands = [
            (0u64, 0u64),
            (1, u64::MAX),
            (u64::MAX, u64::MAX),
            (0x5a2d_8244_0f1e_3e50, 0xcae9_00d5_fed9_262f),
            (0xe05dd497ca393ae4, 0xdabe95afc7875f40),
        ];
        for (a, b) in operands {
            assert_eq!(hw.clmul(a, b), clmul_portable(a, b), "{:#x} * {:#x}", a, b);
        }
    }

    #[test]
    fn test_vector_fold_matches_lane_fold() {
        if !Pclmulqdq::is_supported() {
            println!("PCLMULQDQ not available, skipping");
            return;
        }

        let data: Vec<u8> = (0..700u32).map(|i| (i * 131 + 17) as u8).collect();
        for seed in [0, !0, 0xdeadbeef0badf00d] {
            for len in 16..=data.len() {
                let expected = crate::fold::fold_lanes(crate::clmul::Portable, seed, &data[..len]);
                // SAFETY: support checked above, and `len >= 16`.
                let got = unsafe { fold_pclmulqdq(seed, &data[..len]) };
                assert_eq!(got, expected, "seed {:#x}, len {}", seed, len);
            }
        }
    }

    #[test]
    fn test_x86_simd_availability() {
        let available = Pclmulqdq::is_supported();
        println!("PCLMULQDQ available: {}", available);
    }
}
