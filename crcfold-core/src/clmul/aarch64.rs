//! aarch64 carry-less multiply using `PMULL`.

use super::Clmul;
use crate::lane::Lane;
use core::arch::aarch64::*;

/// Capability token for `PMULL` (AES crypto extensions).
#[derive(Debug, Clone, Copy)]
pub struct Pmull {
    _private: (),
}

impl Pmull {
    /// Check if PMULL (crypto extensions) is available at runtime.
    #[inline]
    pub fn is_supported() -> bool {
        #[cfg(target_feature = "aes")]
        {
            true
        }
        #[cfg(not(target_feature = "aes"))]
        {
            std::arch::is_aarch64_feature_detected!("aes")
        }
    }

    /// Get a token if the CPU supports the instruction.
    #[inline]
    pub fn new() -> Option<Self> {
        Self::is_supported().then_some(Self { _private: () })
    }
}

impl Clmul for Pmull {
    #[inline(always)]
    fn clmul(self, a: u64, b: u64) -> Lane {
        // SAFETY: a token exists only after `is_supported()` returned true.
        unsafe { clmul_pmull(a, b) }
    }
}

/// # Safety
///
/// Requires NEON and AES (PMULL) support.
#[inline]
#[target_feature(enable = "neon", enable = "aes")]
unsafe fn clmul_pmull(a: u64, b: u64) -> Lane {
    // SAFETY: guaranteed by the caller's feature check
    Lane::from_u128(unsafe { vmull_p64(a, b) })
}

/// Run a whole fold step with PMULL enabled for the entire loop.
///
/// # Safety
///
/// Requires NEON and AES (PMULL) support, and `data.len() >= 16`.
#[target_feature(enable = "neon", enable = "aes")]
pub(crate) unsafe fn fold_pmull(accumulator: u64, data: &[u8]) -> u64 {
    crate::fold::fold_lanes(Pmull { _private: () }, accumulator, data)
}
