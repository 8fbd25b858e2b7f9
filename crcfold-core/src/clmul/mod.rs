//! Carry-less multiplication strategies.
//!
//! The fold engine is written once against the [`Clmul`] trait. Each strategy
//! provides a 64×64 → 128-bit polynomial product over GF(2):
//!
//! - [`Portable`]: shift-and-XOR emulation, runs everywhere
//! - `Pclmulqdq` (x86_64): the `PCLMULQDQ` instruction
//! - `Pmull` (aarch64): the `PMULL` instruction from the crypto extensions
//!
//! Hardware strategies are zero-sized capability tokens: the only way to get
//! one outside this module is through a constructor that has already checked
//! the CPU, so the trait method can stay safe.
//!
//! Which strategy the process uses is a [`Backend`], probed once.

mod portable;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
#[cfg(target_arch = "x86_64")]
pub mod x86;

pub use portable::{Portable, clmul_portable};

use crate::lane::Lane;
use std::fmt;
use std::sync::OnceLock;

/// Environment variable that forces the portable backend when set to a
/// non-empty value other than `0`.
pub const FORCE_PORTABLE_ENV: &str = "CRCFOLD_FORCE_PORTABLE";

/// A carry-less multiply implementation.
pub trait Clmul: Copy {
    /// Carry-less product of `a` and `b` as a 128-bit lane.
    fn clmul(self, a: u64, b: u64) -> Lane;

    /// Multiply one word of `a` by one word of `b`, chosen the way the
    /// `PCLMULQDQ` immediate does: bit 0 picks the word of `a`, bit 4 the
    /// word of `b` (0 = low, 1 = high).
    #[inline(always)]
    fn clmul_select(self, a: Lane, b: Lane, imm: u8) -> Lane {
        let x = if imm & 0x01 == 0 { a.lo } else { a.hi };
        let y = if imm & 0x10 == 0 { b.lo } else { b.hi };
        self.clmul(x, y)
    }

    /// `clmul(x.lo, k.lo) ^ clmul(x.hi, k.hi)`.
    #[inline(always)]
    fn fold(self, x: Lane, k: Lane) -> Lane {
        self.clmul_select(x, k, 0x00) ^ self.clmul_select(x, k, 0x11)
    }
}

/// The carry-less multiply backend a fold step runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Software polynomial multiply.
    Portable,
    /// x86_64 `PCLMULQDQ`.
    Pclmulqdq,
    /// aarch64 `PMULL`.
    Pmull,
}

static DETECTED: OnceLock<Backend> = OnceLock::new();

impl Backend {
    /// All backends, fastest first.
    pub const ALL: [Backend; 3] = [Backend::Pclmulqdq, Backend::Pmull, Backend::Portable];

    /// The backend selected for this process.
    ///
    /// The CPU is probed on first call only; later calls return the cached
    /// choice.
    pub fn detect() -> Self {
        *DETECTED.get_or_init(|| {
            let backend = if force_portable() {
                Backend::Portable
            } else {
                Self::ALL
                    .into_iter()
                    .find(|b| b.is_supported())
                    .unwrap_or(Backend::Portable)
            };
            tracing::debug!(
                backend = backend.name(),
                forced = force_portable(),
                "selected CRC-64 carry-less multiply backend"
            );
            backend
        })
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Portable => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Pclmulqdq => x86::Pclmulqdq::is_supported(),
            #[cfg(target_arch = "aarch64")]
            Backend::Pmull => aarch64::Pmull::is_supported(),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// This backend if the CPU supports it, the portable one otherwise.
    pub fn or_portable(self) -> Self {
        if self.is_supported() {
            self
        } else {
            Backend::Portable
        }
    }

    /// Backends usable on this CPU.
    pub fn supported() -> Vec<Backend> {
        Self::ALL.into_iter().filter(|b| b.is_supported()).collect()
    }

    /// Whether this backend uses a hardware multiply instruction.
    pub fn is_hardware(self) -> bool {
        !matches!(self, Backend::Portable)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Pclmulqdq => "pclmulqdq",
            Backend::Pmull => "pmull",
        }
    }

    /// Carry-less product of `a` and `b` on this backend.
    ///
    /// Unsupported backends fall back to the portable multiply.
    pub fn clmul(self, a: u64, b: u64) -> Lane {
        match self.or_portable() {
            #[cfg(target_arch = "x86_64")]
            Backend::Pclmulqdq => match x86::Pclmulqdq::new() {
                Some(hw) => hw.clmul(a, b),
                None => Portable.clmul(a, b),
            },
            #[cfg(target_arch = "aarch64")]
            Backend::Pmull => match aarch64::Pmull::new() {
                Some(hw) => hw.clmul(a, b),
                None => Portable.clmul(a, b),
            },
            _ => Portable.clmul(a, b),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the environment asks for the portable backend.
pub fn force_portable() -> bool {
    std::env::var(FORCE_PORTABLE_ENV)
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_product() {
        let product = clmul_portable(0x5a2d_8244_0f1e_3e50, 0xcae9_00d5_fed9_262f);
        assert_eq!(
            product.to_u128(),
            0x39ca_c5ca_fc66_6bf3_25bc_9dd4_c0f3_6330
        );
    }

    #[test]
    fn test_backends_agree() {
        let mut seed: u64 = 0x123456789ABCDEF0;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            seed
        };

        for backend in Backend::supported() {
            for _ in 0..256 {
                let (a, b) = (next(), next());
                assert_eq!(
                    backend.clmul(a, b),
                    clmul_portable(a, b),
                    "{} disagrees for {:#x} * {:#x}",
                    backend,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_clmul_select() {
        let a = Lane::new(3, 5);
        let b = Lane::new(7, 11);
        assert_eq!(Portable.clmul_select(a, b, 0x00), clmul_portable(3, 7));
        assert_eq!(Portable.clmul_select(a, b, 0x01), clmul_portable(5, 7));
        assert_eq!(Portable.clmul_select(a, b, 0x10), clmul_portable(3, 11));
        assert_eq!(Portable.clmul_select(a, b, 0x11), clmul_portable(5, 11));
    }

    #[test]
    fn test_detect_is_stable() {
        let first = Backend::detect();
        assert!(first.is_supported());
        assert_eq!(Backend::detect(), first);
    }

    #[test]
    fn test_portable_always_supported() {
        assert!(Backend::Portable.is_supported());
        assert!(Backend::supported().contains(&Backend::Portable));
        assert_eq!(Backend::Portable.or_portable(), Backend::Portable);
        assert!(!Backend::Portable.is_hardware());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_pmull_unsupported_on_x86() {
        assert!(!Backend::Pmull.is_supported());
        assert_eq!(Backend::Pmull.or_portable(), Backend::Portable);
    }
}
