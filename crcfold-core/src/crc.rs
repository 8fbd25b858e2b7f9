//! Streaming CRC-64/XZ.
//!
//! [`Crc64`] is the incremental front-end to the folding engine. It keeps the
//! raw register and hands data to a [`Crc64Dispatcher`], which folds large
//! inputs with carry-less multiplication and sends short ones through the
//! lookup tables.
//!
//! - Polynomial: 0x42F0E1EBA9EA3693 (reflected: 0xC96C5795D7870F42)
//! - Initial value: 0xFFFFFFFFFFFFFFFF
//! - Final XOR: 0xFFFFFFFFFFFFFFFF
//! - Reflected input: Yes
//! - Reflected output: Yes

use crate::clmul::Backend;
use crate::combine::crc64_combine;
use crate::dispatch::Crc64Dispatcher;

/// Register seed and final XOR.
const CRC64_INIT: u64 = 0xFFFFFFFFFFFFFFFF;

/// CRC-64/XZ calculator.
///
/// # Example
///
/// ```
/// use crcfold_core::crc::Crc64;
///
/// let mut crc = Crc64::new();
/// crc.update(b"123456789");
/// assert_eq!(crc.finalize(), 0x995DC9BBDF1939FA);
/// ```
#[derive(Debug, Clone)]
pub struct Crc64 {
    crc: u64,
    dispatcher: Crc64Dispatcher,
}

impl Crc64 {
    /// Create a new CRC-64 calculator for the current CPU.
    pub fn new() -> Self {
        Self::with_dispatcher(Crc64Dispatcher::new())
    }

    /// Create a calculator that uses the given dispatcher.
    pub fn with_dispatcher(dispatcher: Crc64Dispatcher) -> Self {
        Self {
            crc: CRC64_INIT,
            dispatcher,
        }
    }

    /// Create a calculator that folds on `backend`.
    pub fn with_backend(backend: Backend) -> Self {
        Self::with_dispatcher(Crc64Dispatcher::with_backend(backend))
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = CRC64_INIT;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.crc = self.dispatcher.update(self.crc, data);
    }

    /// Get the current CRC value (without finalizing).
    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.crc ^ CRC64_INIT
    }

    /// Finalize and return the CRC value.
    #[inline(always)]
    pub fn finalize(self) -> u64 {
        self.crc ^ CRC64_INIT
    }

    /// Compute CRC-64 for a slice in one call.
    #[inline]
    pub fn compute(data: &[u8]) -> u64 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Compute CRC-64 with the table path only.
    pub fn compute_software(data: &[u8]) -> u64 {
        let mut crc = Self::with_dispatcher(Crc64Dispatcher::software_only());
        crc.update(data);
        crc.finalize()
    }

    /// CRC of `A || B` from `crc(A)`, `crc(B)` and `len(B)`.
    pub fn combine(crc_a: u64, crc_b: u64, len_b: u64) -> u64 {
        crc64_combine(crc_a, crc_b, len_b)
    }

    /// Name of the implementation this calculator uses for large inputs.
    pub fn implementation_name(&self) -> &'static str {
        self.dispatcher.implementation_name()
    }

    /// Check if hardware carry-less multiply is available on this CPU.
    pub fn is_simd_available() -> bool {
        Backend::detect().is_hardware()
    }
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new()
    }
}
