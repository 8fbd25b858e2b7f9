//! Runtime selection between the folding engine and the table path.
//!
//! The decision is made once: [`Crc64Dispatcher::new`] folds when a hardware
//! carry-less multiply is present and otherwise uses slicing-by-8, which beats
//! the emulated multiply. Inputs shorter than [`FOLD_THRESHOLD`] always take
//! the table path.

use crate::clmul::Backend;
use crate::fold;
use crate::table;

/// Minimum data size for the folding path.
/// Below this threshold the table path is faster.
pub const FOLD_THRESHOLD: usize = 64;

/// Largest slice handed to one fold step (the step takes a `u32` length).
const MAX_FOLD_CHUNK: usize = 1 << 30;

/// How [`Crc64Dispatcher::update`] processes data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Fold(Backend),
    Table,
}

/// Runtime dispatcher for CRC-64 register updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc64Dispatcher {
    path: Path,
}

impl Crc64Dispatcher {
    /// Create a dispatcher for the current CPU.
    pub fn new() -> Self {
        let backend = Backend::detect();
        let path = if backend.is_hardware() {
            Path::Fold(backend)
        } else {
            Path::Table
        };
        Self { path }
    }

    /// Create a dispatcher that never folds (slicing-by-8 only).
    pub fn software_only() -> Self {
        Self { path: Path::Table }
    }

    /// Create a dispatcher that folds on `backend`, or on the portable
    /// multiply if the CPU lacks it.
    pub fn with_backend(backend: Backend) -> Self {
        Self {
            path: Path::Fold(backend.or_portable()),
        }
    }

    /// The fold backend, if this dispatcher folds at all.
    pub fn backend(&self) -> Option<Backend> {
        match self.path {
            Path::Fold(backend) => Some(backend),
            Path::Table => None,
        }
    }

    /// Check if hardware carry-less multiply is in use.
    #[inline]
    pub fn is_simd_available(&self) -> bool {
        self.backend().is_some_and(Backend::is_hardware)
    }

    /// Name of the implementation used for large inputs.
    pub fn implementation_name(&self) -> &'static str {
        match self.path {
            Path::Fold(Backend::Pclmulqdq) => "clmul-fold (pclmulqdq)",
            Path::Fold(Backend::Pmull) => "clmul-fold (pmull)",
            Path::Fold(Backend::Portable) => "clmul-fold (portable)",
            Path::Table => "slicing-by-8",
        }
    }

    /// Update a CRC-64 register with `data`.
    ///
    /// # Arguments
    ///
    /// * `crc` - Current register (seeded with `!0`, not complemented)
    /// * `data` - Data to process
    ///
    /// # Returns
    ///
    /// Updated register (still not complemented)
    #[inline]
    pub fn update(&self, crc: u64, data: &[u8]) -> u64 {
        let Path::Fold(backend) = self.path else {
            return table::update_slice8(crc, data);
        };

        let mut crc = crc;
        let mut rest = data;
        while rest.len() >= FOLD_THRESHOLD {
            let (chunk, tail) = rest.split_at(rest.len().min(MAX_FOLD_CHUNK));
            // The fold step speaks in finalized values; the register is its complement.
            crc = !fold::fold_on(backend, !crc, chunk);
            rest = tail;
        }
        table::update_slice8(crc, rest)
    }
}

impl Default for Crc64Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
