//! # crcfold Core
//!
//! CRC-64/XZ (ECMA-182, reflected) with carry-less multiplication folding.
//!
//! This crate provides:
//!
//! - [`fold`]: the folding engine, `step(accumulator, data, length)`
//! - [`clmul`]: carry-less multiply strategies and runtime backend detection
//! - [`lane`]: the 128-bit lane value type and partial-lane shuffles
//! - [`crc`]: the streaming [`Crc64`] checksum
//! - [`dispatch`]: fold vs. table selection
//! - [`table`]: lookup tables for short inputs and reference checks
//! - [`combine`]: `crc(A || B)` from `crc(A)` and `crc(B)`
//! - [`io`]: `Read`/`Write` adapters
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Crc64 (update / finalize), io adapters, mmap, parallel │
//! ├─────────────────────────────────────────────────────────┤
//! │ Crc64Dispatcher: fold for large inputs, tables for tail │
//! ├─────────────────────────────────────────────────────────┤
//! │ fold::step: lane folding + Barrett reduction            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Clmul: PCLMULQDQ | PMULL | portable shift-and-XOR       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use crcfold_core::{Crc64, fold};
//!
//! // Streaming
//! let mut crc = Crc64::new();
//! crc.update(b"12345");
//! crc.update(b"6789");
//! assert_eq!(crc.finalize(), 0x995DC9BBDF1939FA);
//!
//! // One fold step over at least 16 bytes
//! let data = [0u8; 32];
//! assert_eq!(fold::step(0, &data, 32).unwrap(), 0xC95AF8617CD5330C);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod clmul;
pub mod combine;
pub mod crc;
pub mod dispatch;
pub mod error;
pub mod fold;
pub mod io;
pub mod lane;
pub mod table;

#[cfg(feature = "async-io")]
pub mod async_io;
#[cfg(feature = "mmap")]
pub mod mmap;
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-exports for convenience
pub use clmul::{Backend, Clmul, Portable};
pub use crc::Crc64;
pub use dispatch::Crc64Dispatcher;
pub use error::{CrcError, Result};
pub use fold::step;
pub use lane::Lane;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clmul::Backend;
    pub use crate::crc::Crc64;
    pub use crate::error::{CrcError, Result};
    pub use crate::fold::step;
    pub use crate::io::{Crc64Reader, checksum_reader};
}
