//! Error types for crcfold operations.
//!
//! The folding kernel itself only fails on caller errors (undersized or
//! out-of-range lengths). The remaining variants cover the I/O helpers and
//! digest verification used by the command-line front-end.

use std::io;
use thiserror::Error;

/// The main error type for crcfold operations.
#[derive(Debug, Error)]
pub enum CrcError {
    /// I/O error from an underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fold step called with fewer bytes than one 128-bit lane.
    #[error("Fold length too short: {length} bytes, need at least {minimum}")]
    LengthTooShort {
        /// Requested length.
        length: usize,
        /// Minimum accepted length.
        minimum: usize,
    },

    /// Fold step length exceeds the buffer it refers to.
    #[error("Fold length {length} exceeds buffer of {available} bytes")]
    LengthOutOfBounds {
        /// Requested length.
        length: usize,
        /// Bytes actually present in the buffer.
        available: usize,
    },

    /// Computed checksum differs from the expected one.
    #[error("CRC-64 mismatch: expected {expected:016x}, computed {computed:016x}")]
    Mismatch {
        /// Expected CRC value.
        expected: u64,
        /// Computed CRC value.
        computed: u64,
    },

    /// A textual digest could not be parsed.
    #[error("Invalid CRC-64 digest: {input}")]
    InvalidDigest {
        /// The rejected input.
        input: String,
    },
}

/// Result type alias for crcfold operations.
pub type Result<T> = std::result::Result<T, CrcError>;

impl CrcError {
    /// Create a length-too-short error.
    pub fn length_too_short(length: usize, minimum: usize) -> Self {
        Self::LengthTooShort { length, minimum }
    }

    /// Create a length-out-of-bounds error.
    pub fn length_out_of_bounds(length: usize, available: usize) -> Self {
        Self::LengthOutOfBounds { length, available }
    }

    /// Create a checksum mismatch error.
    pub fn mismatch(expected: u64, computed: u64) -> Self {
        Self::Mismatch { expected, computed }
    }

    /// Create an invalid digest error.
    pub fn invalid_digest(input: impl Into<String>) -> Self {
        Self::InvalidDigest {
            input: input.into(),
        }
    }
}

/// Parse a CRC-64 digest written as up to 16 hex digits, with or without `0x`.
pub fn parse_digest(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 16 {
        return Err(CrcError::invalid_digest(input));
    }

    u64::from_str_radix(digits, 16).map_err(|_| CrcError::invalid_digest(input))
}
