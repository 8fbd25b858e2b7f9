//! CRC-64 folding engine.
//!
//! Computes CRC-64/XZ (ECMA-182, reflected) over a buffer of at least one
//! 128-bit lane using carry-less multiplication:
//!
//! 1. XOR the complemented accumulator into the first lane
//! 2. Fold every further 16-byte block in with the `(k1, k2)` constant pair
//! 3. Reduce the remaining 128 bits to 64 with `k2`
//! 4. Barrett-reduce against `(mu, pol)` and complement the result
//!
//! The accumulator is a finalized CRC value (`0` for an empty message), not
//! the raw register. The kernel complements it on the way in and complements
//! its result on the way out; callers holding a register convert with `!`
//! around the call.
//!
//! Buffers whose length is not a multiple of 16 are handled by treating the
//! leading `len % 16` bytes as the top of a lane preceded by zero bytes. With
//! the register already XORed in, leading zeros leave the CRC unchanged.

use crate::clmul::{Backend, Clmul, Portable};
use crate::error::{CrcError, Result};
use crate::lane::{LANE_BYTES, Lane, shift_right_128};

/// Fold constant for the low word.
pub const K1: u64 = 0xe05dd497ca393ae4;
/// Fold constant for the high word; also drives the 128 → 64 bit reduction.
pub const K2: u64 = 0xdabe95afc7875f40;
/// Barrett constant: quotient estimate for the reflected polynomial.
pub const MU: u64 = 0x9c3e466c172963d5;
/// Barrett constant: the reflected polynomial in clmul form.
pub const POL: u64 = 0x92d8af2baf0e1e85;

/// `(k1, k2)` as one lane.
pub const FOLD_CONSTANTS: Lane = Lane::new(K1, K2);
/// `(mu, pol)` as one lane.
pub const BARRETT_CONSTANTS: Lane = Lane::new(MU, POL);

/// Smallest buffer a fold step accepts.
pub const MIN_FOLD_LEN: usize = LANE_BYTES;

/// Fold `data[..length]` into `accumulator` on the process-wide backend.
///
/// # Errors
///
/// - [`CrcError::LengthTooShort`] if `length < 16`
/// - [`CrcError::LengthOutOfBounds`] if `length > data.len()`
///
/// # Example
///
/// ```
/// use crcfold_core::fold::step;
///
/// let data = [0u8; 32];
/// assert_eq!(step(0, &data, 32).unwrap(), 0xC95AF8617CD5330C);
/// assert!(step(0, &data, 15).is_err());
/// ```
pub fn step(accumulator: u64, data: &[u8], length: u32) -> Result<u64> {
    step_on(Backend::detect(), accumulator, data, length)
}

/// Fold `data[..length]` into `accumulator` on a chosen backend.
///
/// A backend the CPU lacks is replaced by [`Backend::Portable`].
pub fn step_on(backend: Backend, accumulator: u64, data: &[u8], length: u32) -> Result<u64> {
    let data = checked_input(data, length)?;
    Ok(fold_on(backend, accumulator, data))
}

/// Fold `data[..length]` with an explicit [`Clmul`] strategy.
pub fn step_with<C: Clmul>(clmul: C, accumulator: u64, data: &[u8], length: u32) -> Result<u64> {
    let data = checked_input(data, length)?;
    Ok(fold_lanes(clmul, accumulator, data))
}

fn checked_input(data: &[u8], length: u32) -> Result<&[u8]> {
    let length = length as usize;
    if length < MIN_FOLD_LEN {
        return Err(CrcError::length_too_short(length, MIN_FOLD_LEN));
    }
    if length > data.len() {
        return Err(CrcError::length_out_of_bounds(length, data.len()));
    }
    Ok(&data[..length])
}

/// Backend dispatch without the length checks. `data.len()` must be ≥ 16.
pub(crate) fn fold_on(backend: Backend, accumulator: u64, data: &[u8]) -> u64 {
    debug_assert!(data.len() >= MIN_FOLD_LEN);

    match backend.or_portable() {
        #[cfg(target_arch = "x86_64")]
        // SAFETY: `or_portable` only keeps backends the CPU supports.
        Backend::Pclmulqdq => unsafe { crate::clmul::x86::fold_pclmulqdq(accumulator, data) },
        #[cfg(target_arch = "aarch64")]
        // SAFETY: `or_portable` only keeps backends the CPU supports.
        Backend::Pmull => unsafe { crate::clmul::aarch64::fold_pmull(accumulator, data) },
        _ => fold_lanes(Portable, accumulator, data),
    }
}

/// First lane of a fold step with the complemented accumulator mixed in.
///
/// Returns `(first, carry, rest)`: `carry` holds the accumulator bytes that
/// spill into the second lane, and `rest` is a whole number of lanes.
#[inline(always)]
pub(crate) fn split_head(accumulator: u64, data: &[u8]) -> (Lane, Lane, &[u8]) {
    let initial = Lane::new(!accumulator, 0);
    let head = data.len() % LANE_BYTES;

    if head == 0 {
        let (crc0, crc1) = shift_right_128(initial, 0);
        (crc0 ^ Lane::load(data), crc1, &data[LANE_BYTES..])
    } else {
        let (crc0, crc1) = shift_right_128(initial, LANE_BYTES - head);
        (crc0 ^ Lane::load_high(&data[..head]), crc1, &data[head..])
    }
}

/// The folding algorithm itself. `data.len()` must be ≥ 16.
#[inline(always)]
pub(crate) fn fold_lanes<C: Clmul>(clmul: C, accumulator: u64, data: &[u8]) -> u64 {
    let (mut x, mut carry, rest) = split_head(accumulator, data);
    for block in rest.chunks_exact(LANE_BYTES) {
        x = clmul.fold(x, FOLD_CONSTANTS) ^ carry ^ Lane::load(block);
        carry = Lane::ZERO;
    }
    let p = x;

    // 128 -> 64 bits
    let r = clmul.clmul_select(p, FOLD_CONSTANTS, 0x10) ^ p.shift_right_bytes(8);

    // Barrett reduction
    let t1 = clmul.clmul_select(r, BARRETT_CONSTANTS, 0x00);
    let t2 = clmul.clmul_select(t1, BARRETT_CONSTANTS, 0x10) ^ t1.shift_left_bytes(8) ^ r;

    !((u64::from(t2.lane32(3)) << 32) | u64::from(t2.lane32(2)))
}
