//! 128-bit lane values.
//!
//! A [`Lane`] stands in for an SSE/NEON register during one fold step. It is a
//! plain `Copy` value holding two little-endian 64-bit words: bytes 0..8 of a
//! loaded block land in [`Lane::lo`], bytes 8..16 in [`Lane::hi`].
//!
//! Byte permutations follow `PSHUFB` semantics: a mask byte with its top bit
//! set produces zero, any other mask byte selects the source byte indexed by
//! its low nibble.

use std::ops::{BitXor, BitXorAssign};

/// Number of bytes in one lane.
pub const LANE_BYTES: usize = 16;

/// Shuffle masks for partial-lane shifts.
///
/// A 16-byte window starting at `16 - n` yields the mask that moves the top
/// `n` source bytes to the bottom of the lane and zeroes the rest.
pub const SHUFFLE_MASKS: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x8f, 0x8e, 0x8d, 0x8c, 0x8b, 0x8a, 0x89, 0x88, 0x87, 0x86, 0x85, 0x84, 0x83, 0x82, 0x81, 0x80,
];

/// A 128-bit scratch value made of two 64-bit words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Lane {
    /// Bits 0..64 (bytes 0..8).
    pub lo: u64,
    /// Bits 64..128 (bytes 8..16).
    pub hi: u64,
}

impl Lane {
    /// The all-zero lane.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a lane from its low and high words.
    #[inline(always)]
    pub const fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// Reinterpret a `u128` as a lane.
    #[inline(always)]
    pub const fn from_u128(value: u128) -> Self {
        Self::new(value as u64, (value >> 64) as u64)
    }

    /// Reinterpret the lane as a `u128`.
    #[inline(always)]
    pub const fn to_u128(self) -> u128 {
        (self.lo as u128) | ((self.hi as u128) << 64)
    }

    /// Load 16 bytes as two little-endian words.
    #[inline(always)]
    pub const fn from_le_bytes(bytes: [u8; LANE_BYTES]) -> Self {
        Self::from_u128(u128::from_le_bytes(bytes))
    }

    /// Store the lane as 16 little-endian bytes.
    #[inline(always)]
    pub const fn to_le_bytes(self) -> [u8; LANE_BYTES] {
        self.to_u128().to_le_bytes()
    }

    /// Load the first 16 bytes of `block`.
    ///
    /// Panics if `block` is shorter than a lane.
    #[inline(always)]
    pub fn load(block: &[u8]) -> Self {
        Self::new(read_u64_le(&block[..8]), read_u64_le(&block[8..16]))
    }

    /// Load up to 16 bytes into the top of a lane, zero-filling below.
    ///
    /// Byte `i` of `head` lands in lane byte `16 - head.len() + i`.
    pub fn load_high(head: &[u8]) -> Self {
        let len = head.len().min(LANE_BYTES);
        let mut bytes = [0u8; LANE_BYTES];
        bytes[LANE_BYTES - len..].copy_from_slice(&head[..len]);
        Self::from_le_bytes(bytes)
    }

    /// Logical right shift by whole bytes (`PSRLDQ`).
    #[inline(always)]
    pub const fn shift_right_bytes(self, n: u32) -> Self {
        match self.to_u128().checked_shr(n * 8) {
            Some(v) => Self::from_u128(v),
            None => Self::ZERO,
        }
    }

    /// Logical left shift by whole bytes (`PSLLDQ`).
    #[inline(always)]
    pub const fn shift_left_bytes(self, n: u32) -> Self {
        match self.to_u128().checked_shl(n * 8) {
            Some(v) => Self::from_u128(v),
            None => Self::ZERO,
        }
    }

    /// Extract 32-bit word `index` (0 = least significant).
    #[inline(always)]
    pub const fn lane32(self, index: u32) -> u32 {
        (self.to_u128() >> (32 * (index & 3))) as u32
    }

    /// Permute bytes with zeroing (`PSHUFB`).
    pub fn shuffle(self, mask: &[u8; LANE_BYTES]) -> Self {
        let src = self.to_le_bytes();
        let mut out = [0u8; LANE_BYTES];
        for (dst, &m) in out.iter_mut().zip(mask.iter()) {
            if m & 0x80 == 0 {
                *dst = src[(m & 0x0f) as usize];
            }
        }
        Self::from_le_bytes(out)
    }
}

impl BitXor for Lane {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self::new(self.lo ^ rhs.lo, self.hi ^ rhs.hi)
    }
}

impl BitXorAssign for Lane {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.lo ^= rhs.lo;
        self.hi ^= rhs.hi;
    }
}

/// Split a lane at byte `16 - n` into two complementary halves.
///
/// Returns `(left, right)`:
/// - `left` is `initial` moved up by `n` bytes (`initial << 8n`), zero below;
/// - `right` holds the top `n` bytes of `initial` moved to the bottom, zero above.
///
/// The two masks are byte-wise complements of each other, so every source
/// byte ends up in exactly one output. `n` is clamped to `0..=16`.
pub fn shift_right_128(initial: Lane, n: usize) -> (Lane, Lane) {
    let pos = LANE_BYTES - n.min(LANE_BYTES);

    let mut mask_a = [0u8; LANE_BYTES];
    mask_a.copy_from_slice(&SHUFFLE_MASKS[pos..pos + LANE_BYTES]);
    let mask_b = mask_a.map(|m| m ^ 0xff);

    (initial.shuffle(&mask_b), initial.shuffle(&mask_a))
}

#[inline(always)]
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(word)
}
