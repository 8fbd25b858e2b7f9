//! CRC-64 combination over GF(2).
//!
//! Given `crc(A)`, `crc(B)` and `len(B)`, computes `crc(A || B)` without
//! touching `A` again:
//!
//! ```text
//! crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
//! ```
//!
//! Because CRC-64/XZ uses the same value for init and xorout, this holds on
//! finalized values directly. The shift by `8*len(B)` bits is applied as a
//! product of squared "shift by one bit" matrices, so the cost is
//! O(log len(B)) matrix squarings.

use crate::table::POLY_REFLECTED;

/// A 64x64 GF(2) matrix: element `i` is column `i`.
#[derive(Clone, Copy)]
struct Gf2Matrix64([u64; 64]);

impl Gf2Matrix64 {
    /// The operator that feeds one zero bit through the reflected register.
    const fn shift1() -> Self {
        let mut m = [0u64; 64];
        m[0] = POLY_REFLECTED;
        let mut j = 1;
        while j < 64 {
            m[j] = 1 << (j - 1);
            j += 1;
        }
        Self(m)
    }

    #[inline]
    const fn mul_vec(&self, mut vec: u64) -> u64 {
        let mut result = 0u64;
        let mut i = 0;
        while vec != 0 {
            if vec & 1 != 0 {
                result ^= self.0[i];
            }
            vec >>= 1;
            i += 1;
        }
        result
    }

    const fn square(&self) -> Self {
        let mut out = [0u64; 64];
        let mut i = 0;
        while i < 64 {
            out[i] = self.mul_vec(self.0[i]);
            i += 1;
        }
        Self(out)
    }
}

/// Combine two finalized CRC-64/XZ values.
///
/// # Example
///
/// ```
/// use crcfold_core::{Crc64, combine::crc64_combine};
///
/// let a = Crc64::compute(b"hello ");
/// let b = Crc64::compute(b"world!");
/// assert_eq!(crc64_combine(a, b, 6), Crc64::compute(b"hello world!"));
/// ```
pub fn crc64_combine(crc_a: u64, crc_b: u64, len_b: u64) -> u64 {
    if len_b == 0 {
        return crc_a;
    }

    // Odd/even powers: shift by 2 bits, then 4, then 8 (one zero byte).
    let mut odd = Gf2Matrix64::shift1();
    let mut even = odd.square();
    odd = even.square();

    let mut crc = crc_a;
    let mut len = len_b;
    loop {
        even = odd.square();
        if len & 1 != 0 {
            crc = even.mul_vec(crc);
        }
        len >>= 1;
        if len == 0 {
            break;
        }

        odd = even.square();
        if len & 1 != 0 {
            crc = odd.mul_vec(crc);
        }
        len >>= 1;
        if len == 0 {
            break;
        }
    }

    crc ^ crc_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Crc64;

    #[test]
    fn test_combine_empty_tail() {
        let a = Crc64::compute(b"123456789");
        assert_eq!(crc64_combine(a, 0, 0), a);
    }

    #[test]
    fn test_combine_empty_head() {
        let b = Crc64::compute(b"123456789");
        assert_eq!(crc64_combine(0, b, 9), b);
    }

    #[test]
    fn test_combine_all_splits() {
        let data = b"hello world, this is a combine test with some more data";
        let whole = Crc64::compute(data);
        for split in 0..=data.len() {
            let (a, b) = data.split_at(split);
            assert_eq!(
                crc64_combine(Crc64::compute(a), Crc64::compute(b), b.len() as u64),
                whole,
                "split at {}",
                split
            );
        }
    }

    #[test]
    fn test_combine_large_tail() {
        let head = b"prefix";
        let tail = vec![0xA5u8; 100_000];
        let mut joined = head.to_vec();
        joined.extend_from_slice(&tail);
        assert_eq!(
            crc64_combine(
                Crc64::compute(head),
                Crc64::compute(&tail),
                tail.len() as u64
            ),
            Crc64::compute(&joined)
        );
    }
}
