//! Software carry-less multiply.

use super::Clmul;
use crate::lane::Lane;

/// Shift-and-XOR carry-less multiply, usable on any target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl Clmul for Portable {
    #[inline(always)]
    fn clmul(self, a: u64, b: u64) -> Lane {
        clmul_portable(a, b)
    }
}

/// Full 128-bit carry-less product of two 64-bit polynomials.
///
/// Every set bit `i` of `a` XORs `b << i` into the product. The loop is
/// branch-free so the running time does not depend on the operands.
pub const fn clmul_portable(a: u64, b: u64) -> Lane {
    let wide = b as u128;
    let mut product: u128 = 0;
    let mut i = 0;
    while i < 64 {
        let mask = 0u128.wrapping_sub(((a >> i) & 1) as u128);
        product ^= (wide << i) & mask;
        i += 1;
    }
    Lane::from_u128(product)
}
