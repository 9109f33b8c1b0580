//! Wide intermediate arithmetic for rescaling 256-bit magnitudes.

use ethnum::U256;
use uint::construct_uint;

construct_uint! {
    /// 512-bit unsigned integer.
    pub struct U512(8);
}

impl From<U256> for U512 {
    fn from(value: U256) -> Self {
        Self::from_big_endian(&value.to_be_bytes())
    }
}

/// Narrows a 512-bit value back to 256 bits, returning `None` if it does not
/// fit.
fn narrow(value: U512) -> Option<U256> {
    if value.bits() > 256 {
        return None;
    }
    let mut bytes = [0; 64];
    value.to_big_endian(&mut bytes);
    let mut word = [0; 32];
    word.copy_from_slice(&bytes[32..]);
    Some(U256::from_be_bytes(word))
}

/// Returns `10^n` as a 512-bit value. Exponents are at most 80, so this never
/// overflows.
pub fn pow10(n: u32) -> U512 {
    U512::exp10(n as usize)
}

/// Computes `a * b / d` truncated toward zero, along with whether or not the
/// division was exact.
///
/// Returns `None` if the quotient does not fit in 256 bits. The divisor must
/// not be zero.
pub fn mul_div(a: U256, b: U512, d: U512) -> Option<(U256, bool)> {
    debug_assert!(!d.is_zero());

    // An overflowing product implies `a * b >= 2^512`, and since `d < 2^512`
    // the quotient would not fit in 256 bits either.
    let product = U512::from(a).checked_mul(b)?;
    let (quotient, remainder) = product.div_mod(d);
    Some((narrow(quotient)?, remainder.is_zero()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_past_256_bits() {
        // (2^255 * 10^18) / 10^18 needs more than 256 bits in the middle.
        let a = U256::ONE << 255_u32;
        assert_eq!(mul_div(a, pow10(18), pow10(18)), Some((a, true)));
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(
            mul_div(U256::new(7), U512::from(1_u64), U512::from(2_u64)),
            Some((U256::new(3), false))
        );
    }

    #[test]
    fn detects_overflow() {
        assert_eq!(mul_div(U256::MAX, U512::from(2_u64), U512::from(1_u64)), None);
        assert_eq!(mul_div(U256::MAX, pow10(80), U512::from(3_u64)), None);
    }
}
