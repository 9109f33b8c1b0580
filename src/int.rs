//! Solidity integers of any bit width.
//!
//! There aren't Rust equivalents for most Solidity integer types (`int96` or
//! `uint248` for example), so all integers are backed by a 256-bit `I256` or
//! `U256` and carry their logical bit width alongside. Arithmetic happens in
//! the wide backing and the result is then checked against the logical width,
//! so every width shares a single code path.

use crate::{error::Error, shape::BitWidth};
use ethnum::{I256, U256};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

/// A signed or unsigned Solidity integer with a runtime bit width.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FixedInt {
    width: BitWidth,
    value: Repr,
}

/// The 256-bit backing of an integer. Signed values are always kept sign
/// extended to the full 256 bits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Repr {
    Int(I256),
    Uint(U256),
}

/// Truncates a signed value to `width` bits, sign extending the result.
fn truncate_int(width: BitWidth, value: I256) -> I256 {
    let shift = width.padding_bits();
    (value << shift) >> shift
}

/// Truncates an unsigned value to `width` bits.
fn truncate_uint(width: BitWidth, value: U256) -> U256 {
    let shift = width.padding_bits();
    (value << shift) >> shift
}

impl FixedInt {
    /// Creates a new signed integer. Returns [`Error::Range`] if the value
    /// does not fit in `bit_width` bits.
    pub fn int(bit_width: u32, value: I256) -> Result<Self, Error> {
        Self::fit(BitWidth::try_from(bit_width)?, Repr::Int(value)).ok_or(Error::Range)
    }

    /// Creates a new unsigned integer. Returns [`Error::Range`] if the value
    /// does not fit in `bit_width` bits.
    pub fn uint(bit_width: u32, value: U256) -> Result<Self, Error> {
        Self::fit(BitWidth::try_from(bit_width)?, Repr::Uint(value)).ok_or(Error::Range)
    }

    /// Creates a new signed integer from a native integer.
    pub fn from_i128(bit_width: u32, value: i128) -> Result<Self, Error> {
        Self::int(bit_width, I256::new(value))
    }

    /// Creates a new unsigned integer from a native integer.
    pub fn from_u128(bit_width: u32, value: u128) -> Result<Self, Error> {
        Self::uint(bit_width, U256::new(value))
    }

    /// Returns zero for the specified shape.
    pub fn zero(bit_width: u32, signed: bool) -> Result<Self, Error> {
        let width = BitWidth::try_from(bit_width)?;
        Ok(Self::zero_of(width, signed))
    }

    /// Returns the smallest value representable by the specified shape.
    pub fn min_value(bit_width: u32, signed: bool) -> Result<Self, Error> {
        let width = BitWidth::try_from(bit_width)?;
        let value = if signed {
            Repr::Int(I256::MIN >> width.padding_bits())
        } else {
            Repr::Uint(U256::ZERO)
        };
        Ok(Self { width, value })
    }

    /// Returns the largest value representable by the specified shape.
    pub fn max_value(bit_width: u32, signed: bool) -> Result<Self, Error> {
        let width = BitWidth::try_from(bit_width)?;
        let value = if signed {
            Repr::Int(I256::MAX >> width.padding_bits())
        } else {
            Repr::Uint(U256::MAX >> width.padding_bits())
        };
        Ok(Self { width, value })
    }

    /// Interprets a big-endian byte sequence of exactly `bit_width / 8` bytes
    /// as a two's-complement (for signed integers) or unsigned integer.
    pub fn from_be_bytes(bytes: &[u8], bit_width: u32, signed: bool) -> Result<Self, Error> {
        let width = BitWidth::try_from(bit_width)?;
        if bytes.len() != width.byte_len() {
            return Err(Error::Range);
        }

        let negative = signed && bytes[0] & 0x80 != 0;
        let mut word = [if negative { 0xff } else { 0 }; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(Self::from_extended_word(width, signed, word))
    }

    /// Returns the big-endian two's-complement bytes of the integer, exactly
    /// `bit_width / 8` bytes long.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.to_extended_word()[32 - self.width.byte_len()..].to_vec()
    }

    pub(crate) fn zero_of(width: BitWidth, signed: bool) -> Self {
        let value = if signed {
            Repr::Int(I256::ZERO)
        } else {
            Repr::Uint(U256::ZERO)
        };
        Self { width, value }
    }

    /// Creates an integer from a 256-bit word that is already a zero or sign
    /// extension of a `width`-bit value.
    pub(crate) fn from_extended_word(width: BitWidth, signed: bool, word: [u8; 32]) -> Self {
        let value = if signed {
            Repr::Int(I256::from_be_bytes(word))
        } else {
            Repr::Uint(U256::from_be_bytes(word))
        };
        debug_assert!(Self::fit(width, value).is_some());
        Self { width, value }
    }

    /// Returns the integer as a zero or sign extended 256-bit word.
    pub(crate) fn to_extended_word(&self) -> [u8; 32] {
        match self.value {
            Repr::Int(value) => value.to_be_bytes(),
            Repr::Uint(value) => value.to_be_bytes(),
        }
    }

    /// Creates an integer from a sign and a magnitude, returning `None` if the
    /// resulting value does not fit the shape.
    pub(crate) fn from_magnitude(
        width: BitWidth,
        signed: bool,
        negative: bool,
        magnitude: U256,
    ) -> Option<Self> {
        let value = match (signed, negative) {
            (false, false) => Repr::Uint(magnitude),
            (false, true) if magnitude == U256::ZERO => Repr::Uint(magnitude),
            (false, true) => return None,
            (true, false) if magnitude <= I256::MAX.as_u256() => Repr::Int(magnitude.as_i256()),
            (true, true) if magnitude <= U256::ONE << 255_u32 => {
                // Wrapping negation maps 2^255 onto `I256::MIN`, which is the
                // only magnitude where a checked negation would fail.
                Repr::Int(magnitude.as_i256().wrapping_neg())
            }
            (true, _) => return None,
        };
        Self::fit(width, value)
    }

    /// Returns the absolute value of the integer as an unsigned 256-bit value.
    pub(crate) fn unsigned_abs(&self) -> U256 {
        match self.value {
            // `I256::MIN` wraps onto itself, whose bit pattern is 2^255.
            Repr::Int(value) if value.is_negative() => value.wrapping_neg().as_u256(),
            Repr::Int(value) => value.as_u256(),
            Repr::Uint(value) => value,
        }
    }

    /// Returns the integer's bit width.
    pub fn bit_width(&self) -> BitWidth {
        self.width
    }

    /// Returns `true` if the integer is signed.
    pub fn is_signed(&self) -> bool {
        matches!(self.value, Repr::Int(_))
    }

    /// Returns `true` if the integer is less than zero.
    pub fn is_negative(&self) -> bool {
        match self.value {
            Repr::Int(value) => value.is_negative(),
            Repr::Uint(_) => false,
        }
    }

    /// Returns `true` if the integer is zero.
    pub fn is_zero(&self) -> bool {
        match self.value {
            Repr::Int(value) => value == I256::ZERO,
            Repr::Uint(value) => value == U256::ZERO,
        }
    }

    /// Returns `true` if both integers have the same bit width and signedness.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.is_signed() == other.is_signed()
    }

    /// Returns the value as an `I256`. Fails with [`Error::Range`] for
    /// unsigned values above `I256::MAX`.
    pub fn to_i256(&self) -> Result<I256, Error> {
        match self.value {
            Repr::Int(value) => Ok(value),
            Repr::Uint(value) if value <= I256::MAX.as_u256() => Ok(value.as_i256()),
            Repr::Uint(_) => Err(Error::Range),
        }
    }

    /// Returns the value as a `U256`. Fails with [`Error::Range`] for negative
    /// values.
    pub fn to_u256(&self) -> Result<U256, Error> {
        match self.value {
            Repr::Int(value) if value.is_negative() => Err(Error::Range),
            Repr::Int(value) => Ok(value.as_u256()),
            Repr::Uint(value) => Ok(value),
        }
    }

    /// Converts to the widest native signed integer.
    ///
    /// Fails with [`Error::Range`] if the bit width is wider than 128 bits,
    /// regardless of the value, or if the value does not fit.
    pub fn to_i128(&self) -> Result<i128, Error> {
        self.check_native_width()?;
        match self.value {
            Repr::Int(value) => {
                let (hi, lo) = value.into_words();
                if hi == lo >> 127 {
                    Ok(lo)
                } else {
                    Err(Error::Range)
                }
            }
            Repr::Uint(value) => {
                let (hi, lo) = value.into_words();
                if hi == 0 && lo <= i128::MAX as u128 {
                    Ok(lo as i128)
                } else {
                    Err(Error::Range)
                }
            }
        }
    }

    /// Converts to the widest native unsigned integer.
    ///
    /// Fails with [`Error::Range`] if the bit width is wider than 128 bits,
    /// regardless of the value, or if the value does not fit.
    pub fn to_u128(&self) -> Result<u128, Error> {
        self.check_native_width()?;
        match self.value {
            Repr::Int(value) => match value.into_words() {
                (0, lo) => Ok(lo as u128),
                _ => Err(Error::Range),
            },
            Repr::Uint(value) => match value.into_words() {
                (0, lo) => Ok(lo),
                _ => Err(Error::Range),
            },
        }
    }

    /// Checked integer addition.
    pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
        self.checked(rhs, I256::checked_add, U256::checked_add)
    }

    /// Checked integer subtraction.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
        self.checked(rhs, I256::checked_sub, U256::checked_sub)
    }

    /// Checked integer multiplication.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
        self.checked(rhs, I256::checked_mul, U256::checked_mul)
    }

    /// Checked integer division, truncating toward zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
        self.check_divisor(&rhs)?;
        self.checked(rhs, I256::checked_div, U256::checked_div)
    }

    /// Checked integer remainder. The result has the sign of the dividend.
    pub fn checked_rem(self, rhs: Self) -> Result<Self, Error> {
        self.check_divisor(&rhs)?;
        // `MIN % -1` overflows in two's complement, but the exact result is 0.
        self.checked(
            rhs,
            |a, b| Some(a.checked_rem(b).unwrap_or(I256::ZERO)),
            U256::checked_rem,
        )
    }

    /// Checked negation. Unsigned integers can only negate zero.
    pub fn checked_neg(self) -> Result<Self, Error> {
        let value = match self.value {
            Repr::Int(value) => Repr::Int(value.checked_neg().ok_or(Error::Overflow)?),
            Repr::Uint(value) if value == U256::ZERO => Repr::Uint(value),
            Repr::Uint(_) => return Err(Error::Overflow),
        };
        Self::fit(self.width, value).ok_or(Error::Overflow)
    }

    /// Wrapping (modular) addition at the integer's bit width.
    pub fn wrapping_add(self, rhs: Self) -> Result<Self, Error> {
        self.wrapping(rhs, I256::wrapping_add, U256::wrapping_add)
    }

    /// Wrapping (modular) subtraction at the integer's bit width.
    pub fn wrapping_sub(self, rhs: Self) -> Result<Self, Error> {
        self.wrapping(rhs, I256::wrapping_sub, U256::wrapping_sub)
    }

    /// Wrapping (modular) multiplication at the integer's bit width.
    pub fn wrapping_mul(self, rhs: Self) -> Result<Self, Error> {
        self.wrapping(rhs, I256::wrapping_mul, U256::wrapping_mul)
    }

    /// Compares two integers of the same shape.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        self.partial_cmp(other).ok_or(Error::Shape)
    }

    /// Returns the value if it fits in `width` bits.
    fn fit(width: BitWidth, value: Repr) -> Option<Self> {
        let fits = match value {
            Repr::Int(value) => truncate_int(width, value) == value,
            Repr::Uint(value) => truncate_uint(width, value) == value,
        };
        fits.then_some(Self { width, value })
    }

    fn check_native_width(&self) -> Result<(), Error> {
        if *self.width > 128 {
            return Err(Error::Range);
        }
        Ok(())
    }

    fn check_divisor(&self, rhs: &Self) -> Result<(), Error> {
        if !self.same_shape(rhs) {
            return Err(Error::Shape);
        }
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(())
    }

    /// Applies a checked operation in the 256-bit backing and range checks
    /// the result against the logical bit width.
    fn checked(
        self,
        rhs: Self,
        int: impl FnOnce(I256, I256) -> Option<I256>,
        uint: impl FnOnce(U256, U256) -> Option<U256>,
    ) -> Result<Self, Error> {
        if self.width != rhs.width {
            return Err(Error::Shape);
        }
        let value = match (self.value, rhs.value) {
            (Repr::Int(a), Repr::Int(b)) => Repr::Int(int(a, b).ok_or(Error::Overflow)?),
            (Repr::Uint(a), Repr::Uint(b)) => Repr::Uint(uint(a, b).ok_or(Error::Overflow)?),
            _ => return Err(Error::Shape),
        };
        Self::fit(self.width, value).ok_or(Error::Overflow)
    }

    /// Applies a wrapping operation in the 256-bit backing and truncates the
    /// result to the logical bit width.
    fn wrapping(
        self,
        rhs: Self,
        int: impl FnOnce(I256, I256) -> I256,
        uint: impl FnOnce(U256, U256) -> U256,
    ) -> Result<Self, Error> {
        if self.width != rhs.width {
            return Err(Error::Shape);
        }
        let value = match (self.value, rhs.value) {
            (Repr::Int(a), Repr::Int(b)) => Repr::Int(truncate_int(self.width, int(a, b))),
            (Repr::Uint(a), Repr::Uint(b)) => Repr::Uint(truncate_uint(self.width, uint(a, b))),
            _ => return Err(Error::Shape),
        };
        Ok(Self {
            width: self.width,
            value,
        })
    }
}

impl PartialOrd for FixedInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.width != other.width {
            return None;
        }
        match (self.value, other.value) {
            (Repr::Int(a), Repr::Int(b)) => Some(a.cmp(&b)),
            (Repr::Uint(a), Repr::Uint(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl Display for FixedInt {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.value {
            Repr::Int(value) => Display::fmt(&value, f),
            Repr::Uint(value) => Display::fmt(&value, f),
        }
    }
}

macro_rules! impl_native_conversions {
    ($($t:ty => $n:literal $repr:ident $back:ident,)*) => {$(
        impl From<$t> for FixedInt {
            fn from(value: $t) -> Self {
                Self {
                    width: BitWidth($n),
                    value: Repr::$repr(value.into()),
                }
            }
        }

        impl TryFrom<FixedInt> for $t {
            type Error = Error;

            fn try_from(value: FixedInt) -> Result<Self, Self::Error> {
                <$t>::try_from(value.$back()?).map_err(|_| Error::Range)
            }
        }
    )*};
}

impl_native_conversions! {
    i8 => 8 Int to_i128,
    i16 => 16 Int to_i128,
    i32 => 32 Int to_i128,
    i64 => 64 Int to_i128,
    i128 => 128 Int to_i128,
    I256 => 256 Int to_i256,
    u8 => 8 Uint to_u128,
    u16 => 16 Uint to_u128,
    u32 => 32 Uint to_u128,
    u64 => 64 Uint to_u128,
    u128 => 128 Uint to_u128,
    U256 => 256 Uint to_u256,
}
