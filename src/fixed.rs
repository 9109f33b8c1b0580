//! Solidity fixed-point types with static shapes.
//!
//! `Fixed<M, N>` and `UFixed<M, N>` correspond to Solidity's `fixedMxN` and
//! `ufixedMxN`, binding the runtime [`Decimal`] machinery to a single (M, N)
//! pair checked at compile time. Instead of declaring one type per pair, any
//! valid pair can be named directly, for example `UFixed<64, 10>`. Any use of
//! an invalid pair, such as `UFixed<64, 81>`, fails to compile.

use crate::{
    codec,
    decimal::{Decimal, Rounding},
    error::Error,
    int::FixedInt,
    primitive::{Primitive, Word},
    shape::{BitWidth, Exponent},
    text,
};
use ethnum::{I256, U256};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A Solidity fixed-point decimal type with a static shape.
///
/// Values are a raw `BIT_WIDTH`-bit integer interpreted as
/// `raw * 10^-EXPONENT`.
pub trait FixedPoint: Primitive + Copy {
    /// Bit width of the underlying integer.
    const BIT_WIDTH: BitWidth;

    /// Number of decimal digits to be interpreted as decimal places.
    const EXPONENT: Exponent;

    /// Whether or not the type can represent negative values.
    const SIGNED: bool;

    /// Returns the value as a runtime-shaped decimal.
    fn to_decimal(&self) -> Decimal;

    /// Converts a runtime-shaped decimal to this type, failing with
    /// [`Error::Shape`] if its shape does not match.
    fn from_decimal(value: Decimal) -> Result<Self, Error>;
}

macro_rules! impl_fixed {
    ($(
        $(#[$attr:meta])*
        impl $t:ident ($i:ident, signed = $signed:literal, $ctor:ident, $to:ident);
    )*) => {$(
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
        pub struct $t<const M: u32, const N: u32>($i);

        impl<const M: u32, const N: u32> $t<M, N> {
            const SHAPE: (BitWidth, Exponent) = match (BitWidth::new(M), Exponent::new(N)) {
                (Some(bit_width), Some(exponent)) => (bit_width, exponent),
                _ => panic!("invalid Solidity fixed-point shape"),
            };

            /// Creates a value from its raw scaled integer. Fails with
            /// [`Error::Range`] if the integer overflows `M` bits.
            pub fn from_raw(raw: $i) -> Result<Self, Error> {
                Self::from_decimal(Decimal::from_storage(
                    FixedInt::$ctor(M, raw)?,
                    Self::SHAPE.1,
                ))
            }

            /// Returns the raw scaled integer.
            pub const fn raw(self) -> $i {
                self.0
            }

            /// Checked addition.
            pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
                Self::from_decimal(self.to_decimal().checked_add(rhs.to_decimal())?)
            }

            /// Checked subtraction.
            pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
                Self::from_decimal(self.to_decimal().checked_sub(rhs.to_decimal())?)
            }

            /// Checked multiplication, rounding toward zero.
            pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
                self.checked_mul_with(rhs, Rounding::default())
            }

            /// Checked multiplication with the specified rounding.
            pub fn checked_mul_with(self, rhs: Self, rounding: Rounding) -> Result<Self, Error> {
                Self::from_decimal(self.to_decimal().checked_mul_with(rhs.to_decimal(), rounding)?)
            }

            /// Checked division, rounding toward zero.
            pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
                self.checked_div_with(rhs, Rounding::default())
            }

            /// Checked division with the specified rounding.
            pub fn checked_div_with(self, rhs: Self, rounding: Rounding) -> Result<Self, Error> {
                Self::from_decimal(self.to_decimal().checked_div_with(rhs.to_decimal(), rounding)?)
            }
        }

        impl<const M: u32, const N: u32> Default for $t<M, N> {
            fn default() -> Self {
                let (_bit_width, _exponent) = Self::SHAPE;
                Self(<$i>::ZERO)
            }
        }

        impl<const M: u32, const N: u32> FixedPoint for $t<M, N> {
            const BIT_WIDTH: BitWidth = Self::SHAPE.0;
            const EXPONENT: Exponent = Self::SHAPE.1;
            const SIGNED: bool = $signed;

            fn to_decimal(&self) -> Decimal {
                Decimal::from_storage(
                    FixedInt::from_extended_word(Self::SHAPE.0, $signed, self.0.to_be_bytes()),
                    Self::SHAPE.1,
                )
            }

            fn from_decimal(value: Decimal) -> Result<Self, Error> {
                if value.bit_width() != Self::SHAPE.0
                    || value.exponent() != Self::SHAPE.1
                    || value.is_signed() != $signed
                {
                    return Err(Error::Shape);
                }
                Ok(Self(value.storage().$to()?))
            }
        }

        impl<const M: u32, const N: u32> Primitive for $t<M, N> {
            fn to_word(&self) -> Word {
                self.0.to_be_bytes()
            }

            fn from_word(word: Word) -> Result<Self, Error> {
                Self::from_decimal(codec::decode_decimal(&word, M, N, $signed)?)
            }
        }

        impl<const M: u32, const N: u32> FromStr for $t<M, N> {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_decimal(text::parse(s, M, N, $signed)?)
            }
        }

        impl<const M: u32, const N: u32> Display for $t<M, N> {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                Display::fmt(&self.to_decimal(), f)
            }
        }
    )*};
}

impl_fixed! {
    /// A Solidity `fixedMxN`: a signed decimal stored in `M` bits with `N`
    /// fractional digits.
    impl Fixed(I256, signed = true, int, to_i256);
    /// A Solidity `ufixedMxN`: an unsigned decimal stored in `M` bits with
    /// `N` fractional digits.
    impl UFixed(U256, signed = false, uint, to_u256);
}

/// Solidity's `fixed`, an alias for `fixed128x18`.
pub type Fixed128x18 = Fixed<128, 18>;

/// Solidity's `ufixed`, an alias for `ufixed128x18`.
pub type UFixed128x18 = UFixed<128, 18>;
