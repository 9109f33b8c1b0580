//! Solidity integer types with specific bitwidths.
//!
//! These types are needed because there aren't Rust equivalents for all
//! Solidity integer types (`int96` for example). The bit width is a const
//! generic parameter and is validated when the type is used, so any use of
//! `Uint<12>` fails to compile.

use crate::{
    codec,
    error::Error,
    int::FixedInt,
    primitive::{Primitive, Word},
    shape::BitWidth,
    text,
};
use ethnum::{I256, U256};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Implements statically sized Solidity integers.
macro_rules! impl_bitint {
    ($(
        $(#[$attr:meta])*
        impl $t:ident ($i:ident, signed = $signed:literal, $to:ident);
    )*) => {$(
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
        pub struct $t<const M: u32>($i);

        impl<const M: u32> $t<M> {
            /// The integer's bit width.
            pub const BIT_WIDTH: BitWidth = match BitWidth::new(M) {
                Some(bit_width) => bit_width,
                None => panic!("invalid Solidity integer bit width"),
            };

            /// Whether or not the integer is signed.
            pub const SIGNED: bool = $signed;

            /// Creates a new integer from its underlying value. Returns `None`
            /// if the value overflows `M` bits.
            pub fn new(value: $i) -> Option<Self> {
                (Self::truncate(value) == value).then_some(Self(value))
            }

            /// Creates a new integer by truncating a value to `M` bits.
            pub fn new_truncated(value: $i) -> Self {
                Self(Self::truncate(value))
            }

            /// Gets the underlying value.
            pub const fn get(self) -> $i {
                self.0
            }

            /// Returns the smallest value of the type.
            pub fn min_value() -> Self {
                Self(<$i>::MIN >> Self::BIT_WIDTH.padding_bits())
            }

            /// Returns the largest value of the type.
            pub fn max_value() -> Self {
                Self(<$i>::MAX >> Self::BIT_WIDTH.padding_bits())
            }

            /// Returns the integer with its runtime shape.
            pub fn to_fixed_int(self) -> FixedInt {
                FixedInt::from_extended_word(Self::BIT_WIDTH, $signed, self.0.to_be_bytes())
            }

            /// Checked integer addition.
            pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
                Self::try_from(self.to_fixed_int().checked_add(rhs.to_fixed_int())?)
            }

            /// Checked integer subtraction.
            pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
                Self::try_from(self.to_fixed_int().checked_sub(rhs.to_fixed_int())?)
            }

            /// Checked integer multiplication.
            pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
                Self::try_from(self.to_fixed_int().checked_mul(rhs.to_fixed_int())?)
            }

            /// Checked integer division, truncating toward zero.
            pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
                Self::try_from(self.to_fixed_int().checked_div(rhs.to_fixed_int())?)
            }

            /// Checked integer remainder.
            pub fn checked_rem(self, rhs: Self) -> Result<Self, Error> {
                Self::try_from(self.to_fixed_int().checked_rem(rhs.to_fixed_int())?)
            }

            /// Truncates a value.
            fn truncate(value: $i) -> $i {
                let shift = Self::BIT_WIDTH.padding_bits();
                (value << shift) >> shift
            }
        }

        impl<const M: u32> Default for $t<M> {
            fn default() -> Self {
                Self::new_truncated(<$i>::ZERO)
            }
        }

        impl<const M: u32> Primitive for $t<M> {
            fn to_word(&self) -> Word {
                self.0.to_be_bytes()
            }

            fn from_word(word: Word) -> Result<Self, Error> {
                Self::try_from(codec::decode(&word, M, $signed)?)
            }
        }

        impl<const M: u32> TryFrom<$i> for $t<M> {
            type Error = Error;

            fn try_from(value: $i) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(Error::Range)
            }
        }

        impl<const M: u32> TryFrom<FixedInt> for $t<M> {
            type Error = Error;

            fn try_from(value: FixedInt) -> Result<Self, Self::Error> {
                if value.bit_width() != Self::BIT_WIDTH || value.is_signed() != $signed {
                    return Err(Error::Shape);
                }
                Ok(Self(value.$to()?))
            }
        }

        impl<const M: u32> From<$t<M>> for FixedInt {
            fn from(value: $t<M>) -> Self {
                value.to_fixed_int()
            }
        }

        impl<const M: u32> FromStr for $t<M> {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(text::parse_int(s, M, $signed)?)
            }
        }

        impl<const M: u32> Display for $t<M> {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }
    )*};
}

impl_bitint! {
    /// A signed Solidity integer of `M` bits.
    impl Int(I256, signed = true, to_i256);
    /// An unsigned Solidity integer of `M` bits.
    impl Uint(U256, signed = false, to_u256);
}

macro_rules! bitint_aliases {
    ($($n:literal => $int:ident, $uint:ident;)*) => {$(
        #[doc = concat!("A Solidity `int", stringify!($n), "`.")]
        pub type $int = Int<$n>;
        #[doc = concat!("A Solidity `uint", stringify!($n), "`.")]
        pub type $uint = Uint<$n>;
    )*};
}

bitint_aliases! {
    8 => Int8, Uint8;
    16 => Int16, Uint16;
    24 => Int24, Uint24;
    32 => Int32, Uint32;
    40 => Int40, Uint40;
    48 => Int48, Uint48;
    56 => Int56, Uint56;
    64 => Int64, Uint64;
    72 => Int72, Uint72;
    80 => Int80, Uint80;
    88 => Int88, Uint88;
    96 => Int96, Uint96;
    104 => Int104, Uint104;
    112 => Int112, Uint112;
    120 => Int120, Uint120;
    128 => Int128, Uint128;
    136 => Int136, Uint136;
    144 => Int144, Uint144;
    152 => Int152, Uint152;
    160 => Int160, Uint160;
    168 => Int168, Uint168;
    176 => Int176, Uint176;
    184 => Int184, Uint184;
    192 => Int192, Uint192;
    200 => Int200, Uint200;
    208 => Int208, Uint208;
    216 => Int216, Uint216;
    224 => Int224, Uint224;
    232 => Int232, Uint232;
    240 => Int240, Uint240;
    248 => Int248, Uint248;
    256 => Int256, Uint256;
}
