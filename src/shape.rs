//! Shapes of Solidity numeric types.
//!
//! A shape is the static part of a Solidity numeric type: the bit width of
//! its integer storage and, for fixed-point decimals, the decimal exponent.

use crate::error::Error;
use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
};

/// An integer bit width.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BitWidth(pub(crate) u32);

impl BitWidth {
    /// The widest Solidity integer, `uint256`/`int256`.
    pub const MAX: Self = Self(256);

    /// Checked bit-width creation.
    ///
    /// Bitwidths must be multiple of 8s between 8 and 256.
    pub const fn new(bit_width: u32) -> Option<Self> {
        match bit_width {
            n @ 8..=256 if n % 8 == 0 => Some(Self(n)),
            _ => None,
        }
    }

    /// Returns the bit width as a `u32`.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the number of bytes needed to hold a value of this width.
    pub const fn byte_len(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Returns the number of unused high bits in a 256-bit backing word.
    pub(crate) const fn padding_bits(self) -> u32 {
        256 - self.0
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::MAX
    }
}

impl Deref for BitWidth {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BitWidth {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::Shape)
    }
}

/// A fixed-point decimal exponent, the number of implied fractional digits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Exponent(pub(crate) u32);

impl Exponent {
    /// The largest exponent Solidity accepts.
    pub const MAX: Self = Self(80);

    /// Checked exponent creation.
    ///
    /// Exponents must be between 0 and 80.
    pub const fn new(exponent: u32) -> Option<Self> {
        match exponent {
            n @ 0..=80 => Some(Self(n)),
            _ => None,
        }
    }

    /// Returns the exponent as a `u32`.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Deref for Exponent {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Exponent {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for Exponent {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::Shape)
    }
}

/// Returns `true` if `ufixedMxN`/`fixedMxN` is a valid Solidity type.
pub const fn is_valid_fixed(bit_width: u32, exponent: u32) -> bool {
    BitWidth::new(bit_width).is_some() && Exponent::new(exponent).is_some()
}

/// Returns an iterator over all Solidity integer bit widths.
pub fn int_widths() -> impl Iterator<Item = BitWidth> {
    (8..=256).step_by(8).map(BitWidth)
}

/// Returns an iterator over every (M, N) pair permitted for Solidity
/// fixed-point types, ordered by bit width and then exponent.
pub fn fixed_shapes() -> impl Iterator<Item = (BitWidth, Exponent)> {
    int_widths().flat_map(|m| (0..=Exponent::MAX.0).map(move |n| (m, Exponent(n))))
}
