//! Fixed-point decimals with a runtime shape.
//!
//! A decimal of shape `(M, N)` stores an `M`-bit integer `storage` and
//! represents the value `storage * 10^-N`. Operands of arithmetic must share
//! the same bit width, exponent and signedness; there is no implicit
//! conversion between shapes, use [`Decimal::rescale`] explicitly.

use crate::{
    error::Error,
    int::FixedInt,
    shape::{BitWidth, Exponent},
    text,
    wide::{self, U512},
};
use ethnum::U256;
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

/// Policy for results that cannot be represented exactly at the target
/// exponent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Rounding {
    /// Discard the excess digits, rounding toward zero. This mirrors integer
    /// division, so `-1.5 / 1` at exponent 0 is `-1`.
    #[default]
    TowardZero,
    /// Fail with [`Error::PrecisionLoss`] instead of discarding digits.
    Exact,
}

/// A signed or unsigned Solidity fixed-point decimal with a runtime shape.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Decimal {
    storage: FixedInt,
    exponent: Exponent,
}

impl Decimal {
    /// Creates a new decimal from its raw storage.
    ///
    /// Fails with [`Error::Shape`] if the storage is not `bit_width` bits wide
    /// or if the exponent is not a valid Solidity one.
    pub fn new(storage: FixedInt, bit_width: u32, exponent: u32) -> Result<Self, Error> {
        let width = BitWidth::try_from(bit_width)?;
        let exponent = Exponent::try_from(exponent)?;
        if storage.bit_width() != width {
            return Err(Error::Shape);
        }
        Ok(Self { storage, exponent })
    }

    /// Creates a new decimal from storage of any width.
    pub fn from_storage(storage: FixedInt, exponent: Exponent) -> Self {
        Self { storage, exponent }
    }

    /// Returns zero for the specified shape.
    pub fn zero(bit_width: u32, exponent: u32, signed: bool) -> Result<Self, Error> {
        Self::new(FixedInt::zero(bit_width, signed)?, bit_width, exponent)
    }

    /// Creates a decimal with the same value as an integer, scaling it by
    /// `10^exponent`. Fails with [`Error::Overflow`] if the scaled value does
    /// not fit the integer's bit width.
    pub fn from_integer(value: FixedInt, exponent: u32) -> Result<Self, Error> {
        Self::from_storage(value, Exponent::default()).rescale(exponent, Rounding::Exact)
    }

    /// Returns the raw scaled integer.
    pub fn storage(&self) -> FixedInt {
        self.storage
    }

    /// Returns the bit width of the storage.
    pub fn bit_width(&self) -> BitWidth {
        self.storage.bit_width()
    }

    /// Returns the decimal exponent.
    pub fn exponent(&self) -> Exponent {
        self.exponent
    }

    /// Returns `true` for `fixedMxN` and `false` for `ufixedMxN` decimals.
    pub fn is_signed(&self) -> bool {
        self.storage.is_signed()
    }

    /// Returns `true` if the decimal is less than zero.
    pub fn is_negative(&self) -> bool {
        self.storage.is_negative()
    }

    /// Returns `true` if the decimal is zero.
    pub fn is_zero(&self) -> bool {
        self.storage.is_zero()
    }

    /// Returns `true` if both decimals have the same bit width, exponent and
    /// signedness.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.exponent == other.exponent && self.storage.same_shape(&other.storage)
    }

    /// Checked decimal addition.
    pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
        self.check_shape(&rhs)?;
        Ok(self.with_storage(self.storage.checked_add(rhs.storage)?))
    }

    /// Checked decimal subtraction.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
        self.check_shape(&rhs)?;
        Ok(self.with_storage(self.storage.checked_sub(rhs.storage)?))
    }

    /// Checked decimal multiplication, rounding toward zero.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
        self.checked_mul_with(rhs, Rounding::default())
    }

    /// Checked decimal multiplication with the specified rounding.
    ///
    /// The product of the two storages carries `10^2N` and is divided by
    /// `10^N` in a 512-bit intermediate before being checked against the bit
    /// width.
    pub fn checked_mul_with(self, rhs: Self, rounding: Rounding) -> Result<Self, Error> {
        self.check_shape(&rhs)?;
        let (magnitude, exact) = wide::mul_div(
            self.storage.unsigned_abs(),
            U512::from(rhs.storage.unsigned_abs()),
            wide::pow10(*self.exponent),
        )
        .ok_or(Error::Overflow)?;
        self.finish(
            self.exponent,
            self.is_negative() != rhs.is_negative(),
            magnitude,
            exact,
            rounding,
        )
    }

    /// Checked decimal division, rounding toward zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, Error> {
        self.checked_div_with(rhs, Rounding::default())
    }

    /// Checked decimal division with the specified rounding.
    ///
    /// The dividend storage is scaled by `10^N` in a 512-bit intermediate
    /// before dividing by the divisor storage.
    pub fn checked_div_with(self, rhs: Self, rounding: Rounding) -> Result<Self, Error> {
        self.check_shape(&rhs)?;
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (magnitude, exact) = wide::mul_div(
            self.storage.unsigned_abs(),
            wide::pow10(*self.exponent),
            U512::from(rhs.storage.unsigned_abs()),
        )
        .ok_or(Error::Overflow)?;
        self.finish(
            self.exponent,
            self.is_negative() != rhs.is_negative(),
            magnitude,
            exact,
            rounding,
        )
    }

    /// Checked negation.
    pub fn checked_neg(self) -> Result<Self, Error> {
        Ok(self.with_storage(self.storage.checked_neg()?))
    }

    /// Converts the decimal to a different exponent with the same bit width
    /// and signedness.
    pub fn rescale(self, exponent: u32, rounding: Rounding) -> Result<Self, Error> {
        let target = Exponent::try_from(exponent)?;
        let (factor, divisor) = match target.cmp(&self.exponent) {
            Ordering::Less => (U512::one(), wide::pow10(*self.exponent - *target)),
            Ordering::Equal => return Ok(self),
            Ordering::Greater => (wide::pow10(*target - *self.exponent), U512::one()),
        };
        let (magnitude, exact) =
            wide::mul_div(self.storage.unsigned_abs(), factor, divisor).ok_or(Error::Overflow)?;
        self.finish(target, self.is_negative(), magnitude, exact, rounding)
    }

    /// Compares two decimals of the same shape.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        self.check_shape(other)?;
        self.storage.try_cmp(&other.storage)
    }

    fn check_shape(&self, other: &Self) -> Result<(), Error> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(Error::Shape)
        }
    }

    fn with_storage(self, storage: FixedInt) -> Self {
        Self { storage, ..self }
    }

    /// Builds a result of this decimal's bit width and signedness from a sign
    /// and truncated magnitude.
    fn finish(
        self,
        exponent: Exponent,
        negative: bool,
        magnitude: U256,
        exact: bool,
        rounding: Rounding,
    ) -> Result<Self, Error> {
        let storage = FixedInt::from_magnitude(
            self.storage.bit_width(),
            self.storage.is_signed(),
            negative,
            magnitude,
        )
        .ok_or(Error::Overflow)?;
        if !exact && rounding == Rounding::Exact {
            tracing::trace!(
                exponent = exponent.get(),
                "rejecting inexact fixed-point result"
            );
            return Err(Error::PrecisionLoss);
        }
        Ok(Self { storage, exponent })
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.exponent != other.exponent {
            return None;
        }
        self.storage.partial_cmp(&other.storage)
    }
}

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&text::format(self))
    }
}
