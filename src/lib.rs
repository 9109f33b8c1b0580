//! Solidity fixed-width integers and fixed-point decimals, along with their
//! Ethereum ABI word encoding.
//!
//! Values come in two flavours:
//! - Runtime shaped [`FixedInt`] and [`Decimal`], for when the Solidity type
//!   is only known at runtime (for example, when read from a JSON ABI).
//! - Statically shaped [`Int<M>`], [`Uint<M>`], [`Fixed<M, N>`] and
//!   [`UFixed<M, N>`], for when it is known at compile time.
//!
//! All arithmetic is checked: results that do not fit the shape are errors,
//! never silently truncated.

pub mod bitint;
pub mod codec;
pub mod decimal;
pub mod error;
pub mod fixed;
pub mod int;
pub mod primitive;
#[cfg(feature = "serde")]
mod serialize;
pub mod shape;
pub mod text;
mod wide;

pub use self::{
    bitint::{Int, Uint},
    codec::{decode, decode_decimal, encode, encode_decimal},
    decimal::{Decimal, Rounding},
    error::Error,
    fixed::{Fixed, FixedPoint, UFixed},
    int::FixedInt,
    primitive::{Primitive, Word},
    shape::{BitWidth, Exponent},
};
