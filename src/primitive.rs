//! Solidity primitive type trait and implementations.

use crate::{codec, error::Error};
use ethnum::{I256, U256};

/// An Ethereum 32-byte word.
pub type Word = [u8; 32];

/// Trait representing any type that can be converted to and from a single
/// Ethereum 32-byte word.
pub trait Primitive: Sized {
    /// Converts a primitive type to an Ethereum 32-byte word.
    fn to_word(&self) -> Word;

    /// Converts an Ethereum 32-byte word to the type.
    ///
    /// Unlike Solidity's own casting semantics, this rejects words that are not
    /// the canonical encoding of some value of the type. For example,
    /// `0xfff..fff` is a valid `int8` word (`-1`) but a malformed `uint8` one.
    fn from_word(word: Word) -> Result<Self, Error>;
}

macro_rules! impl_primitive_for_integer {
    ($($t:ty => $n:literal $signed:literal $backing:ident,)*) => {$(
        impl Primitive for $t {
            fn to_word(&self) -> Word {
                $backing::from(*self).to_be_bytes()
            }

            fn from_word(word: Word) -> Result<Self, Error> {
                <$t>::try_from(codec::decode(&word, $n, $signed)?)
            }
        }
    )*};
}

impl_primitive_for_integer! {
    i8 => 8 true I256,
    i16 => 16 true I256,
    i32 => 32 true I256,
    i64 => 64 true I256,
    i128 => 128 true I256,
    I256 => 256 true I256,
    u8 => 8 false U256,
    u16 => 16 false U256,
    u32 => 32 false U256,
    u64 => 64 false U256,
    u128 => 128 false U256,
    U256 => 256 false U256,
}
