//! Serde support for statically shaped Solidity numbers.
//!
//! Values are serialized as decimal strings, since most of them do not fit in
//! a JSON number without losing precision.

use crate::{
    bitint::{Int, Uint},
    fixed::{Fixed, UFixed},
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;

macro_rules! impl_serde_as_str {
    ($(<$(const $p:ident: u32),*> $t:ty;)*) => {$(
        impl<$(const $p: u32),*> Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de, $(const $p: u32),*> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = Cow::<str>::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    )*};
}

impl_serde_as_str! {
    <const M: u32> Int<M>;
    <const M: u32> Uint<M>;
    <const M: u32, const N: u32> Fixed<M, N>;
    <const M: u32, const N: u32> UFixed<M, N>;
}
