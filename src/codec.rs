//! ABI encoding of Solidity integers and fixed-point decimals.
//!
//! Every elementary value occupies exactly one 32-byte word regardless of
//! its declared bit width. Unsigned values are zero-extended, and signed values
//! are sign-extended to the full word. Fixed-point decimals are encoded as
//! their underlying integer; their exponent is not part of the wire format.

use crate::{
    decimal::Decimal,
    error::Error,
    int::FixedInt,
    primitive::Word,
    shape::BitWidth,
};

/// ABI-encodes an integer to a word.
pub fn encode(value: &FixedInt) -> Word {
    value.to_extended_word()
}

/// ABI-decodes an integer of the specified shape from a word.
///
/// The high bytes of the word that are not part of the `bit_width`-bit value
/// must be a zero extension for unsigned integers and a sign extension for
/// signed ones, otherwise [`Error::MalformedEncoding`] is returned.
pub fn decode(word: &Word, bit_width: u32, signed: bool) -> Result<FixedInt, Error> {
    let width = BitWidth::try_from(bit_width)?;
    let (padding, bytes) = word.split_at(32 - width.byte_len());

    let fill = if signed && bytes[0] & 0x80 != 0 { 0xff } else { 0 };
    if padding.iter().any(|&byte| byte != fill) {
        tracing::debug!(
            word = %hex::encode(word),
            bit_width,
            signed,
            "rejecting non-canonical ABI word"
        );
        return Err(Error::MalformedEncoding);
    }

    Ok(FixedInt::from_extended_word(width, signed, *word))
}

/// ABI-encodes a fixed-point decimal to a word.
pub fn encode_decimal(value: &Decimal) -> Word {
    encode(&value.storage())
}

/// ABI-decodes a fixed-point decimal of the specified shape from a word.
pub fn decode_decimal(
    word: &Word,
    bit_width: u32,
    exponent: u32,
    signed: bool,
) -> Result<Decimal, Error> {
    Decimal::new(decode(word, bit_width, signed)?, bit_width, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethnum::{I256, U256};
    use hex_literal::hex;
    use proptest::prelude::*;

    #[test]
    fn zero_extends_unsigned_integers() {
        let value = FixedInt::from(255_u8);
        assert_eq!(
            encode(&value),
            hex!("00000000000000000000000000000000000000000000000000000000000000ff"),
        );
    }

    #[test]
    fn sign_extends_signed_integers() {
        assert_eq!(encode(&FixedInt::from(-1_i8)), [0xff; 32]);
        assert_eq!(
            encode(&FixedInt::from_i128(24, -2).unwrap()),
            hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe"),
        );
        assert_eq!(
            encode(&FixedInt::from_i128(24, 2).unwrap()),
            hex!("0000000000000000000000000000000000000000000000000000000000000002"),
        );
    }

    #[test]
    fn decodes_canonical_words() {
        let word = hex!("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(decode(&word, 8, false), Ok(FixedInt::from(1_u8)));
        assert_eq!(decode(&[0xff; 32], 8, true), Ok(FixedInt::from(-1_i8)));
        assert_eq!(decode(&[0xff; 32], 256, false), Ok(FixedInt::from(U256::MAX)));
        assert_eq!(
            decode(
                &hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffff8000000000"),
                40,
                true
            ),
            Ok(FixedInt::from_i128(40, -(1 << 39)).unwrap())
        );
    }

    #[test]
    fn rejects_non_canonical_padding() {
        // Dirty high bytes for an unsigned value.
        let word = hex!("0000000000000000000000000000000000000000000000000000000000000101");
        assert_eq!(decode(&word, 8, false), Err(Error::MalformedEncoding));

        // Negative low byte without sign extension.
        let word = hex!("0000000000000000000000000000000000000000000000000000000000000080");
        assert_eq!(decode(&word, 8, true), Err(Error::MalformedEncoding));

        // Sign extension of a positive value.
        let word = hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(decode(&word, 8, true), Err(Error::MalformedEncoding));

        // Sign extended unsigned value.
        assert_eq!(decode(&[0xff; 32], 248, false), Err(Error::MalformedEncoding));
    }

    #[test]
    fn rejects_invalid_bit_widths() {
        assert_eq!(decode(&[0; 32], 12, false), Err(Error::Shape));
    }

    #[test]
    fn decimals_encode_as_their_storage() {
        let value = Decimal::new(FixedInt::from_i128(128, -1_500).unwrap(), 128, 3).unwrap();
        let word = encode_decimal(&value);
        assert_eq!(word, encode(&FixedInt::from_i128(128, -1_500).unwrap()));
        assert_eq!(decode_decimal(&word, 128, 3, true), Ok(value));
        assert_eq!(decode_decimal(&word, 128, 81, true), Err(Error::Shape));
        assert_eq!(
            decode_decimal(&word, 128, 3, false),
            Err(Error::MalformedEncoding)
        );
    }

    fn shape() -> impl Strategy<Value = (u32, bool)> {
        ((1_u32..=32).prop_map(|n| n * 8), any::<bool>())
    }

    fn value() -> impl Strategy<Value = FixedInt> {
        (shape(), any::<[u8; 32]>()).prop_map(|((bit_width, signed), bytes)| {
            let len = bit_width as usize / 8;
            FixedInt::from_be_bytes(&bytes[32 - len..], bit_width, signed).unwrap()
        })
    }

    proptest! {
        #[test]
        fn round_trips_all_shapes(value in value()) {
            let word = encode(&value);
            let decoded = decode(&word, *value.bit_width(), value.is_signed()).unwrap();
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn encoding_is_injective(a in value(), bytes in any::<[u8; 32]>()) {
            let len = a.bit_width().byte_len();
            let b = FixedInt::from_be_bytes(
                &bytes[32 - len..],
                *a.bit_width(),
                a.is_signed(),
            )
            .unwrap();
            prop_assert_eq!(a == b, encode(&a) == encode(&b));
        }

        #[test]
        fn signed_words_match_i256(value in any::<i128>()) {
            let expected = I256::new(value).to_be_bytes();
            prop_assert_eq!(encode(&FixedInt::from(value)), expected);
        }
    }
}
