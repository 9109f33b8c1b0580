//! Decimal text for Solidity numbers.
//!
//! Decimal strings are an optional `-` sign, one or more integer digits and,
//! optionally, a `.` followed by one or more fractional digits. Parsing never
//! rounds: fractional digits beyond the exponent are only accepted if they are
//! all zero.
//!
//! Formatting produces canonical text: no leading integer zeros, no sign on
//! zero and exactly as many fractional digits as the exponent. `format` only
//! inverts `parse` for canonical text, so `"-0.00"` formats back as `"0.00"`
//! and `"0012.50"` as `"12.50"`.

use crate::{
    decimal::Decimal,
    error::Error,
    int::FixedInt,
    shape::{BitWidth, Exponent},
};
use ethnum::U256;

/// Parses a fixed-point decimal of the specified shape from decimal text.
pub fn parse(text: &str, bit_width: u32, exponent: u32, signed: bool) -> Result<Decimal, Error> {
    let width = BitWidth::try_from(bit_width)?;
    let exponent = Exponent::try_from(exponent)?;

    let (negative, unsigned) = split_sign(text, signed)?;
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) if is_digits(fraction) => (integer, fraction),
        Some(_) => return Err(Error::Syntax),
        None => (unsigned, ""),
    };
    if !is_digits(integer) {
        return Err(Error::Syntax);
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > exponent.get() as usize {
        tracing::trace!(text, exponent = exponent.get(), "decimal text exceeds precision");
        return Err(Error::PrecisionLoss);
    }

    let mut magnitude = accumulate(U256::ZERO, integer)?;
    magnitude = accumulate(magnitude, fraction)?;
    for _ in fraction.len()..exponent.get() as usize {
        magnitude = magnitude.checked_mul(U256::new(10)).ok_or(Error::Overflow)?;
    }

    let storage =
        FixedInt::from_magnitude(width, signed, negative, magnitude).ok_or(Error::Overflow)?;
    Ok(Decimal::from_storage(storage, exponent))
}

/// Formats a fixed-point decimal as decimal text with exactly as many
/// fractional digits as its exponent.
pub fn format(value: &Decimal) -> String {
    let exponent = value.exponent().get() as usize;
    let digits = value.storage().unsigned_abs().to_string();
    let digits = format!("{digits:0>width$}", width = exponent + 1);
    let (integer, fraction) = digits.split_at(digits.len() - exponent);
    let sign = if value.is_negative() { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}

/// Parses an integer of the specified shape from decimal text.
pub fn parse_int(text: &str, bit_width: u32, signed: bool) -> Result<FixedInt, Error> {
    let width = BitWidth::try_from(bit_width)?;
    let (negative, digits) = split_sign(text, signed)?;
    if !is_digits(digits) {
        return Err(Error::Syntax);
    }
    let magnitude = accumulate(U256::ZERO, digits)?;
    FixedInt::from_magnitude(width, signed, negative, magnitude).ok_or(Error::Overflow)
}

/// Splits off a leading `-`, rejecting it for unsigned shapes.
fn split_sign(text: &str, signed: bool) -> Result<(bool, &str), Error> {
    match text.strip_prefix('-') {
        Some(_) if !signed => Err(Error::Sign),
        Some(rest) => Ok((true, rest)),
        None => Ok((false, text)),
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Appends ASCII decimal digits to an accumulated magnitude.
fn accumulate(magnitude: U256, digits: &str) -> Result<U256, Error> {
    digits.bytes().try_fold(magnitude, |acc, digit| {
        acc.checked_mul(U256::new(10))
            .and_then(|acc| acc.checked_add(U256::new(u128::from(digit - b'0'))))
            .ok_or(Error::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn storage(decimal: Decimal) -> i128 {
        decimal.storage().to_i128().unwrap()
    }

    #[test]
    fn parses_decimal_text() {
        assert_eq!(storage(parse("1.23", 32, 2, false).unwrap()), 123);
        assert_eq!(storage(parse("1.2", 32, 2, false).unwrap()), 120);
        assert_eq!(storage(parse("7", 32, 2, false).unwrap()), 700);
        assert_eq!(storage(parse("-0.05", 32, 2, true).unwrap()), -5);
        assert_eq!(storage(parse("0012.50", 32, 2, true).unwrap()), 1250);
        assert_eq!(storage(parse("42", 8, 0, true).unwrap()), 42);
    }

    #[test]
    fn rejects_excess_precision() {
        assert_eq!(parse("1.234", 32, 2, false), Err(Error::PrecisionLoss));
        assert_eq!(parse("1.5", 32, 0, false), Err(Error::PrecisionLoss));
        // Trailing zeros are not significant.
        assert_eq!(storage(parse("1.2300", 32, 2, false).unwrap()), 123);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(storage(parse("2.55", 8, 2, false).unwrap()), 255);
        assert_eq!(parse("2.56", 8, 2, false), Err(Error::Overflow));
        assert_eq!(storage(parse("-1.28", 8, 2, true).unwrap()), -128);
        assert_eq!(parse("1.28", 8, 2, true), Err(Error::Overflow));
        assert_eq!(parse(&"9".repeat(100), 256, 0, false), Err(Error::Overflow));
        assert_eq!(parse("1", 256, 80, false), Err(Error::Overflow));
    }

    #[test]
    fn rejects_signs_for_unsigned_shapes() {
        assert_eq!(parse("-1.00", 32, 2, false), Err(Error::Sign));
        assert_eq!(parse("-0", 32, 2, false), Err(Error::Sign));
        assert_eq!(parse_int("-1", 32, false), Err(Error::Sign));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "-", ".", "1.", ".5", "1.2.3", "+1", "1e3", " 1", "1_000", "--1", "0x10"] {
            assert_eq!(parse(text, 64, 4, true), Err(Error::Syntax), "{text:?}");
        }
        assert_eq!(parse("1", 12, 4, true), Err(Error::Shape));
        assert_eq!(parse("1", 64, 81, true), Err(Error::Shape));
    }

    #[test]
    fn formats_exact_fractional_digits() {
        let value = Decimal::new(FixedInt::from(1_000_000_000_u32), 32, 9).unwrap();
        assert_eq!(format(&value), "1.000000000");

        let value = Decimal::new(FixedInt::from_i128(24, -5).unwrap(), 24, 3).unwrap();
        assert_eq!(format(&value), "-0.005");

        let value = Decimal::new(FixedInt::from(42_u8), 8, 0).unwrap();
        assert_eq!(format(&value), "42");

        let value = Decimal::zero(8, 2, false).unwrap();
        assert_eq!(format(&value), "0.00");
    }

    #[test]
    fn formats_canonical_text() {
        let value = parse("-0.00", 32, 2, true).unwrap();
        assert_eq!(format(&value), "0.00");
        let value = parse("0012.50", 32, 2, true).unwrap();
        assert_eq!(format(&value), "12.50");
        let value = parse("7.5000", 32, 2, false).unwrap();
        assert_eq!(format(&value), "7.50");
    }

    #[test]
    fn storage_must_fit_declared_width() {
        // A `ufixed16x9` cannot hold 1.000000000, its storage of 10^9 needs
        // 30 bits.
        assert_eq!(FixedInt::from_u128(16, 1_000_000_000), Err(Error::Range));
        assert_eq!(parse("1.000000000", 16, 9, false), Err(Error::Overflow));
    }

    #[test]
    fn formats_extreme_values() {
        let min = Decimal::new(FixedInt::min_value(256, true).unwrap(), 256, 80).unwrap();
        let text = format(&min);
        assert!(text.starts_with("-0.0"));
        assert_eq!(text.len(), "-0.".len() + 80);
        assert_eq!(parse(&text, 256, 80, true), Ok(min));
    }

    #[test]
    fn parses_integers() {
        assert_eq!(parse_int("-128", 8, true), Ok(FixedInt::from(-128_i8)));
        assert_eq!(parse_int("128", 8, true), Err(Error::Overflow));
        assert_eq!(
            parse_int(&U256::MAX.to_string(), 256, false),
            Ok(FixedInt::from(U256::MAX))
        );
        assert_eq!(parse_int("1.0", 256, false), Err(Error::Syntax));
    }

    fn decimal() -> impl Strategy<Value = Decimal> {
        (
            (1_u32..=32).prop_map(|n| n * 8),
            0_u32..=80,
            any::<bool>(),
            any::<[u8; 32]>(),
        )
            .prop_map(|(bit_width, exponent, signed, bytes)| {
                let len = bit_width as usize / 8;
                let storage = FixedInt::from_be_bytes(&bytes[32 - len..], bit_width, signed).unwrap();
                Decimal::new(storage, bit_width, exponent).unwrap()
            })
    }

    /// A random shape with canonical decimal text for it: an optional sign
    /// (never on zero and only for signed shapes), no leading integer zeros
    /// and exactly as many fractional digits as the exponent.
    fn canonical_text() -> impl Strategy<Value = (u32, u32, bool, String)> {
        (
            (1_u32..=32).prop_map(|n| n * 8),
            0_u32..=18,
            any::<bool>(),
            prop_oneof![0_u64..1_000, any::<u64>()],
            any::<u64>(),
            any::<bool>(),
        )
            .prop_map(|(bit_width, exponent, signed, integer, fraction, negative)| {
                let fraction = fraction % 10_u64.pow(exponent);
                let sign = if signed && negative && (integer, fraction) != (0, 0) {
                    "-"
                } else {
                    ""
                };
                let text = if exponent == 0 {
                    format!("{sign}{integer}")
                } else {
                    let width = exponent as usize;
                    format!("{sign}{integer}.{fraction:0width$}")
                };
                (bit_width, exponent, signed, text)
            })
    }

    proptest! {
        #[test]
        fn parse_inverts_format(value in decimal()) {
            let text = format(&value);
            let parsed = parse(
                &text,
                *value.bit_width(),
                *value.exponent(),
                value.is_signed(),
            );
            prop_assert_eq!(parsed, Ok(value));
        }

        #[test]
        fn format_inverts_parse((bit_width, exponent, signed, text) in canonical_text()) {
            match parse(&text, bit_width, exponent, signed) {
                Ok(value) => {
                    prop_assert_eq!(format(&value), text);
                }
                Err(err) => {
                    prop_assert_eq!(err, Error::Overflow);
                }
            }
        }

        #[test]
        fn format_inverts_parse_for_signed_shapes(
            integer in any::<u64>(),
            fraction in 0_u32..1_000_000,
            negative in any::<bool>(),
        ) {
            let sign = if negative && (integer, fraction) != (0, 0) { "-" } else { "" };
            let text = format!("{sign}{integer}.{fraction:06}");
            let value = parse(&text, 128, 6, true).unwrap();
            prop_assert_eq!(format(&value), text);
        }
    }
}
