//! Numeric errors.

use std::{
    error,
    fmt::{self, Display, Formatter},
};

/// An error produced by a Solidity numeric operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// A value or byte length does not fit the declared bit width.
    Range,
    /// An arithmetic result exceeds the range of its shape.
    Overflow,
    /// Division or remainder by zero.
    DivisionByZero,
    /// Operands have different shapes, or a bit width or exponent is not
    /// a valid Solidity one.
    Shape,
    /// An ABI word is not a canonical zero or sign extension of its value.
    MalformedEncoding,
    /// A result or decimal string carries more precision than the target
    /// exponent can represent.
    PrecisionLoss,
    /// A negative value was supplied for an unsigned shape.
    Sign,
    /// Text is not a decimal number.
    Syntax,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Range => "value does not fit the bit width",
            Self::Overflow => "arithmetic overflow",
            Self::DivisionByZero => "division by zero",
            Self::Shape => "invalid or mismatched numeric shape",
            Self::MalformedEncoding => "non-canonical ABI word padding",
            Self::PrecisionLoss => "value exceeds the precision of the exponent",
            Self::Sign => "negative value for unsigned type",
            Self::Syntax => "invalid decimal number",
        })
    }
}

impl error::Error for Error {}
