//! Parse errors for the fundamental types.

use thiserror::Error;

/// Failure to parse a [`Dec`](crate::Dec) from its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecError {
    #[error("decimal string cannot be empty")]
    Empty,

    #[error("too many decimal points in {0:?}")]
    TooManyPoints(String),

    #[error("missing integer part in {0:?}")]
    MissingIntegerPart(String),

    #[error("missing digits after the decimal point in {0:?}")]
    MissingFraction(String),

    #[error("invalid digit in {0:?}")]
    InvalidDigit(String),

    #[error("{input:?} has {digits} fractional digits, at most 18 are supported")]
    TooPrecise { input: String, digits: usize },
}

/// Common error type for the roster input types.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid decimal: {0}")]
    Decimal(#[from] ParseDecError),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid slot snapshot: {0}")]
    Snapshot(String),
}
