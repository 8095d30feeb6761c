// ============================================================================
// Numeric Errors
// Error types for digit, decimal and tower construction
// ============================================================================

use std::fmt;

/// Broad classification of a [`NumericError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value was outside its permitted range
    Range,
    /// Textual input could not be interpreted
    Format,
    /// An arithmetic operation could not produce a representable value
    Arithmetic,
}

/// Errors that can occur while constructing or converting numeric values.
///
/// Arithmetic inside the [`Number`](super::Number) tower never returns these:
/// undefined results are carried as NaN/Infinity sentinels instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Integer outside 0..=9 used to build a digit
    DigitOutOfRange(i64),
    /// Character that is not an ASCII decimal digit
    InvalidDigit(char),
    /// Input string is not a decimal literal
    InvalidFormat,
    /// NaN or infinity cannot be represented as a decimal
    NotFinite,
    /// Result does not fit the target representation
    Overflow,
    /// Result is too small in magnitude for the target representation
    Underflow,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Attempted division by zero on the raw decimal API
    DivisionByZero,
    /// Requested precision is zero or above the supported maximum
    InvalidPrecision(usize),
}

impl NumericError {
    /// The error class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::DigitOutOfRange(_)
            | NumericError::InvalidPrecision(_)
            | NumericError::Overflow
            | NumericError::Underflow => ErrorKind::Range,
            NumericError::InvalidDigit(_) | NumericError::InvalidFormat => ErrorKind::Format,
            NumericError::NotFinite
            | NumericError::PrecisionLoss
            | NumericError::DivisionByZero => ErrorKind::Arithmetic,
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DigitOutOfRange(value) => {
                write!(f, "digit out of range: {} is not in 0..=9", value)
            },
            NumericError::InvalidDigit(c) => write!(f, "invalid digit character: {:?}", c),
            NumericError::InvalidFormat => {
                write!(f, "invalid format: could not parse decimal literal")
            },
            NumericError::NotFinite => write!(f, "value is NaN or infinite"),
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value exceeds target range")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: value below target range")
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidPrecision(p) => {
                write!(f, "invalid precision: {} significant digits", p)
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
