// ============================================================================
// Numeric Module
// Numeric tower and arbitrary-precision decimal arithmetic
// ============================================================================
//
// This module provides:
// - Digit: a bounds-checked base-10 digit
// - PreciseDecimal: arbitrary-precision decimal with a significant-digit cap
// - Number: the tower {Integer, Double, Decimal, Imaginary, Complex}
// - Real: the real-valued members, used as complex components
// - NumericError: construction and conversion errors
//
// Design principles:
// - Arithmetic between any two tower members is defined
// - Undefined results are NaN/Infinity sentinels, never panics or errors
// - Results are simplified to the narrowest exact representation
// - A decimal operand keeps the result decimal

mod arith;
mod compare;
mod decimal;
mod digit;
mod errors;
mod number;

pub use decimal::{PreciseDecimal, DEFAULT_PRECISION, MAX_EXPONENT, MAX_PRECISION};
pub use digit::Digit;
pub use errors::{ErrorKind, NumericError, NumericResult};
pub use number::{Number, Real};
