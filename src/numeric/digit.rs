// ============================================================================
// Digit
// A single bounds-checked base-10 digit
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decimal digit in `0..=9`.
///
/// Construction is checked; there is no way to build a `Digit` holding
/// anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(transparent)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const FIVE: Self = Self(5);
    pub const NINE: Self = Self(9);

    /// Create a digit from an integer.
    ///
    /// # Errors
    /// Returns `DigitOutOfRange` unless `value` is in `0..=9`.
    #[inline]
    pub fn new(value: i64) -> NumericResult<Self> {
        if (0..=9).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(NumericError::DigitOutOfRange(value))
        }
    }

    /// Create a digit from an ASCII character `'0'..='9'`.
    ///
    /// # Errors
    /// Returns `InvalidDigit` for any other character.
    #[inline]
    pub fn from_char(c: char) -> NumericResult<Self> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(NumericError::InvalidDigit(c))
    }

    /// Wrap a value already known to be a digit (carry/borrow arithmetic).
    #[inline]
    pub(crate) const fn from_u8_unchecked(value: u8) -> Self {
        debug_assert!(value <= 9);
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'0' + self.0) as char
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Digit {
    type Error = NumericError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl TryFrom<char> for Digit {
    type Error = NumericError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_range() {
        for v in 0..=9 {
            assert_eq!(Digit::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn test_new_out_of_range() {
        assert_eq!(Digit::new(10), Err(NumericError::DigitOutOfRange(10)));
        assert_eq!(Digit::new(-1), Err(NumericError::DigitOutOfRange(-1)));
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Digit::from_char('7').unwrap().value(), 7);
        assert_eq!(Digit::from_char('a'), Err(NumericError::InvalidDigit('a')));
        assert_eq!(Digit::from_char('٣'), Err(NumericError::InvalidDigit('٣')));
    }

    #[test]
    fn test_to_char_and_display() {
        let d = Digit::try_from('4').unwrap();
        assert_eq!(d.to_char(), '4');
        assert_eq!(d.to_string(), "4");
        assert!(Digit::ZERO.is_zero());
        assert!(Digit::NINE > Digit::FIVE);
    }
}
