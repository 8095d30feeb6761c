// ============================================================================
// Number Tower
// Closed set of numeric representations with simplification
// ============================================================================

use super::decimal::PreciseDecimal;
use super::errors::{NumericError, NumericResult};
use crate::config::NumericConfig;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest magnitude below which every integral `f64` is an exact `i64`.
const EXACT_F64_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// A real-valued member of the tower.
///
/// Used on its own for real arithmetic and as the component type of
/// [`Number::Imaginary`] and [`Number::Complex`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Real {
    Integer(i64),
    Double(f64),
    Decimal(PreciseDecimal),
}

/// A value in the numeric tower.
///
/// Arithmetic between any two variants is defined (see the `arith` module)
/// and every result is passed through [`Number::simplify`], so
/// `Complex(5, 0)` comes back as `Integer(5)` and `2.5 * 2` as `Integer(5)`.
///
/// Undefined results never panic or error: they are `Double(NaN)` or
/// `Double(±∞)`, exactly as native floating point would produce.
///
/// # Ordering
/// [`Number::cmp_real_part`] compares real parts only. The `<`/`>` operators
/// follow it while real parts differ, but fall back to the imaginary parts
/// when they tie, so `3 < 3 + 7i` holds even though the real parts are
/// equal. This keeps `partial_cmp` returning `Equal` only for `==` values.
///
/// # Example
/// ```
/// use physical_quantity::numeric::Number;
///
/// let a = Number::from(5);
/// let b: Number = "5.0".parse().unwrap();
/// assert_eq!(a, b);
///
/// let z = Number::complex(3, 4) * Number::complex(3, -4);
/// assert_eq!(z, Number::Integer(25));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    /// Exact machine integer
    Integer(i64),
    /// Binary floating point value
    Double(f64),
    /// Arbitrary-precision decimal
    Decimal(PreciseDecimal),
    /// Real coefficient of `i`
    Imaginary(Real),
    /// Real and imaginary components
    Complex(Real, Real),
}

// ============================================================================
// Real
// ============================================================================

impl Real {
    pub const ZERO: Real = Real::Integer(0);
    pub const ONE: Real = Real::Integer(1);

    pub fn is_zero(&self) -> bool {
        match self {
            Real::Integer(i) => *i == 0,
            Real::Double(d) => *d == 0.0,
            Real::Decimal(d) => d.is_zero(),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Real::Double(d) if d.is_nan())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Real::Double(d) if d.is_infinite())
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Real::Integer(i) => *i < 0,
            Real::Double(d) => *d < 0.0,
            Real::Decimal(d) => d.is_negative(),
        }
    }

    /// True when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        match self {
            Real::Integer(_) => true,
            Real::Double(d) => d.is_finite() && d.fract() == 0.0,
            Real::Decimal(d) => d.is_integer(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Real::Integer(i) => *i as f64,
            Real::Double(d) => *d,
            Real::Decimal(d) => d.to_f64(),
        }
    }

    /// Machine integer, if the value is integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Real::Integer(i) => Some(*i),
            Real::Double(d) if d.fract() == 0.0 && d.abs() <= EXACT_F64_INTEGER => {
                Some(*d as i64)
            },
            Real::Double(_) => None,
            Real::Decimal(d) => d.to_i64(),
        }
    }

    /// Narrow to the smallest variant that holds the value exactly.
    ///
    /// A decimal never narrows to a double; it only becomes an integer.
    pub fn simplify(self) -> Real {
        match self {
            Real::Integer(_) => self,
            Real::Double(d) => {
                if d.is_finite() && d.fract() == 0.0 && d.abs() <= EXACT_F64_INTEGER {
                    Real::Integer(d as i64)
                } else {
                    Real::Double(d)
                }
            },
            Real::Decimal(d) => match d.to_i64() {
                Some(i) => Real::Integer(i),
                None => Real::Decimal(d),
            },
        }
    }
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Real::Integer(value)
    }
}

impl From<i32> for Real {
    fn from(value: i32) -> Self {
        Real::Integer(value as i64)
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real::Double(value)
    }
}

impl From<PreciseDecimal> for Real {
    fn from(value: PreciseDecimal) -> Self {
        Real::Decimal(value)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::Integer(i) => write!(f, "{}", i),
            Real::Double(d) => write!(f, "{}", d),
            Real::Decimal(d) => write!(f, "{}", d),
        }
    }
}

// ============================================================================
// Number: Construction
// ============================================================================

impl Number {
    pub const ZERO: Number = Number::Integer(0);
    pub const ONE: Number = Number::Integer(1);
    pub const NAN: Number = Number::Double(f64::NAN);
    pub const INFINITY: Number = Number::Double(f64::INFINITY);
    pub const NEG_INFINITY: Number = Number::Double(f64::NEG_INFINITY);

    /// Unsimplified `re + im·i`.
    pub fn complex(re: impl Into<Real>, im: impl Into<Real>) -> Number {
        Number::Complex(re.into(), im.into())
    }

    /// Unsimplified `coefficient·i`.
    pub fn imaginary(coefficient: impl Into<Real>) -> Number {
        Number::Imaginary(coefficient.into())
    }

    /// Parse a decimal literal with the configured precision.
    ///
    /// # Errors
    /// Returns the decimal parse error, or `InvalidPrecision` if the
    /// configuration is out of range.
    pub fn parse_with(s: &str, config: &NumericConfig) -> NumericResult<Number> {
        PreciseDecimal::parse_with(s, config)
            .map(|d| Number::Decimal(d).simplify())
    }

    /// Exactly `mantissa × 10^power`, as an `Integer` when it fits.
    ///
    /// Powers beyond the decimal exponent range give `±Infinity` or `0`.
    pub fn exact(mantissa: i64, power: i64) -> Number {
        match PreciseDecimal::from_i64(mantissa).scale_by_power_of_ten(power) {
            Ok(d) => Number::Decimal(d).simplify(),
            Err(_) => Number::Double(mantissa as f64 * 10f64.powf(power as f64)).simplify(),
        }
    }

    /// Build `re + im·i` and simplify it.
    pub(crate) fn from_parts(re: Real, im: Real) -> Number {
        Number::Complex(re, im).simplify()
    }

    // ========================================================================
    // Simplification
    // ========================================================================

    /// Narrow to the minimal variant that represents the value exactly.
    ///
    /// Idempotent. A zero imaginary part collapses `Complex` to its real part,
    /// `Imaginary(0)` becomes `Integer(0)`, integral doubles and decimals in
    /// machine range become `Integer`.
    pub fn simplify(self) -> Number {
        match self {
            Number::Integer(_) => self,
            Number::Double(d) => Real::Double(d).simplify().into(),
            Number::Decimal(d) => Real::Decimal(d).simplify().into(),
            Number::Imaginary(im) => {
                let im = im.simplify();
                if im.is_zero() {
                    Number::Integer(0)
                } else {
                    Number::Imaginary(im)
                }
            },
            Number::Complex(re, im) => {
                let re = re.simplify();
                let im = im.simplify();
                if im.is_zero() {
                    re.into()
                } else if re.is_zero() {
                    Number::Imaginary(im)
                } else {
                    Number::Complex(re, im)
                }
            },
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Split into real and imaginary components.
    pub fn parts(&self) -> (Real, Real) {
        match self {
            Number::Integer(i) => (Real::Integer(*i), Real::ZERO),
            Number::Double(d) => (Real::Double(*d), Real::ZERO),
            Number::Decimal(d) => (Real::Decimal(d.clone()), Real::ZERO),
            Number::Imaginary(im) => (Real::ZERO, im.clone()),
            Number::Complex(re, im) => (re.clone(), im.clone()),
        }
    }

    pub fn real_part(&self) -> Number {
        self.parts().0.into()
    }

    pub fn imaginary_part(&self) -> Number {
        self.parts().1.into()
    }

    /// The value as a [`Real`], if it has no imaginary component.
    pub fn as_real(&self) -> Option<Real> {
        match self {
            Number::Integer(i) => Some(Real::Integer(*i)),
            Number::Double(d) => Some(Real::Double(*d)),
            Number::Decimal(d) => Some(Real::Decimal(d.clone())),
            Number::Imaginary(_) | Number::Complex(..) => None,
        }
    }

    /// True for the real-valued variants.
    pub fn is_real(&self) -> bool {
        matches!(
            self,
            Number::Integer(_) | Number::Double(_) | Number::Decimal(_)
        )
    }

    pub fn is_zero(&self) -> bool {
        let (re, im) = self.parts();
        re.is_zero() && im.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        let (re, im) = self.parts();
        re.is_nan() || im.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        let (re, im) = self.parts();
        re.is_infinite() || im.is_infinite()
    }

    /// True for real values without a fractional part.
    pub fn is_integral(&self) -> bool {
        self.as_real().is_some_and(|r| r.is_integral())
    }

    /// The real part as a binary float.
    pub fn to_f64(&self) -> f64 {
        self.parts().0.to_f64()
    }

    /// Machine integer for integral real values in range.
    pub fn to_i64(&self) -> Option<i64> {
        self.as_real().and_then(|r| r.to_i64())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Real> for Number {
    fn from(value: Real) -> Self {
        match value {
            Real::Integer(i) => Number::Integer(i),
            Real::Double(d) => Number::Double(d),
            Real::Decimal(d) => Number::Decimal(d),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Double(value)
    }
}

impl From<PreciseDecimal> for Number {
    fn from(value: PreciseDecimal) -> Self {
        Number::Decimal(value)
    }
}

impl TryFrom<&str> for Number {
    type Error = NumericError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::str::FromStr for Number {
    type Err = NumericError;

    /// Parse a decimal literal. Integral literals in machine range come back
    /// as `Integer`, everything else as `Decimal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<PreciseDecimal>()
            .map(|d| Number::Decimal(d).simplify())
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::ZERO
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Double(d) => write!(f, "{}", d),
            Number::Decimal(d) => write!(f, "{}", d),
            Number::Imaginary(im) => write!(f, "{}i", im),
            Number::Complex(re, im) => {
                if im.is_negative() {
                    let magnitude: Number = Number::from(im.clone()).abs();
                    write!(f, "{} - {}i", re, magnitude)
                } else {
                    write!(f, "{} + {}i", re, im)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_complex_with_zero_imaginary() {
        let z = Number::complex(5, 0).simplify();
        assert!(matches!(z, Number::Integer(5)));

        let z = Number::complex(2.5, 0.0).simplify();
        assert!(matches!(z, Number::Double(d) if d == 2.5));

        let z = Number::complex(0, 3).simplify();
        assert!(matches!(z, Number::Imaginary(Real::Integer(3))));
    }

    #[test]
    fn test_simplify_imaginary_zero() {
        assert!(matches!(Number::imaginary(0).simplify(), Number::Integer(0)));
        assert!(matches!(
            Number::imaginary(0.0).simplify(),
            Number::Integer(0)
        ));
    }

    #[test]
    fn test_simplify_narrows_reals() {
        assert!(matches!(Number::Double(4.0).simplify(), Number::Integer(4)));
        assert!(matches!(Number::Double(4.5).simplify(), Number::Double(_)));
        assert!(matches!(Number::Double(1e300).simplify(), Number::Double(_)));

        let d: PreciseDecimal = "42.000".parse().unwrap();
        assert!(matches!(Number::Decimal(d).simplify(), Number::Integer(42)));

        let d: PreciseDecimal = "42.5".parse().unwrap();
        assert!(matches!(Number::Decimal(d).simplify(), Number::Decimal(_)));

        let big: PreciseDecimal = "1e30".parse().unwrap();
        assert!(matches!(Number::Decimal(big).simplify(), Number::Decimal(_)));
    }

    #[test]
    fn test_simplify_idempotent() {
        let values = [
            Number::complex(1.5, 0),
            Number::complex(0, 2.0),
            Number::imaginary(0.0),
            Number::Double(3.0),
            "7.25".parse().unwrap(),
        ];
        for v in values {
            let once = v.simplify();
            let twice = once.clone().simplify();
            assert_eq!(format!("{:?}", once), format!("{:?}", twice));
        }
    }

    #[test]
    fn test_parse() {
        assert!(matches!("12".parse::<Number>().unwrap(), Number::Integer(12)));
        assert!(matches!(
            "0.1".parse::<Number>().unwrap(),
            Number::Decimal(_)
        ));
        assert_eq!(
            "abc".parse::<Number>().unwrap_err(),
            NumericError::InvalidDigit('a')
        );

        let config = NumericConfig::compact();
        let n = Number::parse_with("3.14159265358979323846", &config).unwrap();
        match n {
            Number::Decimal(d) => assert_eq!(d.digit_count(), config.decimal_precision),
            other => panic!("expected decimal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_exponent_out_of_range() {
        assert_eq!(
            "1e9223372036854775807".parse::<Number>().unwrap_err(),
            NumericError::Overflow
        );
        assert_eq!(
            "1e-9223372036854775807".parse::<Number>().unwrap_err(),
            NumericError::Underflow
        );
    }

    #[test]
    fn test_exact() {
        assert!(matches!(Number::exact(3048, -4), Number::Decimal(_)));
        assert!(matches!(Number::exact(15, 2), Number::Integer(1500)));
        assert!(matches!(Number::exact(1, i64::MAX), Number::Double(d) if d == f64::INFINITY));
        assert!(matches!(Number::exact(-1, i64::MAX), Number::Double(d) if d == f64::NEG_INFINITY));
        assert!(matches!(Number::exact(7, i64::MIN), Number::Integer(0)));
        assert!(Number::exact(0, i64::MAX).is_zero());
    }

    #[test]
    fn test_parts_and_predicates() {
        let z = Number::complex(1, -2);
        assert_eq!(z.real_part(), Number::Integer(1));
        assert_eq!(z.imaginary_part(), Number::Integer(-2));
        assert!(!z.is_real());
        assert!(Number::from(3).is_integral());
        assert!(!Number::from(3.5).is_integral());
        assert!(Number::NAN.is_nan());
        assert!(Number::complex(1.0, f64::INFINITY).is_infinite());
        assert!(Number::imaginary(0).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::from(7).to_string(), "7");
        assert_eq!(Number::imaginary(2).to_string(), "2i");
        assert_eq!(Number::complex(1, 2).to_string(), "1 + 2i");
        assert_eq!(Number::complex(1, -2).to_string(), "1 - 2i");
        assert_eq!("1.50".parse::<Number>().unwrap().to_string(), "1.5");
    }
}
