// ============================================================================
// Tower Comparison
// Value-based equality and ordering across variants
// ============================================================================

use super::decimal::PreciseDecimal;
use super::number::{Number, Real};
use std::cmp::Ordering;

/// Integers at or below this magnitude convert to `f64` exactly.
const EXACT_F64_INTEGER: u64 = 1 << 53;

fn cmp_integer_double(i: i64, d: f64) -> Option<Ordering> {
    if i.unsigned_abs() <= EXACT_F64_INTEGER || !d.is_finite() {
        return (i as f64).partial_cmp(&d);
    }
    let d = PreciseDecimal::from_f64(d).ok()?;
    Some(PreciseDecimal::from_i64(i).cmp(&d))
}

fn cmp_decimal_double(x: &PreciseDecimal, d: f64) -> Option<Ordering> {
    if d.is_nan() {
        None
    } else if d == f64::INFINITY {
        Some(Ordering::Less)
    } else if d == f64::NEG_INFINITY {
        Some(Ordering::Greater)
    } else {
        PreciseDecimal::from_f64(d).ok().map(|d| x.cmp(&d))
    }
}

impl Real {
    /// Compare two real values exactly where the representations allow.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(&self, other: &Real) -> Option<Ordering> {
        match (self, other) {
            (Real::Integer(a), Real::Integer(b)) => Some(a.cmp(b)),
            (Real::Integer(a), Real::Double(b)) => cmp_integer_double(*a, *b),
            (Real::Double(a), Real::Integer(b)) => cmp_integer_double(*b, *a).map(Ordering::reverse),
            (Real::Double(a), Real::Double(b)) => a.partial_cmp(b),
            (Real::Decimal(a), Real::Decimal(b)) => Some(a.cmp(b)),
            (Real::Decimal(a), Real::Integer(b)) => Some(a.cmp(&PreciseDecimal::from_i64(*b))),
            (Real::Integer(a), Real::Decimal(b)) => Some(PreciseDecimal::from_i64(*a).cmp(b)),
            (Real::Decimal(a), Real::Double(b)) => cmp_decimal_double(a, *b),
            (Real::Double(a), Real::Decimal(b)) => cmp_decimal_double(b, *a).map(Ordering::reverse),
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Real) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        self.compare(other)
    }
}

impl Number {
    /// Order by real parts only, ignoring any imaginary component.
    ///
    /// Complex numbers have no natural order. This is the narrowing
    /// convention the tower uses whenever a real value is compared with an
    /// imaginary or complex one: `2 < 3 + 100i` and `3 - 100i > 2`.
    pub fn cmp_real_part(&self, other: &Number) -> Option<Ordering> {
        self.parts().0.compare(&other.parts().0)
    }

    /// Relative closeness of both components as binary floats.
    pub fn approx_eq(&self, other: &Number, relative_tolerance: f64) -> bool {
        if self == other {
            return true;
        }
        let (a, b) = self.parts();
        let (c, d) = other.parts();
        let close = |x: f64, y: f64| {
            let scale = x.abs().max(y.abs());
            x == y || (x - y).abs() <= relative_tolerance * scale
        };
        close(a.to_f64(), c.to_f64()) && close(b.to_f64(), d.to_f64())
    }
}

impl PartialEq for Number {
    /// Equal when both real and imaginary components are equal in value,
    /// whatever their variants: `Integer(5) == Decimal(5.0) == Double(5.0)`.
    fn eq(&self, other: &Number) -> bool {
        let (a, b) = self.parts();
        let (c, d) = other.parts();
        a == c && b == d
    }
}

impl PartialOrd for Number {
    /// Real parts decide (see [`Number::cmp_real_part`]); imaginary parts only
    /// break ties so that the ordering agrees with `==`.
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match self.cmp_real_part(other)? {
            Ordering::Equal => {
                let (_, b) = self.parts();
                let (_, d) = other.parts();
                b.compare(&d)
            },
            unequal => Some(unequal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Number {
        Number::Decimal(s.parse().unwrap())
    }

    #[test]
    fn test_cross_variant_equality() {
        assert_eq!(Number::from(5), dec("5.0"));
        assert_eq!(dec("5.0"), Number::from(5.0));
        assert_eq!(Number::from(5), Number::from(5.0));
        assert_eq!(Number::from(0.1), dec("0.1"));
        assert_ne!(Number::from(5), dec("5.000001"));
        assert_eq!(Number::complex(5, 0), Number::from(5));
        assert_ne!(Number::complex(5, 1), Number::from(5));
    }

    #[test]
    fn test_nan_is_unequal() {
        assert_ne!(Number::NAN, Number::NAN);
        assert_eq!(Number::NAN.partial_cmp(&Number::from(1)), None);
        assert_eq!(dec("1").partial_cmp(&Number::NAN), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Number::from(2) < Number::from(2.5));
        assert!(dec("2.6") > Number::from(2.5));
        assert!(dec("-1e40") < Number::from(i64::MIN));
        assert!(Number::from(i64::MAX) < Number::from(1e19));
        assert!(Number::from(i64::MAX) > Number::from(9.0e18));
        assert!(dec("1e400") < Number::INFINITY);
        assert!(dec("-1e400") > Number::NEG_INFINITY);
    }

    #[test]
    fn test_real_part_convention() {
        assert!(Number::from(2) < Number::complex(3, 100));
        assert!(Number::complex(3, -100) > Number::from(2));
        assert_eq!(
            Number::from(3).cmp_real_part(&Number::complex(3, 7)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::from(3).partial_cmp(&Number::complex(3, 7)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_operators_break_real_ties_by_imaginary_part() {
        assert!(Number::from(3) < Number::complex(3, 7));
        assert!(Number::complex(3, -7) < Number::from(3));
        assert!(Number::imaginary(1) > Number::ZERO);
        assert_eq!(
            Number::imaginary(1).cmp_real_part(&Number::ZERO),
            Some(Ordering::Equal)
        );
        assert!(Number::from(3) <= dec("3.0"));
        assert!(Number::from(3) >= dec("3.0"));
    }

    #[test]
    fn test_approx_eq() {
        let third = Number::from(1) / dec("3");
        assert!(third.approx_eq(&Number::from(1.0 / 3.0), 1e-15));
        assert!(!Number::from(1.0).approx_eq(&Number::from(1.1), 1e-3));
        assert!(Number::complex(1.0, 2.0).approx_eq(&Number::complex(1.0, 2.0 + 1e-14), 1e-12));
    }
}
