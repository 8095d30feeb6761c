// ============================================================================
// Tower Arithmetic
// Cross-variant dispatch for + − × ÷ % ^ and the unary operations
// ============================================================================
//
// Real operands are first promoted to a common representation:
// - Decimal wins over everything (the other side converts at its precision)
// - Double wins over Integer
// - Integer stays Integer unless the operation overflows or is inexact
//
// Imaginary and Complex operands are decomposed into real components and
// recombined; every public result is simplified.

use super::decimal::PreciseDecimal;
use super::errors::{NumericError, NumericResult};
use super::number::{Number, Real};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Exponents above this use the floating-point path for decimal bases.
const MAX_EXACT_EXPONENT: u64 = 1 << 20;

/// Integer exponents of complex bases above this use the polar form.
const MAX_COMPLEX_REPEAT: u64 = 64;

// ============================================================================
// Promotion
// ============================================================================

enum Promoted {
    Integers(i64, i64),
    Doubles(f64, f64),
    Decimals(PreciseDecimal, PreciseDecimal),
}

fn decimal_from_f64(value: f64, precision: usize) -> Option<PreciseDecimal> {
    PreciseDecimal::from_f64(value)
        .ok()
        .map(|d| d.capped(precision))
}

fn promote(a: &Real, b: &Real) -> Promoted {
    match (a, b) {
        (Real::Integer(x), Real::Integer(y)) => Promoted::Integers(*x, *y),
        (Real::Integer(x), Real::Double(y)) => Promoted::Doubles(*x as f64, *y),
        (Real::Double(x), Real::Integer(y)) => Promoted::Doubles(*x, *y as f64),
        (Real::Double(x), Real::Double(y)) => Promoted::Doubles(*x, *y),
        (Real::Decimal(x), Real::Decimal(y)) => Promoted::Decimals(x.clone(), y.clone()),
        (Real::Decimal(x), Real::Integer(y)) => Promoted::Decimals(
            x.clone(),
            PreciseDecimal::from_i64(*y).capped(x.precision()),
        ),
        (Real::Integer(x), Real::Decimal(y)) => Promoted::Decimals(
            PreciseDecimal::from_i64(*x).capped(y.precision()),
            y.clone(),
        ),
        // NaN and infinities have no decimal form; they stay sentinels.
        (Real::Decimal(x), Real::Double(y)) => match decimal_from_f64(*y, x.precision()) {
            Some(y) => Promoted::Decimals(x.clone(), y),
            None => Promoted::Doubles(x.to_f64(), *y),
        },
        (Real::Double(x), Real::Decimal(y)) => match decimal_from_f64(*x, y.precision()) {
            Some(x) => Promoted::Decimals(x, y.clone()),
            None => Promoted::Doubles(*x, y.to_f64()),
        },
    }
}

fn widen_overflow(op: &'static str, x: i64, y: i64, fallback: f64) -> Real {
    tracing::trace!(op, x, y, "integer overflow widened to double");
    Real::Double(fallback)
}

/// A decimal result whose exponent left the supported range is recomputed in
/// floating point, which saturates to `±Infinity` or flushes to `0`.
fn decimal_or_double(
    op: &'static str,
    result: NumericResult<PreciseDecimal>,
    fallback: impl FnOnce() -> f64,
) -> Real {
    match result {
        Ok(d) => Real::Decimal(d),
        Err(error) => {
            tracing::debug!(op, %error, "decimal exponent out of range widened to double");
            Real::Double(fallback())
        },
    }
}

/// Sentinel for `x / 0` following IEEE conventions.
fn division_sentinel(numerator_zero: bool, numerator_negative: bool) -> Real {
    if numerator_zero {
        Real::Double(f64::NAN)
    } else if numerator_negative {
        Real::Double(f64::NEG_INFINITY)
    } else {
        Real::Double(f64::INFINITY)
    }
}

// ============================================================================
// Real Arithmetic
// ============================================================================

impl Add for &Real {
    type Output = Real;

    fn add(self, rhs: Self) -> Real {
        match promote(self, rhs) {
            Promoted::Integers(x, y) => x
                .checked_add(y)
                .map(Real::Integer)
                .unwrap_or_else(|| widen_overflow("add", x, y, x as f64 + y as f64)),
            Promoted::Doubles(x, y) => Real::Double(x + y),
            Promoted::Decimals(x, y) => {
                decimal_or_double("add", x.checked_add(&y), || x.to_f64() + y.to_f64())
            },
        }
    }
}

impl Sub for &Real {
    type Output = Real;

    fn sub(self, rhs: Self) -> Real {
        match promote(self, rhs) {
            Promoted::Integers(x, y) => x
                .checked_sub(y)
                .map(Real::Integer)
                .unwrap_or_else(|| widen_overflow("sub", x, y, x as f64 - y as f64)),
            Promoted::Doubles(x, y) => Real::Double(x - y),
            Promoted::Decimals(x, y) => {
                decimal_or_double("sub", x.checked_sub(&y), || x.to_f64() - y.to_f64())
            },
        }
    }
}

impl Mul for &Real {
    type Output = Real;

    fn mul(self, rhs: Self) -> Real {
        match promote(self, rhs) {
            Promoted::Integers(x, y) => x
                .checked_mul(y)
                .map(Real::Integer)
                .unwrap_or_else(|| widen_overflow("mul", x, y, x as f64 * y as f64)),
            Promoted::Doubles(x, y) => Real::Double(x * y),
            Promoted::Decimals(x, y) => {
                decimal_or_double("mul", x.checked_mul(&y), || x.to_f64() * y.to_f64())
            },
        }
    }
}

impl Div for &Real {
    type Output = Real;

    fn div(self, rhs: Self) -> Real {
        match promote(self, rhs) {
            Promoted::Integers(x, 0) => division_sentinel(x == 0, x < 0),
            Promoted::Integers(x, y) => match (x.checked_rem(y), x.checked_div(y)) {
                (Some(0), Some(q)) => Real::Integer(q),
                _ => Real::Double(x as f64 / y as f64),
            },
            Promoted::Doubles(x, y) => Real::Double(x / y),
            Promoted::Decimals(x, y) => match x.checked_div(&y) {
                Err(NumericError::DivisionByZero) => {
                    tracing::debug!(numerator = %x, "decimal division by zero widened to double");
                    division_sentinel(x.is_zero(), x.is_negative())
                },
                result => decimal_or_double("div", result, || x.to_f64() / y.to_f64()),
            },
        }
    }
}

impl Rem for &Real {
    type Output = Real;

    fn rem(self, rhs: Self) -> Real {
        match promote(self, rhs) {
            Promoted::Integers(_, 0) => Real::Double(f64::NAN),
            Promoted::Integers(x, y) => Real::Integer(x.wrapping_rem(y)),
            Promoted::Doubles(x, y) => Real::Double(x % y),
            Promoted::Decimals(x, y) => match x.checked_rem(&y) {
                Ok(r) => Real::Decimal(r),
                Err(_) if y.is_zero() => Real::Double(f64::NAN),
                Err(_) => Real::Double(x.to_f64() % y.to_f64()),
            },
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        match self {
            Real::Integer(i) => i
                .checked_neg()
                .map(Real::Integer)
                .unwrap_or(Real::Double(-(*i as f64))),
            Real::Double(d) => Real::Double(-d),
            Real::Decimal(d) => Real::Decimal(-d),
        }
    }
}

impl Real {
    pub fn abs(&self) -> Real {
        match self {
            Real::Integer(i) => i
                .checked_abs()
                .map(Real::Integer)
                .unwrap_or(Real::Double((*i as f64).abs())),
            Real::Double(d) => Real::Double(d.abs()),
            Real::Decimal(d) => Real::Decimal(d.abs()),
        }
    }

    /// Real-only square root: negative inputs give NaN.
    pub fn sqrt(&self) -> Real {
        match self {
            Real::Integer(i) if *i >= 0 => {
                let root = (*i as f64).sqrt().round() as i64;
                if root.checked_mul(root) == Some(*i) {
                    Real::Integer(root)
                } else {
                    Real::Double((*i as f64).sqrt())
                }
            },
            Real::Integer(_) => Real::Double(f64::NAN),
            Real::Double(d) => Real::Double(d.sqrt()),
            Real::Decimal(d) => d
                .sqrt()
                .map(Real::Decimal)
                .unwrap_or(Real::Double(f64::NAN)),
        }
    }

    /// Real power. Negative bases with fractional exponents give NaN.
    pub fn pow(&self, exponent: &Real) -> Real {
        match exponent.clone().simplify() {
            Real::Integer(n) => self.powi(n),
            exponent => {
                let value = self.to_f64().powf(exponent.to_f64());
                let precision = match (self, &exponent) {
                    (Real::Decimal(d), _) | (_, Real::Decimal(d)) => Some(d.precision()),
                    _ => None,
                };
                match precision.and_then(|p| decimal_from_f64(value, p)) {
                    Some(d) => Real::Decimal(d),
                    None => Real::Double(value),
                }
            },
        }
    }

    pub fn powi(&self, n: i64) -> Real {
        match self {
            Real::Integer(b) => {
                let exact = u32::try_from(n).ok().and_then(|e| b.checked_pow(e));
                match exact {
                    Some(v) => Real::Integer(v),
                    None => Real::Double((*b as f64).powf(n as f64)),
                }
            },
            Real::Double(d) => match i32::try_from(n) {
                Ok(e) => Real::Double(d.powi(e)),
                Err(_) => Real::Double(d.powf(n as f64)),
            },
            Real::Decimal(d) => {
                if n.unsigned_abs() > MAX_EXACT_EXPONENT {
                    let value = d.to_f64().powf(n as f64);
                    return decimal_from_f64(value, d.precision())
                        .map(Real::Decimal)
                        .unwrap_or(Real::Double(value));
                }
                match d.powi(n) {
                    Err(NumericError::DivisionByZero) => division_sentinel(false, false),
                    result => decimal_or_double("powi", result, || d.to_f64().powf(n as f64)),
                }
            },
        }
    }

    fn map_rounding(
        &self,
        float: fn(f64) -> f64,
        decimal: fn(&PreciseDecimal) -> PreciseDecimal,
    ) -> Real {
        match self {
            Real::Integer(_) => self.clone(),
            Real::Double(d) => Real::Double(float(*d)),
            Real::Decimal(d) => Real::Decimal(decimal(d)),
        }
    }
}

// ============================================================================
// Number Arithmetic
// ============================================================================

fn add_numbers(lhs: &Number, rhs: &Number) -> Number {
    use Number::*;
    let result = match (lhs, rhs) {
        (Integer(_) | Double(_) | Decimal(_), Integer(_) | Double(_) | Decimal(_)) => {
            let (a, _) = lhs.parts();
            let (b, _) = rhs.parts();
            Number::from(&a + &b)
        },
        (Imaginary(a), Imaginary(b)) => Imaginary(a + b),
        (Imaginary(b), Integer(_) | Double(_) | Decimal(_)) => Complex(rhs.parts().0, b.clone()),
        (Integer(_) | Double(_) | Decimal(_), Imaginary(b)) => Complex(lhs.parts().0, b.clone()),
        (Complex(..), _) | (_, Complex(..)) => {
            let (a, b) = lhs.parts();
            let (c, d) = rhs.parts();
            Complex(&a + &c, &b + &d)
        },
    };
    result.simplify()
}

fn mul_numbers(lhs: &Number, rhs: &Number) -> Number {
    use Number::*;
    let result = match (lhs, rhs) {
        (Integer(_) | Double(_) | Decimal(_), Integer(_) | Double(_) | Decimal(_)) => {
            let (a, _) = lhs.parts();
            let (b, _) = rhs.parts();
            Number::from(&a * &b)
        },
        // bi · di = −bd
        (Imaginary(b), Imaginary(d)) => Number::from(-&(b * d)),
        (Imaginary(b), Integer(_) | Double(_) | Decimal(_)) => Imaginary(b * &rhs.parts().0),
        (Integer(_) | Double(_) | Decimal(_), Imaginary(d)) => Imaginary(&lhs.parts().0 * d),
        (Complex(..), _) | (_, Complex(..)) => {
            let (a, b) = lhs.parts();
            let (c, d) = rhs.parts();
            Complex(&(&a * &c) - &(&b * &d), &(&a * &d) + &(&b * &c))
        },
    };
    result.simplify()
}

fn div_numbers(lhs: &Number, rhs: &Number) -> Number {
    use Number::*;
    let result = match (lhs, rhs) {
        (Integer(_) | Double(_) | Decimal(_), Integer(_) | Double(_) | Decimal(_)) => {
            let (a, _) = lhs.parts();
            let (b, _) = rhs.parts();
            Number::from(&a / &b)
        },
        (Imaginary(b), Imaginary(d)) => Number::from(b / d),
        (Imaginary(b), Integer(_) | Double(_) | Decimal(_)) => Imaginary(b / &rhs.parts().0),
        // a / di = −(a/d)·i
        (Integer(_) | Double(_) | Decimal(_), Imaginary(d)) => {
            Imaginary(-&(&lhs.parts().0 / d))
        },
        (Complex(..), _) | (_, Complex(..)) => {
            let (a, b) = lhs.parts();
            let (c, d) = rhs.parts();
            let denominator = &(&c * &c) + &(&d * &d);
            if denominator.is_zero() {
                return Number::NAN;
            }
            let re = &(&(&a * &c) + &(&b * &d)) / &denominator;
            let im = &(&(&b * &c) - &(&a * &d)) / &denominator;
            Complex(re, im)
        },
    };
    result.simplify()
}

fn rem_numbers(lhs: &Number, rhs: &Number) -> Number {
    match (lhs.as_real(), rhs.as_real()) {
        (Some(a), Some(b)) => Number::from(&a % &b).simplify(),
        // No remainder is defined once an imaginary part is involved.
        _ => Number::NAN,
    }
}

/// `z^w` through `exp(w · ln z)` in floating point.
fn pow_polar(base: &Number, exponent: &Number) -> Number {
    let (x, y) = base.parts();
    let (x, y) = (x.to_f64(), y.to_f64());
    let (c, d) = exponent.parts();
    let (c, d) = (c.to_f64(), d.to_f64());

    if x == 0.0 && y == 0.0 {
        return if c > 0.0 { Number::ZERO } else { Number::NAN };
    }
    let ln_r = x.hypot(y).ln();
    let theta = y.atan2(x);
    let re = c * ln_r - d * theta;
    let im = c * theta + d * ln_r;
    let scale = re.exp();
    Number::complex(scale * im.cos(), scale * im.sin()).simplify()
}

impl Number {
    /// Raise to an arbitrary tower power.
    ///
    /// Real bases with real exponents stay real (negative base with a
    /// fractional exponent is NaN). Complex bases with small integer
    /// exponents multiply exactly; everything else uses the principal value.
    pub fn pow(&self, exponent: &Number) -> Number {
        use Number::*;
        match (self, exponent) {
            (Integer(_) | Double(_) | Decimal(_), Integer(_) | Double(_) | Decimal(_)) => {
                let (a, _) = self.parts();
                let (n, _) = exponent.parts();
                Number::from(a.pow(&n)).simplify()
            },
            (Imaginary(_) | Complex(..), Integer(n)) => self.powi(*n),
            (Imaginary(_) | Complex(..), Double(_) | Decimal(_))
            | (_, Imaginary(_) | Complex(..)) => pow_polar(self, exponent),
        }
    }

    /// Raise to an integer power.
    pub fn powi(&self, n: i64) -> Number {
        if let Some(real) = self.as_real() {
            return Number::from(real.powi(n)).simplify();
        }
        if n.unsigned_abs() > MAX_COMPLEX_REPEAT {
            return pow_polar(self, &Number::Integer(n));
        }
        let mut result = Number::ONE;
        let mut base = self.clone();
        let mut k = n.unsigned_abs();
        while k > 0 {
            if k & 1 == 1 {
                result = &result * &base;
            }
            k >>= 1;
            if k > 0 {
                base = &base * &base;
            }
        }
        if n < 0 {
            result.reciprocal()
        } else {
            result
        }
    }

    /// `1 / self`.
    pub fn reciprocal(&self) -> Number {
        div_numbers(&Number::ONE, self)
    }

    /// Absolute value; the modulus for imaginary and complex values.
    pub fn abs(&self) -> Number {
        match self {
            Number::Integer(_) | Number::Double(_) | Number::Decimal(_) => {
                Number::from(self.parts().0.abs()).simplify()
            },
            Number::Imaginary(im) => Number::from(im.abs()).simplify(),
            Number::Complex(..) => self.magnitude(),
        }
    }

    /// `sqrt(re² + im²)`, kept decimal when either part is.
    pub fn magnitude(&self) -> Number {
        let (a, b) = self.parts();
        let squared = &(&a * &a) + &(&b * &b);
        Number::from(squared.sqrt()).simplify()
    }

    /// Square root.
    ///
    /// For real values this is real-only: negative inputs give NaN. Imaginary
    /// and complex values get the principal complex root.
    pub fn sqrt(&self) -> Number {
        if let Some(real) = self.as_real() {
            return Number::from(real.sqrt()).simplify();
        }
        let (a, b) = self.parts();
        let modulus = self.magnitude().parts().0;
        let two = Real::Integer(2);
        let re = (&(&modulus + &a) / &two).sqrt();
        let im = (&(&modulus - &a) / &two).sqrt();
        let im = if b.is_negative() { -&im } else { im };
        Number::from_parts(re, im)
    }

    pub fn conjugate(&self) -> Number {
        match self {
            Number::Imaginary(im) => Number::Imaginary(-im).simplify(),
            Number::Complex(re, im) => Number::Complex(re.clone(), -im).simplify(),
            _ => self.clone(),
        }
    }

    fn map_components(
        &self,
        float: fn(f64) -> f64,
        decimal: fn(&PreciseDecimal) -> PreciseDecimal,
    ) -> Number {
        let (a, b) = self.parts();
        Number::from_parts(a.map_rounding(float, decimal), b.map_rounding(float, decimal))
    }

    /// Round to the nearest integer, ties away from zero (each component).
    pub fn round(&self) -> Number {
        self.map_components(f64::round, PreciseDecimal::round)
    }

    pub fn floor(&self) -> Number {
        self.map_components(f64::floor, PreciseDecimal::floor)
    }

    pub fn ceil(&self) -> Number {
        self.map_components(f64::ceil, PreciseDecimal::ceil)
    }

    pub fn trunc(&self) -> Number {
        self.map_components(f64::trunc, PreciseDecimal::trunc)
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl $trait<&Number> for &Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                $func(self, rhs)
            }
        }

        impl $trait<Number> for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                $func(&self, &rhs)
            }
        }

        impl $trait<&Number> for Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                $func(&self, rhs)
            }
        }

        impl $trait<Number> for &Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                $func(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_numbers);
forward_binop!(Mul, mul, mul_numbers);
forward_binop!(Div, div, div_numbers);
forward_binop!(Rem, rem, rem_numbers);

fn sub_numbers(lhs: &Number, rhs: &Number) -> Number {
    add_numbers(lhs, &-rhs)
}

forward_binop!(Sub, sub, sub_numbers);

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Integer(i) => Number::from(-&Real::Integer(*i)),
            Number::Double(d) => Number::Double(-d),
            Number::Decimal(d) => Number::Decimal(-d),
            Number::Imaginary(im) => Number::Imaginary(-im),
            Number::Complex(re, im) => Number::Complex(-re, -im),
        }
        .simplify()
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        -&self
    }
}

// ============================================================================
// Tests
// ============================================================================
