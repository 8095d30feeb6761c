// ============================================================================
// Precise Decimal
// Arbitrary-precision base-10 arithmetic on digit sequences
// ============================================================================

use super::digit::Digit;
use super::errors::{NumericError, NumericResult};
use crate::config::NumericConfig;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// Significant digits kept when no precision is requested.
pub const DEFAULT_PRECISION: usize = 50;

/// Upper bound accepted for any precision setting.
pub const MAX_PRECISION: usize = 10_000;

/// Largest magnitude of a value's adjusted exponent.
///
/// Kept well inside `i64` so exponent sums and differences of in-range
/// operands cannot wrap before they are checked.
pub const MAX_EXPONENT: i64 = i64::MAX / 4;

type Digits = SmallVec<[Digit; 32]>;

/// Arbitrary-precision decimal number.
///
/// The value is `±d₁d₂…dₙ × 10^power`, where `d₁…dₙ` is the digit sequence
/// read as an integer. After every operation the sequence carries no leading
/// or trailing zeros (zero itself is the single digit `0` with power `0`), so
/// two equal values always share one representation.
///
/// `precision` caps the number of significant digits. Anything longer is
/// truncated toward zero, keeping the most significant digits and moving the
/// lost positions into `power`.
///
/// The adjusted exponent stays within `±MAX_EXPONENT`. Operations that would
/// leave that range report `Overflow` or `Underflow` through the `checked_*`
/// methods; the operator impls panic instead.
///
/// # Example
/// ```
/// use physical_quantity::numeric::PreciseDecimal;
///
/// let a: PreciseDecimal = "1.013".parse().unwrap();
/// let b: PreciseDecimal = "1.2".parse().unwrap();
/// let c = &a * &b;
/// assert_eq!(c.to_string(), "1.2156");
/// assert_eq!(c.digit_count(), 5);
/// assert_eq!(c.power(), -4);
/// ```
#[derive(Clone)]
pub struct PreciseDecimal {
    digits: Digits,
    negative: bool,
    power: i64,
    precision: usize,
}

// ============================================================================
// Digit-Sequence Helpers
// Unsigned integer magnitudes, most significant digit first
// ============================================================================

mod magnitude {
    use std::cmp::Ordering;

    pub(super) fn strip_leading(v: &mut Vec<u8>) {
        let lead = v.iter().take_while(|&&d| d == 0).count();
        v.drain(..lead);
    }

    /// Compare magnitudes that carry no leading zeros.
    pub(super) fn cmp(a: &[u8], b: &[u8]) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }

    pub(super) fn add(a: &[u8], b: &[u8]) -> Vec<u8> {
        let len = a.len().max(b.len());
        let mut out = Vec::with_capacity(len + 1);
        let mut carry = 0u8;
        let mut ia = a.iter().rev();
        let mut ib = b.iter().rev();
        for _ in 0..len {
            let s = ia.next().copied().unwrap_or(0) + ib.next().copied().unwrap_or(0) + carry;
            out.push(s % 10);
            carry = s / 10;
        }
        if carry > 0 {
            out.push(carry);
        }
        out.reverse();
        out
    }

    /// `a - b`, requires `a >= b`.
    pub(super) fn sub(a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(a.len());
        let mut borrow = 0i8;
        let mut ib = b.iter().rev();
        for &da in a.iter().rev() {
            let mut d = da as i8 - ib.next().copied().unwrap_or(0) as i8 - borrow;
            if d < 0 {
                d += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(d as u8);
        }
        debug_assert_eq!(borrow, 0);
        out.reverse();
        strip_leading(&mut out);
        out
    }

    pub(super) fn mul(a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut acc = vec![0u32; a.len() + b.len()];
        for (i, &da) in a.iter().enumerate().rev() {
            for (j, &db) in b.iter().enumerate().rev() {
                acc[i + j + 1] += da as u32 * db as u32;
            }
        }
        for k in (1..acc.len()).rev() {
            let carry = acc[k] / 10;
            acc[k] %= 10;
            acc[k - 1] += carry;
        }
        let mut out: Vec<u8> = acc.into_iter().map(|d| d as u8).collect();
        strip_leading(&mut out);
        out
    }

    /// Bring down `digit` into a running remainder and subtract `divisor`
    /// as many times as it fits. Returns the quotient digit.
    pub(super) fn step(rem: &mut Vec<u8>, digit: u8, divisor: &[u8]) -> u8 {
        if !rem.is_empty() || digit != 0 {
            rem.push(digit);
        }
        let mut q = 0;
        while cmp(rem, divisor) != Ordering::Less {
            *rem = sub(rem, divisor);
            q += 1;
        }
        q
    }
}

impl PreciseDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// The value zero.
    pub fn zero() -> Self {
        Self::zero_with_precision(DEFAULT_PRECISION)
    }

    /// The value one.
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    fn zero_with_precision(precision: usize) -> Self {
        let mut digits = Digits::new();
        digits.push(Digit::ZERO);
        Self {
            digits,
            negative: false,
            power: 0,
            precision,
        }
    }

    fn check_precision(precision: usize) -> NumericResult<usize> {
        if precision == 0 || precision > MAX_PRECISION {
            Err(NumericError::InvalidPrecision(precision))
        } else {
            Ok(precision)
        }
    }

    /// Reject values whose adjusted exponent left `±MAX_EXPONENT`.
    fn in_range(self) -> NumericResult<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        let adjusted = self.adjusted_exponent();
        if adjusted > MAX_EXPONENT {
            Err(NumericError::Overflow)
        } else if adjusted < -MAX_EXPONENT {
            Err(NumericError::Underflow)
        } else {
            Ok(self)
        }
    }

    /// Build a normalized value from raw magnitude digits.
    fn from_parts(negative: bool, mut raw: Vec<u8>, mut power: i64, precision: usize) -> Self {
        magnitude::strip_leading(&mut raw);
        if raw.is_empty() {
            return Self::zero_with_precision(precision);
        }
        if raw.len() > precision {
            let dropped = raw.len() - precision;
            tracing::trace!(dropped, precision, "decimal result truncated to precision");
            raw.truncate(precision);
            power += dropped as i64;
        }
        let trailing = raw.iter().rev().take_while(|&&d| d == 0).count();
        raw.truncate(raw.len() - trailing);
        power += trailing as i64;

        Self {
            digits: raw.into_iter().map(Digit::from_u8_unchecked).collect(),
            negative,
            power,
            precision,
        }
    }

    /// Create from an integer, exactly.
    pub fn from_i64(value: i64) -> Self {
        Self::from_i128(value as i128, DEFAULT_PRECISION)
    }

    fn from_i128(value: i128, precision: usize) -> Self {
        let raw = value
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|b| b - b'0')
            .collect();
        Self::from_parts(value < 0, raw, 0, precision)
    }

    /// Create from a binary float using its shortest round-trip decimal form.
    ///
    /// # Errors
    /// Returns `NotFinite` for NaN and infinities.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NotFinite);
        }
        format!("{:e}", value).parse()
    }

    /// Parse a decimal literal keeping at most `precision` significant digits.
    ///
    /// Accepts an optional sign, digits with an optional decimal point, and an
    /// optional `e`/`E` exponent: `"-12.5"`, `".25"`, `"6.02214076e23"`.
    ///
    /// # Errors
    /// - `InvalidFormat` for empty input, a missing mantissa or a bad exponent
    /// - `InvalidDigit` for a stray character in the mantissa
    /// - `InvalidPrecision` if `precision` is out of range
    /// - `Overflow`/`Underflow` if the exponent is beyond `±MAX_EXPONENT`
    pub fn parse_with_precision(s: &str, precision: usize) -> NumericResult<Self> {
        let precision = Self::check_precision(precision)?;
        let s = s.trim();

        let (negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = s[pos + 1..]
                    .parse()
                    .map_err(|_| NumericError::InvalidFormat)?;
                if exp > MAX_EXPONENT {
                    return Err(NumericError::Overflow);
                }
                if exp < -MAX_EXPONENT {
                    return Err(NumericError::Underflow);
                }
                (&s[..pos], exp)
            },
            None => (s, 0),
        };

        let (int_str, frac_str) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidFormat);
        }

        let raw = int_str
            .chars()
            .chain(frac_str.chars())
            .map(|c| Digit::from_char(c).map(Digit::value))
            .collect::<NumericResult<Vec<u8>>>()?;

        let power = exponent
            .checked_sub(frac_str.len() as i64)
            .ok_or(NumericError::Underflow)?;
        Self::from_parts(negative, raw, power, precision).in_range()
    }

    /// Parse a decimal literal at the precision carried by `config`.
    pub fn parse_with(s: &str, config: &NumericConfig) -> NumericResult<Self> {
        Self::parse_with_precision(s, config.decimal_precision)
    }

    /// Return the same value capped at a new precision.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` if `precision` is zero or too large.
    pub fn with_precision(&self, precision: usize) -> NumericResult<Self> {
        let precision = Self::check_precision(precision)?;
        Ok(Self::from_parts(
            self.negative,
            self.raw_digits(),
            self.power,
            precision,
        ))
    }

    /// Re-cap at a precision already known to be valid.
    pub(crate) fn capped(&self, precision: usize) -> Self {
        if precision == self.precision {
            return self.clone();
        }
        Self::from_parts(self.negative, self.raw_digits(), self.power, precision)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Significant digits, most significant first.
    #[inline]
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Power of ten applied to the digit sequence read as an integer.
    #[inline]
    pub fn power(&self) -> i64 {
        self.power
    }

    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0].is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True when the value has no fractional digits.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.power >= 0
    }

    /// Exponent of the leading digit in scientific notation.
    #[inline]
    pub fn adjusted_exponent(&self) -> i64 {
        self.power + self.digits.len() as i64 - 1
    }

    fn raw_digits(&self) -> Vec<u8> {
        self.digits.iter().map(|d| d.value()).collect()
    }

    /// Shift the decimal point by `k` places (multiply by `10^k`).
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result's exponent is beyond
    /// `±MAX_EXPONENT`.
    pub fn scale_by_power_of_ten(&self, k: i64) -> NumericResult<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let mut out = self.clone();
        out.power = self
            .power
            .checked_add(k)
            .ok_or_else(|| exponent_error(k))?;
        out.in_range()
    }

    /// Shift by an amount already known to keep the exponent in range.
    fn shifted(&self, k: i64) -> Self {
        let mut out = self.clone();
        if !out.is_zero() {
            out.power += k;
        }
        out
    }

    pub fn abs(&self) -> Self {
        let mut out = self.clone();
        out.negative = false;
        out
    }

    /// Convert to the nearest binary float.
    pub fn to_f64(&self) -> f64 {
        let mantissa: String = self.digits.iter().map(|d| d.to_char()).collect();
        let sign = if self.negative { "-" } else { "" };
        format!("{}{}e{}", sign, mantissa, self.power)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Convert to a machine integer when the value is integral and in range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() || self.adjusted_exponent() > 18 {
            return None;
        }
        let mut acc: i128 = 0;
        for d in &self.digits {
            acc = acc * 10 + d.value() as i128;
        }
        for _ in 0..self.power {
            acc *= 10;
        }
        if self.negative {
            acc = -acc;
        }
        i64::try_from(acc).ok()
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    fn add_impl(&self, rhs: &Self) -> Self {
        let precision = self.precision.max(rhs.precision);
        if rhs.is_zero() {
            return Self::from_parts(self.negative, self.raw_digits(), self.power, precision);
        }
        if self.is_zero() {
            return Self::from_parts(rhs.negative, rhs.raw_digits(), rhs.power, precision);
        }

        let (big, small) = if self.adjusted_exponent() >= rhs.adjusted_exponent() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // An operand entirely below the truncation window only matters through
        // its sign, so it is replaced by one unit just under that window.
        let cutoff = big.adjusted_exponent() - precision as i64 - 2;
        let (small_digits, small_power) = if small.adjusted_exponent() < cutoff {
            (vec![1u8], cutoff)
        } else {
            (small.raw_digits(), small.power)
        };

        let base = big.power.min(small_power);
        let mut a = big.raw_digits();
        a.resize(a.len() + (big.power - base) as usize, 0);
        let mut b = small_digits;
        b.resize(b.len() + (small_power - base) as usize, 0);

        if big.negative == small.negative {
            return Self::from_parts(big.negative, magnitude::add(&a, &b), base, precision);
        }
        match magnitude::cmp(&a, &b) {
            Ordering::Equal => Self::zero_with_precision(precision),
            Ordering::Greater => {
                Self::from_parts(big.negative, magnitude::sub(&a, &b), base, precision)
            },
            Ordering::Less => {
                Self::from_parts(small.negative, magnitude::sub(&b, &a), base, precision)
            },
        }
    }

    /// Product of two decimals.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the exponent leaves `±MAX_EXPONENT`.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.precision.max(rhs.precision);
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero_with_precision(precision));
        }
        let power = self
            .power
            .checked_add(rhs.power)
            .ok_or_else(|| exponent_error(self.power))?;
        let product = magnitude::mul(&self.raw_digits(), &rhs.raw_digits());
        Self::from_parts(self.negative != rhs.negative, product, power, precision).in_range()
    }

    /// Sum of two decimals.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the exponent leaves `±MAX_EXPONENT`.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.add_impl(rhs).in_range()
    }

    /// Difference of two decimals.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the exponent leaves `±MAX_EXPONENT`.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.add_impl(&-rhs).in_range()
    }

    /// Long division to the larger of the two precisions.
    ///
    /// Terminating quotients are exact; others are truncated at the cap.
    ///
    /// # Errors
    /// - `DivisionByZero` when `rhs` is zero
    /// - `Overflow`/`Underflow` if the exponent leaves `±MAX_EXPONENT`
    pub fn checked_div(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.precision.max(rhs.precision);
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero_with_precision(precision));
        }

        let dividend = self.raw_digits();
        let divisor = rhs.raw_digits();
        let n = dividend.len();

        let mut rem = Vec::with_capacity(divisor.len() + 1);
        let mut quotient = Vec::with_capacity(precision);
        let mut steps = 0usize;
        loop {
            let d = dividend.get(steps).copied().unwrap_or(0);
            let q = magnitude::step(&mut rem, d, &divisor);
            if q > 0 || !quotient.is_empty() {
                quotient.push(q);
            }
            steps += 1;
            if quotient.len() >= precision || (steps >= n && rem.is_empty()) {
                break;
            }
        }

        // quotient ≈ dividend · 10^(steps - n) / divisor
        let power = self
            .power
            .checked_sub(rhs.power)
            .and_then(|p| p.checked_add(n as i64 - steps as i64))
            .ok_or_else(|| exponent_error(self.power))?;
        Self::from_parts(self.negative != rhs.negative, quotient, power, precision).in_range()
    }

    /// Remainder of truncated division; the result takes the sign of `self`.
    ///
    /// # Errors
    /// - `DivisionByZero` when `rhs` is zero
    /// - `PrecisionLoss` when the operands are more than `MAX_PRECISION`
    ///   orders of magnitude apart
    pub fn checked_rem(&self, rhs: &Self) -> NumericResult<Self> {
        let precision = self.precision.max(rhs.precision);
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if self.abs() < rhs.abs() {
            return self.with_precision(precision);
        }
        if self.adjusted_exponent() - rhs.adjusted_exponent() > MAX_PRECISION as i64 {
            return Err(NumericError::PrecisionLoss);
        }

        let base = self.power.min(rhs.power);
        let mut a = self.raw_digits();
        a.resize(a.len() + (self.power - base) as usize, 0);
        let mut b = rhs.raw_digits();
        b.resize(b.len() + (rhs.power - base) as usize, 0);

        let mut rem = Vec::with_capacity(b.len() + 1);
        for d in a {
            magnitude::step(&mut rem, d, &b);
        }
        Ok(Self::from_parts(self.negative, rem, base, precision))
    }

    /// Integer power by repeated squaring. Negative exponents divide into one.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero base with a negative exponent
    /// - `Overflow`/`Underflow` if the exponent leaves `±MAX_EXPONENT`
    pub fn powi(&self, exponent: i64) -> NumericResult<Self> {
        let one = Self::from_i128(1, self.precision);
        let mut result = one.clone();
        let mut base = self.clone();
        let mut n = exponent.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            n >>= 1;
            if n > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        if exponent < 0 {
            one.checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Square root by Newton iteration at this value's precision.
    ///
    /// Returns `None` for negative values.
    pub fn sqrt(&self) -> Option<Self> {
        if self.negative {
            return None;
        }
        if self.is_zero() {
            return Some(self.clone());
        }

        let working = self.precision + 5;
        let s = Self::from_parts(false, self.raw_digits(), self.power, working);

        // Seed from a float on a mantissa in [1, 100) so huge exponents are safe.
        let exp = self.adjusted_exponent().div_euclid(2) * 2;
        let seed = s.shifted(-exp).to_f64().sqrt();
        let mut x = Self::from_f64(seed)
            .ok()?
            .with_precision(working)
            .ok()?
            .shifted(exp / 2);
        let two = Self::from_i128(2, working);

        for _ in 0..200 {
            let next = (&x + &s.checked_div(&x).ok()?).checked_div(&two).ok()?;
            if next == x {
                break;
            }
            x = next;
        }
        x.with_precision(self.precision).ok()
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Drop the fractional digits.
    pub fn trunc(&self) -> Self {
        if self.is_integer() {
            return self.clone();
        }
        let keep = self.digits.len() as i64 + self.power;
        if keep <= 0 {
            return Self::zero_with_precision(self.precision);
        }
        let raw = self.raw_digits()[..keep as usize].to_vec();
        Self::from_parts(self.negative, raw, 0, self.precision)
    }

    fn unit_away_from_zero(&self) -> Self {
        let unit = Self::from_i128(if self.negative { -1 } else { 1 }, self.precision);
        self + &unit
    }

    /// Round to the nearest integer; ties go away from zero.
    pub fn round(&self) -> Self {
        if self.is_integer() {
            return self.clone();
        }
        let keep = self.digits.len() as i64 + self.power;
        let first_dropped = if keep < 0 {
            0
        } else {
            self.digits[keep as usize].value()
        };
        let truncated = self.trunc();
        if first_dropped >= 5 {
            let mut t = truncated;
            t.negative = self.negative;
            t.unit_away_from_zero()
        } else {
            truncated
        }
    }

    /// Round toward negative infinity.
    pub fn floor(&self) -> Self {
        let t = self.trunc();
        if self.negative && !self.is_integer() {
            &t - &Self::from_i128(1, self.precision)
        } else {
            t
        }
    }

    /// Round toward positive infinity.
    pub fn ceil(&self) -> Self {
        let t = self.trunc();
        if !self.negative && !self.is_integer() {
            &t + &Self::from_i128(1, self.precision)
        } else {
            t
        }
    }

    /// Round to `places` digits after the decimal point, ties away from zero.
    pub fn round_dp(&self, places: i64) -> Self {
        if self.is_zero() || self.power.saturating_add(places) >= 0 {
            return self.clone();
        }
        // Below half a unit in the last kept place.
        if self.adjusted_exponent().saturating_add(places) < -1 {
            return Self::zero_with_precision(self.precision);
        }
        self.shifted(places).round().shifted(-places)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        self.adjusted_exponent()
            .cmp(&other.adjusted_exponent())
            .then_with(|| self.digits.as_slice().cmp(other.digits.as_slice()))
    }
}

fn exponent_error(direction: i64) -> NumericError {
    if direction >= 0 {
        NumericError::Overflow
    } else {
        NumericError::Underflow
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for PreciseDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for PreciseDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PreciseDecimal {}

impl PartialOrd for PreciseDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreciseDecimal {
    /// Sign first, then the leading digit's position, then the digits.
    /// Precision does not take part.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }
}

impl Hash for PreciseDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.power.hash(state);
        self.digits.hash(state);
    }
}

impl Neg for PreciseDecimal {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl Neg for &PreciseDecimal {
    type Output = PreciseDecimal;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// Infallible operators for ergonomics (panic when the exponent leaves
// ±MAX_EXPONENT - use checked_* in the tower)
impl Add for &PreciseDecimal {
    type Output = PreciseDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("PreciseDecimal exponent out of range")
    }
}

impl Add for PreciseDecimal {
    type Output = PreciseDecimal;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &PreciseDecimal {
    type Output = PreciseDecimal;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("PreciseDecimal exponent out of range")
    }
}

impl Sub for PreciseDecimal {
    type Output = PreciseDecimal;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs).expect("PreciseDecimal exponent out of range")
    }
}

impl Mul for &PreciseDecimal {
    type Output = PreciseDecimal;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("PreciseDecimal exponent out of range")
    }
}

impl Mul for PreciseDecimal {
    type Output = PreciseDecimal;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl From<i64> for PreciseDecimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for PreciseDecimal {
    fn from(value: i32) -> Self {
        Self::from_i64(value as i64)
    }
}

impl TryFrom<f64> for PreciseDecimal {
    type Error = NumericError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for PreciseDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PreciseDecimal({}, digits={}, power={}, precision={})",
            self,
            self.digits.len(),
            self.power,
            self.precision
        )
    }
}

impl fmt::Display for PreciseDecimal {
    /// Plain notation for moderate exponents, `d.dddE±x` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self.digits.iter().map(|d| d.to_char()).collect();
        let sign = if self.negative { "-" } else { "" };
        let adjusted = self.adjusted_exponent();

        if self.power >= 0 && adjusted < 28 {
            write!(f, "{}{}{}", sign, digits, "0".repeat(self.power as usize))
        } else if self.power < 0 && adjusted >= -7 {
            let point = digits.len() as i64 + self.power;
            if point > 0 {
                let (int_part, frac_part) = digits.split_at(point as usize);
                write!(f, "{}{}.{}", sign, int_part, frac_part)
            } else {
                write!(f, "{}0.{}{}", sign, "0".repeat((-point) as usize), digits)
            }
        } else {
            let (lead, rest) = digits.split_at(1);
            let exp_sign = if adjusted >= 0 { "+" } else { "" };
            if rest.is_empty() {
                write!(f, "{}{}E{}{}", sign, lead, exp_sign, adjusted)
            } else {
                write!(f, "{}{}.{}E{}{}", sign, lead, rest, exp_sign, adjusted)
            }
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for PreciseDecimal {
    type Err = NumericError;

    /// Parse with [`DEFAULT_PRECISION`] significant digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_precision(s, DEFAULT_PRECISION)
    }
}

// ============================================================================
// Conversion to/from rust_decimal (for API boundaries)
// ============================================================================

impl PreciseDecimal {
    /// Convert from `rust_decimal::Decimal`. Always exact.
    pub fn from_rust_decimal(d: rust_decimal::Decimal) -> Self {
        let raw = d
            .mantissa()
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|b| b - b'0')
            .collect();
        Self::from_parts(
            d.is_sign_negative(),
            raw,
            -(d.scale() as i64),
            DEFAULT_PRECISION,
        )
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - `PrecisionLoss` if more than 28 significant or fractional digits
    ///   would be needed
    /// - `Overflow` if the value exceeds the 96-bit mantissa range
    pub fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        const MAX_SCALE: i64 = 28;
        if self.digits.len() as i64 > MAX_SCALE + 1 || self.power < -MAX_SCALE {
            return Err(NumericError::PrecisionLoss);
        }

        let mut mantissa: i128 = 0;
        for d in &self.digits {
            mantissa = mantissa * 10 + d.value() as i128;
        }
        let mut scale = 0u32;
        if self.power >= 0 {
            for _ in 0..self.power {
                mantissa = mantissa.checked_mul(10).ok_or(NumericError::Overflow)?;
            }
        } else {
            scale = (-self.power) as u32;
        }
        if self.negative {
            mantissa = -mantissa;
        }

        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale)
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for PreciseDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PreciseDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
