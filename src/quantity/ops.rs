// ============================================================================
// Quantity Arithmetic
// Dimension checking and uncertainty propagation
// ============================================================================

use super::{si_units, Quantity, QuantityError, QuantityResult};
use crate::config::NumericConfig;
use crate::dimension::Dimensions;
use crate::numeric::Number;
use crate::units::Units;
use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

impl Quantity {
    fn require_same_dimensions(&self, other: &Quantity, operation: &'static str) -> QuantityResult<()> {
        if self.dimensions != other.dimensions {
            return Err(QuantityError::mismatch(
                operation,
                self.dimensions,
                other.dimensions,
            ));
        }
        Ok(())
    }

    /// Relative uncertainty of a sum or difference.
    ///
    /// Absolute uncertainties add in quadrature and are re-expressed against
    /// the result's magnitude. A zero result carries zero uncertainty.
    pub(super) fn sum_uncertainty(&self, other: &Quantity, result: &Number) -> f64 {
        let combined = self.absolute_uncertainty().hypot(other.absolute_uncertainty());
        let magnitude = result.abs().to_f64();
        if combined == 0.0 || magnitude == 0.0 || !magnitude.is_finite() {
            0.0
        } else {
            combined / magnitude
        }
    }

    /// Units for a product or quotient.
    ///
    /// A dimensionless factor keeps the other operand's unit when that unit
    /// is purely multiplicative; anything else is shown in coherent SI.
    fn combined_units(&self, other: &Quantity, dimensions: Dimensions) -> Arc<Units> {
        if other.is_dimensionless() && !self.units.is_affine() && self.dimensions == dimensions {
            Arc::clone(&self.units)
        } else if self.is_dimensionless() && !other.units.is_affine() && other.dimensions == dimensions
        {
            Arc::clone(&other.units)
        } else {
            si_units(dimensions)
        }
    }

    fn same_or_si_units(&self) -> Arc<Units> {
        if self.units.is_affine() {
            si_units(self.dimensions)
        } else {
            Arc::clone(&self.units)
        }
    }

    // ========================================================================
    // Additive Operations
    // ========================================================================

    /// Sum of two quantities of the same kind, in the left operand's units.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn try_add(&self, other: &Quantity) -> QuantityResult<Quantity> {
        self.require_same_dimensions(other, "add")?;
        let value = &self.value_si + &other.value_si;
        let uncertainty = self.sum_uncertainty(other, &value);
        Ok(Quantity::from_parts(
            value,
            self.dimensions,
            Arc::clone(&self.units),
            uncertainty,
        ))
    }

    /// Difference of two quantities of the same kind, in the left operand's
    /// units.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn try_sub(&self, other: &Quantity) -> QuantityResult<Quantity> {
        self.require_same_dimensions(other, "subtract")?;
        let value = &self.value_si - &other.value_si;
        let uncertainty = self.sum_uncertainty(other, &value);
        Ok(Quantity::from_parts(
            value,
            self.dimensions,
            Arc::clone(&self.units),
            uncertainty,
        ))
    }

    // ========================================================================
    // Multiplicative Operations
    // ========================================================================

    fn product(&self, other: &Quantity) -> Quantity {
        let dimensions = self.dimensions * other.dimensions;
        Quantity::from_parts(
            &self.value_si * &other.value_si,
            dimensions,
            self.combined_units(other, dimensions),
            self.relative_uncertainty.hypot(other.relative_uncertainty),
        )
    }

    fn quotient(&self, other: &Quantity) -> Quantity {
        let dimensions = self.dimensions / other.dimensions;
        let units = if other.is_dimensionless() {
            self.combined_units(other, dimensions)
        } else {
            si_units(dimensions)
        };
        Quantity::from_parts(
            &self.value_si / &other.value_si,
            dimensions,
            units,
            self.relative_uncertainty.hypot(other.relative_uncertainty),
        )
    }

    /// Multiply by an exact scalar. The relative uncertainty is unchanged.
    pub fn scale(&self, factor: impl Into<Number>) -> Quantity {
        Quantity::from_parts(
            &self.value_si * &factor.into(),
            self.dimensions,
            self.same_or_si_units(),
            self.relative_uncertainty,
        )
    }

    /// Raise to an integer power: exponents scale by `n` and the relative
    /// uncertainty by `|n|`.
    pub fn powi(&self, n: i32) -> Quantity {
        let units = if n == 1 {
            Arc::clone(&self.units)
        } else {
            si_units(self.dimensions.powi(n))
        };
        Quantity::from_parts(
            self.value_si.powi(n as i64),
            self.dimensions.powi(n),
            units,
            f64::from(n.unsigned_abs()) * self.relative_uncertainty,
        )
    }

    /// Square root. Halves every exponent and the relative uncertainty.
    ///
    /// # Errors
    /// Returns `NonIntegralRoot` if some exponent is odd.
    pub fn sqrt(&self) -> QuantityResult<Quantity> {
        let dimensions = self
            .dimensions
            .root(2)
            .ok_or(QuantityError::NonIntegralRoot {
                dimensions: self.dimensions,
                root: 2,
            })?;
        Ok(Quantity::from_parts(
            self.value_si.sqrt(),
            dimensions,
            si_units(dimensions),
            self.relative_uncertainty / 2.0,
        ))
    }

    pub fn reciprocal(&self) -> Quantity {
        let dimensions = self.dimensions.reciprocal();
        Quantity::from_parts(
            self.value_si.reciprocal(),
            dimensions,
            si_units(dimensions),
            self.relative_uncertainty,
        )
    }

    pub fn abs(&self) -> Quantity {
        Quantity::from_parts(
            self.value_si.abs(),
            self.dimensions,
            self.same_or_si_units(),
            self.relative_uncertainty,
        )
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Value equality of the SI values.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn try_eq(&self, other: &Quantity) -> QuantityResult<bool> {
        self.require_same_dimensions(other, "compare")?;
        Ok(self.value_si == other.value_si)
    }

    /// Order of the SI values; `None` when either is NaN.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn try_cmp(&self, other: &Quantity) -> QuantityResult<Option<Ordering>> {
        self.require_same_dimensions(other, "compare")?;
        Ok(self.value_si.partial_cmp(&other.value_si))
    }

    /// Equality within a relative tolerance.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn approx_eq(&self, other: &Quantity, relative_tolerance: f64) -> QuantityResult<bool> {
        self.require_same_dimensions(other, "compare")?;
        Ok(self.value_si.approx_eq(&other.value_si, relative_tolerance))
    }

    /// [`approx_eq`](Self::approx_eq) with the configured tolerance.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the dimensions differ.
    pub fn approx_eq_with(&self, other: &Quantity, config: &NumericConfig) -> QuantityResult<bool> {
        self.approx_eq(other, config.relative_tolerance)
    }
}

// ============================================================================
// Operator Traits
// ============================================================================
//
// Addition and subtraction can fail on mismatched dimensions, so they yield a
// QuantityResult. Products and quotients are always defined.

impl Add for &Quantity {
    type Output = QuantityResult<Quantity>;

    fn add(self, rhs: &Quantity) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Sub for &Quantity {
    type Output = QuantityResult<Quantity>;

    fn sub(self, rhs: &Quantity) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        self.product(rhs)
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        self.product(&rhs)
    }
}

impl Div for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        self.quotient(rhs)
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        self.quotient(&rhs)
    }
}

impl Mul<Number> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Number) -> Quantity {
        self.scale(rhs)
    }
}

impl Div<Number> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: Number) -> Quantity {
        self.scale(rhs.reciprocal())
    }
}

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::from_parts(
            -&self.value_si,
            self.dimensions,
            self.same_or_si_units(),
            self.relative_uncertainty,
        )
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::standard;

    fn length(value: i64, uncertainty: f64) -> Quantity {
        Quantity::new(value, &standard::METERS)
            .with_uncertainty(uncertainty)
            .unwrap()
    }

    #[test]
    fn test_add_requires_matching_dimensions() {
        let l = Quantity::new(1, &standard::METERS);
        let m = Quantity::new(1, &standard::KILOGRAMS);
        let err = (&l + &m).unwrap_err();
        assert!(matches!(
            err,
            QuantityError::DimensionMismatch {
                operation: "add",
                ..
            }
        ));
        assert!((&l - &m).is_err());
    }

    #[test]
    fn test_multiply_combines_dimensions() {
        let l = Quantity::new(2, &standard::METERS);
        let m = Quantity::new(3, &standard::KILOGRAMS);
        let p = &l * &m;
        assert_eq!(p.dimensions(), Dimensions::LENGTH * Dimensions::MASS);
        assert_eq!(p.value_si(), &Number::from(6));
    }

    #[test]
    fn test_add_mixed_units() {
        let a = Quantity::new(1, &standard::HOURS);
        let b = Quantity::new(30, &standard::MINUTES);
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.value_si(), &Number::from(5400));
        assert_eq!(sum.value(), Number::from(1.5));
        assert_eq!(sum.units().name(), "hours");
    }

    #[test]
    fn test_sum_uncertainty_is_root_sum_square_of_absolutes() {
        // 3 ± 0.3 and 4 ± 0.4 -> 7 ± 0.5
        let sum = (&length(3, 0.1) + &length(4, 0.1)).unwrap();
        assert!((sum.absolute_uncertainty() - 0.5).abs() < 1e-12);
        assert!((sum.relative_uncertainty() - 0.5 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_difference_has_zero_uncertainty() {
        let diff = (&length(3, 0.1) - &length(3, 0.1)).unwrap();
        assert!(diff.value_si().is_zero());
        assert_eq!(diff.relative_uncertainty(), 0.0);
    }

    #[test]
    fn test_product_uncertainty() {
        let a = Quantity::from_si(3, Dimensions::LENGTH).with_uncertainty(0.1).unwrap();
        let b = Quantity::from_si(4, Dimensions::LENGTH).with_uncertainty(0.05).unwrap();
        let p = &a * &b;
        assert_eq!(p.value_si(), &Number::from(12));
        assert_eq!(p.dimensions(), Dimensions::AREA);
        assert!((p.relative_uncertainty() - 0.1118).abs() < 1e-4);
        assert!((p.relative_uncertainty() - (0.01f64 + 0.0025).sqrt()).abs() < 1e-15);

        let q = &a / &b;
        assert!(q.is_dimensionless());
        assert_eq!(q.value_si(), &Number::from(0.75));
        assert_eq!(q.relative_uncertainty(), p.relative_uncertainty());
    }

    #[test]
    fn test_power() {
        let l = length(2, 0.01);
        let v = l.powi(3);
        assert_eq!(v.dimensions(), Dimensions::VOLUME);
        assert_eq!(v.value_si(), &Number::from(8));
        assert!((v.relative_uncertainty() - 0.03).abs() < 1e-15);

        let inv = l.powi(-2);
        assert_eq!(inv.dimensions(), Dimensions::AREA.reciprocal());
        assert_eq!(inv.value_si(), &Number::from(0.25));
        assert!((inv.relative_uncertainty() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_sqrt() {
        let area = Quantity::from_si(16, Dimensions::AREA).with_uncertainty(0.02).unwrap();
        let side = area.sqrt().unwrap();
        assert_eq!(side.dimensions(), Dimensions::LENGTH);
        assert_eq!(side.value_si(), &Number::from(4));
        assert!((side.relative_uncertainty() - 0.01).abs() < 1e-15);

        assert!(matches!(
            Quantity::from_si(8, Dimensions::VOLUME).sqrt(),
            Err(QuantityError::NonIntegralRoot { root: 2, .. })
        ));
    }

    #[test]
    fn test_scalar_operations_keep_units() {
        let l = Quantity::new(3, &standard::FEET);
        let doubled = &l * Number::from(2);
        assert_eq!(doubled.units().name(), "feet");
        assert_eq!(doubled.value(), Number::from(6));

        let halved = &l / Number::from(2);
        assert_eq!(halved.value(), Number::from(1.5));

        let ratio = Quantity::from_si(2, Dimensions::DIMENSIONLESS);
        assert_eq!((&l * &ratio).units().name(), "feet");
        assert_eq!((&l / &ratio).units().name(), "feet");
    }

    #[test]
    fn test_reciprocal_and_negation() {
        let t = Quantity::new(4, &standard::SECONDS).with_uncertainty(0.1).unwrap();
        let f = t.reciprocal();
        assert_eq!(f.dimensions(), Dimensions::FREQUENCY);
        assert_eq!(f.value_si(), &Number::from(0.25));
        assert_eq!(f.relative_uncertainty(), 0.1);

        let n = -&t;
        assert_eq!(n.value(), Number::from(-4));
        assert_eq!(n.abs().value(), Number::from(4));
    }

    #[test]
    fn test_comparison() {
        let a = Quantity::new(1, &standard::HOURS);
        let b = Quantity::new(60, &standard::MINUTES);
        let c = Quantity::new(61, &standard::MINUTES);
        assert!(a.try_eq(&b).unwrap());
        assert_eq!(a.try_cmp(&c).unwrap(), Some(Ordering::Less));

        let m = Quantity::new(1, &standard::METERS);
        assert!(matches!(
            a.try_cmp(&m),
            Err(QuantityError::DimensionMismatch {
                operation: "compare",
                ..
            })
        ));
        assert!(a.try_eq(&m).is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = Quantity::from_si(1.0, Dimensions::LENGTH);
        let b = Quantity::from_si(1.0 + 1e-14, Dimensions::LENGTH);
        assert!(a.approx_eq_with(&b, &NumericConfig::default()).unwrap());
        assert!(!a.approx_eq(&b, 1e-16).unwrap());
        assert!(a.approx_eq(&Quantity::from_si(1.0, Dimensions::MASS), 1e-9).is_err());
    }
}
