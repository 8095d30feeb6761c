// ============================================================================
// Quantity Module
// Dimensioned values with units and propagated uncertainty
// ============================================================================
//
// A Quantity stores its value in SI base form together with the dimensions
// it measures, the unit it was created in (used for display and natural
// accessors) and a relative standard uncertainty.
//
// Design principles:
// - Values are converted to SI only at the Units boundary
// - Addition, subtraction and comparison require equal dimensions
// - Multiplication and division combine dimensions
// - Uncertainty propagates with first-order root-sum-square rules

pub mod constants;
mod errors;
mod ops;
pub mod temperature;

pub use errors::{QuantityError, QuantityResult};
pub use temperature::{Temperature, TemperatureDifference};

use crate::dimension::Dimensions;
use crate::numeric::Number;
use crate::units::{standard, Units};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dimensioned value.
///
/// # Example
/// ```
/// use physical_quantity::quantity::Quantity;
/// use physical_quantity::units::standard;
/// use physical_quantity::dimension::Dimensions;
///
/// let distance = Quantity::new(3, &standard::METERS).with_uncertainty(0.1).unwrap();
/// let time = Quantity::new(4, &standard::SECONDS).with_uncertainty(0.05).unwrap();
///
/// let speed = &distance / &time;
/// assert_eq!(speed.dimensions(), Dimensions::VELOCITY);
/// assert!((speed.relative_uncertainty() - 0.1118).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "QuantityRepr"))]
pub struct Quantity {
    value_si: Number,
    dimensions: Dimensions,
    units: Arc<Units>,
    relative_uncertainty: f64,
}

impl Quantity {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a value expressed in `units`.
    pub fn new(value: impl Into<Number>, units: &Arc<Units>) -> Self {
        Self {
            value_si: units.to_base(&value.into()),
            dimensions: units.dimensions(),
            units: Arc::clone(units),
            relative_uncertainty: 0.0,
        }
    }

    /// Create from a raw SI base value. Displayed in coherent SI units.
    pub fn from_si(value_si: impl Into<Number>, dimensions: Dimensions) -> Self {
        Self::from_parts(value_si.into(), dimensions, si_units(dimensions), 0.0)
    }

    /// Create from a value in `units`, checking that they measure `expected`.
    ///
    /// This is how a specific quantity kind guards its constructors.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` measures something else.
    pub fn typed(
        value: impl Into<Number>,
        units: &Arc<Units>,
        expected: Dimensions,
    ) -> QuantityResult<Self> {
        check_units(units, expected)?;
        Ok(Self::new(value, units))
    }

    pub(crate) fn from_parts(
        value_si: Number,
        dimensions: Dimensions,
        units: Arc<Units>,
        relative_uncertainty: f64,
    ) -> Self {
        Self {
            value_si,
            dimensions,
            units,
            relative_uncertainty,
        }
    }

    /// Attach a relative standard uncertainty.
    ///
    /// # Errors
    /// Returns `InvalidUncertainty` unless the fraction is finite and `>= 0`.
    pub fn with_uncertainty(mut self, relative: f64) -> QuantityResult<Self> {
        if !relative.is_finite() || relative < 0.0 {
            return Err(QuantityError::InvalidUncertainty(relative));
        }
        self.relative_uncertainty = relative;
        Ok(self)
    }

    /// Attach an absolute uncertainty given in this quantity's units.
    ///
    /// # Errors
    /// Returns `InvalidUncertainty` for a negative or non-finite amount, or a
    /// non-zero amount on a zero value (the relative form is undefined).
    pub fn with_absolute_uncertainty(self, absolute: f64) -> QuantityResult<Self> {
        if !absolute.is_finite() || absolute < 0.0 {
            return Err(QuantityError::InvalidUncertainty(absolute));
        }
        let absolute_si = self
            .units
            .to_base_delta(&Number::from(absolute))
            .abs()
            .to_f64();
        let magnitude = self.magnitude_f64();
        if magnitude == 0.0 {
            return if absolute_si == 0.0 {
                self.with_uncertainty(0.0)
            } else {
                Err(QuantityError::InvalidUncertainty(f64::INFINITY))
            };
        }
        self.with_uncertainty(absolute_si / magnitude)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Value in SI base form
    pub fn value_si(&self) -> &Number {
        &self.value_si
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn units(&self) -> &Arc<Units> {
        &self.units
    }

    pub fn relative_uncertainty(&self) -> f64 {
        self.relative_uncertainty
    }

    /// Standard uncertainty in SI base units
    pub fn absolute_uncertainty(&self) -> f64 {
        self.relative_uncertainty * self.magnitude_f64()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimensions.is_dimensionless()
    }

    pub(crate) fn magnitude_f64(&self) -> f64 {
        self.value_si.abs().to_f64()
    }

    // ========================================================================
    // Unit Conversion
    // ========================================================================

    /// Value expressed in this quantity's own units.
    pub fn value(&self) -> Number {
        self.units.from_base(&self.value_si)
    }

    /// Value expressed in `units`.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` measures other dimensions.
    pub fn value_in_units(&self, units: &Units) -> QuantityResult<Number> {
        check_units(units, self.dimensions)?;
        Ok(units.from_base(&self.value_si))
    }

    /// Same quantity, displayed in `units`.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` measures other dimensions.
    pub fn in_units(&self, units: &Arc<Units>) -> QuantityResult<Quantity> {
        check_units(units, self.dimensions)?;
        Ok(Self::from_parts(
            self.value_si.clone(),
            self.dimensions,
            Arc::clone(units),
            self.relative_uncertainty,
        ))
    }

    /// Plain number for a dimensionless quantity.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the quantity has dimensions.
    pub fn to_number(&self) -> QuantityResult<Number> {
        if !self.is_dimensionless() {
            return Err(QuantityError::mismatch(
                "convert to a number",
                self.dimensions,
                Dimensions::DIMENSIONLESS,
            ));
        }
        Ok(self.value_si.clone())
    }
}

/// Wire form of a [`Quantity`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct QuantityRepr {
    value_si: Number,
    dimensions: Dimensions,
    units: Arc<Units>,
    relative_uncertainty: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<QuantityRepr> for Quantity {
    type Error = QuantityError;

    fn try_from(repr: QuantityRepr) -> QuantityResult<Self> {
        check_units(&repr.units, repr.dimensions)?;
        Quantity::from_parts(repr.value_si, repr.dimensions, repr.units, 0.0)
            .with_uncertainty(repr.relative_uncertainty)
    }
}

fn check_units(units: &Units, expected: Dimensions) -> QuantityResult<()> {
    if units.dimensions() != expected {
        return Err(QuantityError::IncompatibleUnits {
            unit: units.name().to_string(),
            expected,
        });
    }
    Ok(())
}

/// Coherent SI units for results that carry no named unit.
pub(crate) fn si_units(dimensions: Dimensions) -> Arc<Units> {
    if dimensions.is_dimensionless() {
        Arc::clone(&*standard::UNITLESS)
    } else {
        Arc::new(Units::si(dimensions))
    }
}

impl fmt::Display for Quantity {
    /// `value unit`, followed by `± uncertainty` in the same unit when the
    /// uncertainty is non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())?;
        if self.relative_uncertainty > 0.0 {
            let absolute = self
                .units
                .from_base_delta(&Number::from(self.absolute_uncertainty()))
                .to_f64();
            write!(f, " ± {}", absolute)?;
        }
        if !self.units.abbreviation().is_empty() {
            write!(f, " {}", self.units.abbreviation())?;
        }
        Ok(())
    }
}
