// ============================================================================
// Temperatures
// Absolute temperatures and temperature differences
// ============================================================================
//
// Both kinds share the temperature dimension but combine differently:
//
//   Temperature - Temperature                     -> TemperatureDifference
//   Temperature ± TemperatureDifference           -> Temperature
//   TemperatureDifference + Temperature           -> Temperature
//   TemperatureDifference ± TemperatureDifference -> TemperatureDifference
//
// Adding two absolute temperatures, or subtracting an absolute temperature
// from a difference, is rejected with InvalidTemperatureOperation.
//
// Absolute temperatures convert through the unit offset, differences through
// the scale only: a 10 °C difference is 10 K, a 10 °C reading is 283.15 K.

use super::{Quantity, QuantityError, QuantityResult};
use crate::dimension::Dimensions;
use crate::numeric::Number;
use crate::units::{standard, Units};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::sync::Arc;

fn check_temperature_units(units: &Units) -> QuantityResult<()> {
    if units.dimensions() != Dimensions::TEMPERATURE {
        return Err(QuantityError::IncompatibleUnits {
            unit: units.name().to_string(),
            expected: Dimensions::TEMPERATURE,
        });
    }
    Ok(())
}

fn check_absolute(kelvin: &Number) -> QuantityResult<()> {
    if kelvin.cmp_real_part(&Number::ZERO) == Some(Ordering::Less) {
        return Err(QuantityError::BelowAbsoluteZero {
            kelvin: kelvin.to_f64(),
        });
    }
    Ok(())
}

// ============================================================================
// Temperature
// ============================================================================

/// An absolute temperature, never below 0 K.
#[derive(Debug, Clone)]
pub struct Temperature(Quantity);

impl Temperature {
    /// Create from a reading in a temperature unit.
    ///
    /// # Errors
    /// - `IncompatibleUnits` if `units` is not a temperature unit
    /// - `BelowAbsoluteZero` if the reading is colder than 0 K
    pub fn new(value: impl Into<Number>, units: &Arc<Units>) -> QuantityResult<Self> {
        check_temperature_units(units)?;
        let quantity = Quantity::new(value, units);
        check_absolute(quantity.value_si())?;
        Ok(Self(quantity))
    }

    pub fn kelvin(value: impl Into<Number>) -> QuantityResult<Self> {
        Self::new(value, &standard::KELVIN)
    }

    pub fn celsius(value: impl Into<Number>) -> QuantityResult<Self> {
        Self::new(value, &standard::CELSIUS)
    }

    pub fn fahrenheit(value: impl Into<Number>) -> QuantityResult<Self> {
        Self::new(value, &standard::FAHRENHEIT)
    }

    /// Wrap a temperature-dimensioned quantity.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the quantity is not a temperature
    /// - `BelowAbsoluteZero` if its SI value is negative
    pub fn from_quantity(quantity: Quantity) -> QuantityResult<Self> {
        if quantity.dimensions() != Dimensions::TEMPERATURE {
            return Err(QuantityError::mismatch(
                "treat as a temperature",
                quantity.dimensions(),
                Dimensions::TEMPERATURE,
            ));
        }
        check_absolute(quantity.value_si())?;
        Ok(Self(quantity))
    }

    pub fn with_uncertainty(self, relative: f64) -> QuantityResult<Self> {
        self.0.with_uncertainty(relative).map(Self)
    }

    /// Reading in this temperature's own unit
    pub fn value(&self) -> Number {
        self.0.value()
    }

    /// Reading in `units`, through the unit offset.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` is not a temperature unit.
    pub fn value_in_units(&self, units: &Units) -> QuantityResult<Number> {
        self.0.value_in_units(units)
    }

    pub fn to_kelvin(&self) -> &Number {
        self.0.value_si()
    }

    pub fn units(&self) -> &Arc<Units> {
        self.0.units()
    }

    pub fn as_quantity(&self) -> &Quantity {
        &self.0
    }

    pub fn into_quantity(self) -> Quantity {
        self.0
    }

    /// `self - other`, as a difference in this temperature's unit.
    pub fn difference(&self, other: &Temperature) -> TemperatureDifference {
        let value_si = &self.0.value_si - &other.0.value_si;
        let uncertainty = self.0.sum_uncertainty(&other.0, &value_si);
        TemperatureDifference(Quantity::from_parts(
            value_si,
            Dimensions::TEMPERATURE,
            Arc::clone(self.units()),
            uncertainty,
        ))
    }

    /// Warm by `delta`.
    ///
    /// # Errors
    /// Returns `BelowAbsoluteZero` if the result is colder than 0 K.
    pub fn raise(&self, delta: &TemperatureDifference) -> QuantityResult<Temperature> {
        self.shift(delta, false)
    }

    /// Cool by `delta`.
    ///
    /// # Errors
    /// Returns `BelowAbsoluteZero` if the result is colder than 0 K.
    pub fn lower(&self, delta: &TemperatureDifference) -> QuantityResult<Temperature> {
        self.shift(delta, true)
    }

    fn shift(&self, delta: &TemperatureDifference, subtract: bool) -> QuantityResult<Temperature> {
        let value_si = if subtract {
            &self.0.value_si - &delta.0.value_si
        } else {
            &self.0.value_si + &delta.0.value_si
        };
        check_absolute(&value_si)?;
        let uncertainty = self.0.sum_uncertainty(&delta.0, &value_si);
        Ok(Temperature(Quantity::from_parts(
            value_si,
            Dimensions::TEMPERATURE,
            Arc::clone(self.units()),
            uncertainty,
        )))
    }
}

impl PartialEq for Temperature {
    fn eq(&self, other: &Temperature) -> bool {
        self.0.value_si == other.0.value_si
    }
}

impl PartialOrd for Temperature {
    fn partial_cmp(&self, other: &Temperature) -> Option<Ordering> {
        self.0.value_si.partial_cmp(&other.0.value_si)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Temperature Difference
// ============================================================================

/// A temperature interval. May be negative.
#[derive(Debug, Clone)]
pub struct TemperatureDifference(Quantity);

impl TemperatureDifference {
    /// Create from an interval in a temperature unit. Offsets do not apply.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` is not a temperature unit.
    pub fn new(delta: impl Into<Number>, units: &Arc<Units>) -> QuantityResult<Self> {
        check_temperature_units(units)?;
        Ok(Self(Quantity::from_parts(
            units.to_base_delta(&delta.into()),
            Dimensions::TEMPERATURE,
            Arc::clone(units),
            0.0,
        )))
    }

    pub fn kelvin(delta: impl Into<Number>) -> Self {
        Self(Quantity::from_parts(
            delta.into(),
            Dimensions::TEMPERATURE,
            Arc::clone(&*standard::KELVIN),
            0.0,
        ))
    }

    pub fn with_uncertainty(self, relative: f64) -> QuantityResult<Self> {
        self.0.with_uncertainty(relative).map(Self)
    }

    /// Interval in its own unit
    pub fn value(&self) -> Number {
        self.0.units.from_base_delta(&self.0.value_si)
    }

    /// Interval in `units`, by scale only.
    ///
    /// # Errors
    /// Returns `IncompatibleUnits` if `units` is not a temperature unit.
    pub fn value_in_units(&self, units: &Units) -> QuantityResult<Number> {
        check_temperature_units(units)?;
        Ok(units.from_base_delta(&self.0.value_si))
    }

    pub fn to_kelvin(&self) -> &Number {
        self.0.value_si()
    }

    pub fn relative_uncertainty(&self) -> f64 {
        self.0.relative_uncertainty()
    }

    pub fn as_quantity(&self) -> &Quantity {
        &self.0
    }

    fn combine(&self, other: &TemperatureDifference, subtract: bool) -> TemperatureDifference {
        let value_si = if subtract {
            &self.0.value_si - &other.0.value_si
        } else {
            &self.0.value_si + &other.0.value_si
        };
        let uncertainty = self.0.sum_uncertainty(&other.0, &value_si);
        TemperatureDifference(Quantity::from_parts(
            value_si,
            Dimensions::TEMPERATURE,
            Arc::clone(&self.0.units),
            uncertainty,
        ))
    }
}

impl fmt::Display for TemperatureDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.0.units.abbreviation())
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

impl Sub for &Temperature {
    type Output = TemperatureDifference;

    fn sub(self, rhs: &Temperature) -> TemperatureDifference {
        self.difference(rhs)
    }
}

impl Add<&TemperatureDifference> for &Temperature {
    type Output = QuantityResult<Temperature>;

    fn add(self, rhs: &TemperatureDifference) -> Self::Output {
        self.raise(rhs)
    }
}

impl Sub<&TemperatureDifference> for &Temperature {
    type Output = QuantityResult<Temperature>;

    fn sub(self, rhs: &TemperatureDifference) -> Self::Output {
        self.lower(rhs)
    }
}

impl Add for &Temperature {
    type Output = QuantityResult<Temperature>;

    fn add(self, _rhs: &Temperature) -> Self::Output {
        Err(QuantityError::InvalidTemperatureOperation {
            operation: "add two absolute temperatures",
        })
    }
}

impl Add for &TemperatureDifference {
    type Output = TemperatureDifference;

    fn add(self, rhs: &TemperatureDifference) -> TemperatureDifference {
        self.combine(rhs, false)
    }
}

impl Sub for &TemperatureDifference {
    type Output = TemperatureDifference;

    fn sub(self, rhs: &TemperatureDifference) -> TemperatureDifference {
        self.combine(rhs, true)
    }
}

impl Add<&Temperature> for &TemperatureDifference {
    type Output = QuantityResult<Temperature>;

    fn add(self, rhs: &Temperature) -> Self::Output {
        rhs.raise(self)
    }
}

impl Sub<&Temperature> for &TemperatureDifference {
    type Output = QuantityResult<Temperature>;

    fn sub(self, _rhs: &Temperature) -> Self::Output {
        Err(QuantityError::InvalidTemperatureOperation {
            operation: "subtract an absolute temperature from a temperature difference",
        })
    }
}
