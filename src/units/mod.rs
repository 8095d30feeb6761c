// ============================================================================
// Units Module
// Named affine conversions between display values and SI base values
// ============================================================================
//
// This module provides:
// - Units: name, abbreviations, scale, offset and the dimensions it measures
// - MetricPrefix: the SI decimal prefixes used to derive scaled units
// - Standard unit constants shared process-wide
// - UnitRegistry: lookup by name or abbreviation with cached prefixed units
//
// Conversion is affine: to_base scales first and then adds the offset,
// from_base removes the offset first and then divides by the scale.

mod prefix;
mod registry;
pub mod standard;

pub use prefix::MetricPrefix;
pub use registry::UnitRegistry;

use crate::dimension::Dimensions;
use crate::numeric::Number;
use crate::quantity::{QuantityError, QuantityResult};
use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named unit of measurement.
///
/// Immutable once built. The consuming `with_*` methods are only meant for
/// construction, before the unit is shared.
///
/// # Example
/// ```
/// use physical_quantity::units::{standard, MetricPrefix};
/// use physical_quantity::numeric::Number;
///
/// let km = standard::METERS.with_prefix(MetricPrefix::Kilo).unwrap();
/// assert_eq!(km.name(), "kilometers");
/// assert_eq!(km.to_base(&Number::from(5)), Number::from(5000));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Units {
    name: Cow<'static, str>,
    singular: Cow<'static, str>,
    abbreviation: Cow<'static, str>,
    alt_abbreviation: Option<Cow<'static, str>>,
    dimensions: Dimensions,
    conv_to_mks: Number,
    offset: Number,
    metric_base: bool,
}

impl Units {
    /// Create a purely multiplicative unit.
    ///
    /// `conv_to_mks` is the SI base value of one of this unit.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        singular: impl Into<Cow<'static, str>>,
        abbreviation: impl Into<Cow<'static, str>>,
        dimensions: Dimensions,
        conv_to_mks: impl Into<Number>,
    ) -> Self {
        Self {
            name: name.into(),
            singular: singular.into(),
            abbreviation: abbreviation.into(),
            alt_abbreviation: None,
            dimensions,
            conv_to_mks: conv_to_mks.into(),
            offset: Number::ZERO,
            metric_base: false,
        }
    }

    /// Anonymous coherent SI unit for a dimension vector.
    ///
    /// Used for results of multiplication and division, whose dimensions
    /// usually have no named unit.
    pub fn si(dimensions: Dimensions) -> Self {
        let symbol = if dimensions.is_dimensionless() {
            String::new()
        } else {
            dimensions.to_string()
        };
        Self::new(symbol.clone(), symbol.clone(), symbol, dimensions, 1)
    }

    /// Builder method: SI base value of this unit's zero point
    pub fn with_offset(mut self, offset: impl Into<Number>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Builder method: Second accepted abbreviation
    pub fn with_alt_abbreviation(mut self, abbreviation: impl Into<Cow<'static, str>>) -> Self {
        self.alt_abbreviation = Some(abbreviation.into());
        self
    }

    /// Builder method: Allow metric prefixes on this unit
    pub fn metric_base(mut self) -> Self {
        self.metric_base = true;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn alt_abbreviation(&self) -> Option<&str> {
        self.alt_abbreviation.as_deref()
    }

    /// Dimensions of the quantity kind this unit measures
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn conv_to_mks(&self) -> &Number {
        &self.conv_to_mks
    }

    pub fn offset(&self) -> &Number {
        &self.offset
    }

    pub fn is_metric_base(&self) -> bool {
        self.metric_base
    }

    /// True when the unit's zero point is not the SI zero point
    pub fn is_affine(&self) -> bool {
        !self.offset.is_zero()
    }

    pub fn is_compatible(&self, other: &Units) -> bool {
        self.dimensions == other.dimensions
    }

    /// True when `key` is this unit's name, singular or an abbreviation.
    pub fn matches(&self, key: &str) -> bool {
        self.name == key
            || self.singular == key
            || self.abbreviation == key
            || self.alt_abbreviation.as_deref() == Some(key)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert a value in this unit to its SI base value: scale, then offset.
    pub fn to_base(&self, value: &Number) -> Number {
        &(value * &self.conv_to_mks) + &self.offset
    }

    /// Convert an SI base value to this unit: remove offset, then scale.
    pub fn from_base(&self, value_si: &Number) -> Number {
        &(value_si - &self.offset) / &self.conv_to_mks
    }

    /// Convert a difference in this unit to SI. Offsets cancel in differences.
    pub fn to_base_delta(&self, delta: &Number) -> Number {
        delta * &self.conv_to_mks
    }

    /// Convert an SI difference to this unit.
    pub fn from_base_delta(&self, delta_si: &Number) -> Number {
        delta_si / &self.conv_to_mks
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Derive a scaled unit with prefixed names.
    ///
    /// The derived unit's scale is `multiplier × conv_to_mks`; its names and
    /// abbreviations are prefixed with `prefix` and `symbol`. The result is
    /// not itself a metric base, so prefixes never stack.
    ///
    /// # Errors
    /// Returns `NotMetricBase` if this unit does not accept metric prefixes.
    pub fn derive(
        &self,
        prefix: &str,
        symbol: &str,
        multiplier: impl Into<Number>,
    ) -> QuantityResult<Units> {
        if !self.metric_base {
            return Err(QuantityError::NotMetricBase {
                unit: self.name.to_string(),
            });
        }
        let multiplier = multiplier.into();
        Ok(Units {
            name: format!("{}{}", prefix, self.name).into(),
            singular: format!("{}{}", prefix, self.singular).into(),
            abbreviation: format!("{}{}", symbol, self.abbreviation).into(),
            alt_abbreviation: self
                .alt_abbreviation
                .as_ref()
                .map(|alt| format!("{}{}", symbol, alt).into()),
            dimensions: self.dimensions,
            conv_to_mks: &multiplier * &self.conv_to_mks,
            offset: self.offset.clone(),
            metric_base: false,
        })
    }

    /// Derive the unit for a standard metric prefix.
    ///
    /// # Errors
    /// Returns `NotMetricBase` if this unit does not accept metric prefixes.
    pub fn with_prefix(&self, prefix: MetricPrefix) -> QuantityResult<Units> {
        self.derive(prefix.name(), prefix.symbol(), prefix.multiplier())
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::PreciseDecimal;

    fn meters() -> Units {
        Units::new("meters", "meter", "m", Dimensions::LENGTH, 1).metric_base()
    }

    fn celsius() -> Units {
        let offset = PreciseDecimal::from_i64(27315).scale_by_power_of_ten(-2).unwrap();
        Units::new("degrees Celsius", "degree Celsius", "°C", Dimensions::TEMPERATURE, 1)
            .with_offset(offset)
    }

    #[test]
    fn test_metric_derivation() {
        let km = meters().derive("kilo", "k", 1000).unwrap();
        assert_eq!(km.name(), "kilometers");
        assert_eq!(km.singular(), "kilometer");
        assert_eq!(km.abbreviation(), "km");
        assert_eq!(km.to_base(&Number::from(5)), Number::from(5000));
        assert!(!km.is_metric_base());
        assert_eq!(km.dimensions(), Dimensions::LENGTH);
    }

    #[test]
    fn test_derive_requires_metric_base() {
        let minutes = Units::new("minutes", "minute", "min", Dimensions::TIME, 60);
        let err = minutes.derive("kilo", "k", 1000).unwrap_err();
        assert!(matches!(err, QuantityError::NotMetricBase { .. }));

        let km = meters().with_prefix(MetricPrefix::Kilo).unwrap();
        assert!(km.with_prefix(MetricPrefix::Kilo).is_err());
    }

    #[test]
    fn test_affine_offset() {
        let c = celsius();
        assert!(c.is_affine());
        assert_eq!(c.to_base(&Number::from(0)), Number::from(273.15));
        assert_eq!(c.from_base(&Number::from(273.15)), Number::from(0));
        assert_eq!(c.to_base(&Number::from(100)), Number::from(373.15));
    }

    #[test]
    fn test_affine_order_matters() {
        // 2 units per kelvin with a 10 K offset: 5 -> 5*2 + 10, not (5+10)*2
        let odd = Units::new("odd", "odd", "o", Dimensions::TEMPERATURE, 2).with_offset(10);
        assert_eq!(odd.to_base(&Number::from(5)), Number::from(20));
        assert_eq!(odd.from_base(&Number::from(20)), Number::from(5));
    }

    #[test]
    fn test_delta_ignores_offset() {
        let c = celsius();
        assert_eq!(c.to_base_delta(&Number::from(10)), Number::from(10));
        assert_eq!(c.from_base_delta(&Number::from(10)), Number::from(10));
    }

    #[test]
    fn test_milli_derivation_is_exact() {
        let mm = meters().with_prefix(MetricPrefix::Milli).unwrap();
        assert_eq!(mm.abbreviation(), "mm");
        assert_eq!(mm.to_base(&Number::from(1500)), Number::from(1.5));
        assert_eq!(mm.from_base(&Number::from(1)), Number::from(1000));
    }

    #[test]
    fn test_matches() {
        let c = celsius().with_alt_abbreviation("C");
        assert!(c.matches("°C"));
        assert!(c.matches("C"));
        assert!(c.matches("degree Celsius"));
        assert!(!c.matches("K"));
    }

    #[test]
    fn test_si_unit() {
        let u = Units::si(Dimensions::VELOCITY);
        assert_eq!(u.abbreviation(), "m·s^-1");
        assert_eq!(u.conv_to_mks(), &Number::ONE);
        assert_eq!(Units::si(Dimensions::DIMENSIONLESS).abbreviation(), "");
    }
}
