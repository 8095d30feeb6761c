// ============================================================================
// Standard Units
// Process-wide immutable unit constants
// ============================================================================

use super::Units;
use crate::dimension::Dimensions;
use crate::numeric::{Number, PreciseDecimal};
use std::sync::{Arc, LazyLock};

/// `numerator / denominator` at full decimal precision
fn ratio(numerator: i64, denominator: i64) -> Number {
    Number::Decimal(PreciseDecimal::from_i64(numerator)) / Number::from(denominator)
}

macro_rules! standard_unit {
    ($(#[$meta:meta])* $ident:ident => $build:expr) => {
        $(#[$meta])*
        pub static $ident: LazyLock<Arc<Units>> = LazyLock::new(|| Arc::new($build));
    };
}

// ============================================================================
// Base Units
// ============================================================================

standard_unit!(METERS => Units::new("meters", "meter", "m", Dimensions::LENGTH, 1).metric_base());
standard_unit!(
    /// Grams are the prefix base for mass, so that `kg` derives as kilo-grams.
    GRAMS => Units::new("grams", "gram", "g", Dimensions::MASS, Number::exact(1, -3)).metric_base()
);
standard_unit!(KILOGRAMS => Units::new("kilograms", "kilogram", "kg", Dimensions::MASS, 1));
standard_unit!(SECONDS => Units::new("seconds", "second", "s", Dimensions::TIME, 1).metric_base());
standard_unit!(AMPERES => Units::new("amperes", "ampere", "A", Dimensions::CURRENT, 1).metric_base());
standard_unit!(KELVIN => Units::new("kelvin", "kelvin", "K", Dimensions::TEMPERATURE, 1).metric_base());
standard_unit!(MOLES => Units::new("moles", "mole", "mol", Dimensions::AMOUNT, 1).metric_base());
standard_unit!(
    CANDELAS => Units::new("candelas", "candela", "cd", Dimensions::LUMINOUS_INTENSITY, 1).metric_base()
);
standard_unit!(RADIANS => Units::new("radians", "radian", "rad", Dimensions::ANGLE, 1).metric_base());
standard_unit!(
    STERADIANS => Units::new("steradians", "steradian", "sr", Dimensions::SOLID_ANGLE, 1).metric_base()
);
standard_unit!(UNITLESS => Units::new("", "", "", Dimensions::DIMENSIONLESS, 1));

// ============================================================================
// Derived SI Units
// ============================================================================

standard_unit!(NEWTONS => Units::new("newtons", "newton", "N", Dimensions::FORCE, 1).metric_base());
standard_unit!(JOULES => Units::new("joules", "joule", "J", Dimensions::ENERGY, 1).metric_base());
standard_unit!(WATTS => Units::new("watts", "watt", "W", Dimensions::POWER, 1).metric_base());
standard_unit!(PASCALS => Units::new("pascals", "pascal", "Pa", Dimensions::PRESSURE, 1).metric_base());
standard_unit!(HERTZ => Units::new("hertz", "hertz", "Hz", Dimensions::FREQUENCY, 1).metric_base());
standard_unit!(COULOMBS => Units::new("coulombs", "coulomb", "C", Dimensions::CHARGE, 1).metric_base());
standard_unit!(VOLTS => Units::new("volts", "volt", "V", Dimensions::VOLTAGE, 1).metric_base());

// ============================================================================
// Non-Metric Units
// ============================================================================

standard_unit!(MINUTES => Units::new("minutes", "minute", "min", Dimensions::TIME, 60));
standard_unit!(HOURS => Units::new("hours", "hour", "h", Dimensions::TIME, 3600).with_alt_abbreviation("hr"));
standard_unit!(FEET => Units::new("feet", "foot", "ft", Dimensions::LENGTH, Number::exact(3048, -4)));
standard_unit!(
    NAUTICAL_MILES => Units::new("nautical miles", "nautical mile", "NM", Dimensions::LENGTH, 1852)
        .with_alt_abbreviation("nmi")
);
standard_unit!(
    DEGREES => Units::new(
        "degrees",
        "degree",
        "deg",
        Dimensions::ANGLE,
        std::f64::consts::PI / 180.0
    )
    .with_alt_abbreviation("°")
);

// ============================================================================
// Temperature Scales
// ============================================================================

standard_unit!(
    CELSIUS => Units::new(
        "degrees Celsius",
        "degree Celsius",
        "°C",
        Dimensions::TEMPERATURE,
        1
    )
    .with_offset(Number::exact(27315, -2))
);
standard_unit!(
    /// `K = (°F + 459.67) × 5/9`, expressed as scale 5/9 and offset 459.67 × 5/9.
    FAHRENHEIT => Units::new(
        "degrees Fahrenheit",
        "degree Fahrenheit",
        "°F",
        Dimensions::TEMPERATURE,
        ratio(5, 9)
    )
    .with_offset(ratio(45967, 180))
);

/// Every standard unit, in registration order.
pub fn all() -> Vec<Arc<Units>> {
    [
        &METERS,
        &GRAMS,
        &KILOGRAMS,
        &SECONDS,
        &AMPERES,
        &KELVIN,
        &MOLES,
        &CANDELAS,
        &RADIANS,
        &STERADIANS,
        &NEWTONS,
        &JOULES,
        &WATTS,
        &PASCALS,
        &HERTZ,
        &COULOMBS,
        &VOLTS,
        &MINUTES,
        &HOURS,
        &FEET,
        &NAUTICAL_MILES,
        &DEGREES,
        &CELSIUS,
        &FAHRENHEIT,
        &UNITLESS,
    ]
    .into_iter()
    .map(|unit| Arc::clone(&**unit))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_units_are_unscaled() {
        assert_eq!(METERS.to_base(&Number::from(3)), Number::from(3));
        assert_eq!(KILOGRAMS.conv_to_mks(), &Number::ONE);
        assert!(METERS.is_metric_base());
        assert!(!MINUTES.is_metric_base());
    }

    #[test]
    fn test_kilograms_from_grams() {
        let kg = GRAMS.with_prefix(super::super::MetricPrefix::Kilo).unwrap();
        assert_eq!(kg.conv_to_mks(), KILOGRAMS.conv_to_mks());
        assert_eq!(kg.abbreviation(), "kg");
    }

    #[test]
    fn test_time_units() {
        assert_eq!(HOURS.to_base(&Number::from(2)), Number::from(7200));
        assert_eq!(MINUTES.from_base(&Number::from(90)), Number::from(1.5));
    }

    #[test]
    fn test_celsius() {
        assert_eq!(CELSIUS.to_base(&Number::from(0)), Number::from(273.15));
        assert_eq!(CELSIUS.from_base(&Number::from(273.15)), Number::from(0));
    }

    #[test]
    fn test_fahrenheit() {
        let boiling = FAHRENHEIT.to_base(&Number::from(212));
        assert!(boiling.approx_eq(&Number::from(373.15), 1e-15));
        let freezing = FAHRENHEIT.from_base(&Number::from(273.15));
        assert!(freezing.approx_eq(&Number::from(32), 1e-15));
        assert!(FAHRENHEIT.to_base(&Number::from(-459.67)).to_f64().abs() < 1e-40);
    }

    #[test]
    fn test_feet_are_exact() {
        assert_eq!(FEET.to_base(&Number::from(10000)), Number::from(3048));
    }

    #[test]
    fn test_all_have_consistent_names() {
        let units = all();
        assert_eq!(units.len(), 25);
        assert!(units.iter().all(|u| u.matches(u.abbreviation())));
    }
}
