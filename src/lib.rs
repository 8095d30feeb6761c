// ============================================================================
// Physical Quantity Library
// Numeric tower, arbitrary-precision decimals and dimensioned quantities
// ============================================================================

//! # Physical Quantity
//!
//! A numeric foundation for physical computation.
//!
//! ## Features
//!
//! - **Numeric tower** with total arithmetic over integers, doubles,
//!   arbitrary-precision decimals, imaginary and complex values
//! - **Precise decimals** stored as digit sequences with a configurable
//!   significant-digit cap
//! - **Dimensional algebra** over the SI base dimensions plus angles
//! - **Affine units** with metric prefixes and a shared unit registry
//! - **Quantities** that reject dimension mismatches and propagate
//!   relative uncertainty
//!
//! ## Example
//!
//! ```rust
//! use physical_quantity::prelude::*;
//!
//! // Decimals keep exact digits
//! let a: Number = "1.013".parse().unwrap();
//! let b: Number = "1.2".parse().unwrap();
//! assert_eq!((&a * &b).to_string(), "1.2156");
//!
//! // Mixed-type arithmetic narrows back to the simplest exact form
//! assert_eq!(Number::complex(5, 0), Number::from(5));
//!
//! // Quantities check dimensions and carry uncertainty
//! let length = Quantity::new(3, &standard::METERS).with_uncertainty(0.1).unwrap();
//! let width = Quantity::new(4, &standard::METERS).with_uncertainty(0.05).unwrap();
//! let area = &length * &width;
//! assert_eq!(area.dimensions(), Dimensions::AREA);
//! assert!((area.relative_uncertainty() - 0.1118).abs() < 1e-4);
//!
//! let mass = Quantity::new(1, &standard::KILOGRAMS);
//! assert!((&length + &mass).is_err());
//! ```

pub mod config;
pub mod dimension;
#[cfg(feature = "logging")]
pub mod logging;
pub mod numeric;
pub mod quantity;
pub mod units;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::NumericConfig;
    pub use crate::dimension::{BaseDimension, Dimensions};
    pub use crate::numeric::{Digit, Number, NumericError, PreciseDecimal, Real};
    pub use crate::quantity::{
        constants, Quantity, QuantityError, QuantityResult, Temperature, TemperatureDifference,
    };
    pub use crate::units::{standard, MetricPrefix, UnitRegistry, Units};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_decimal_precision_example() {
        let a: PreciseDecimal = "1.013".parse().unwrap();
        let b: PreciseDecimal = "1.2".parse().unwrap();
        let c = &a * &b;
        assert_eq!(c.to_string(), "1.2156");
        assert_eq!(c.digit_count(), 5);
        assert_eq!(c.power(), -4);
    }

    #[test]
    fn test_cross_type_equality() {
        for n in [-1_000_000i64, -7, 0, 1, 42, 9_007_199_254_740_992] {
            let integer = Number::from(n);
            let decimal = Number::Decimal(n.to_string().parse().unwrap());
            let double = Number::from(n as f64);
            assert_eq!(integer, decimal);
            assert_eq!(decimal, double);
            assert_eq!(integer, double);
        }
    }

    #[test]
    fn test_simplification_minimality() {
        assert!(!matches!(Number::complex(3.5, 0).simplify(), Number::Complex(..)));
        assert!(matches!(Number::imaginary(0).simplify(), Number::Integer(0)));
        let once = Number::complex(2.0, 0.0).simplify();
        assert!(matches!(once.clone().simplify(), Number::Integer(2)));
        assert!(matches!(once, Number::Integer(2)));
    }

    #[test]
    fn test_dimension_mismatch_rejection() {
        let length = Quantity::from_si(2, Dimensions::LENGTH);
        let mass = Quantity::from_si(3, Dimensions::MASS);

        let err = (&length + &mass).unwrap_err();
        assert!(matches!(err, QuantityError::DimensionMismatch { .. }));

        let product = &length * &mass;
        assert_eq!(
            product.dimensions(),
            Dimensions::DIMENSIONLESS
                .with(BaseDimension::Length, 1)
                .with(BaseDimension::Mass, 1)
        );
    }

    #[test]
    fn test_uncertainty_propagation_example() {
        let a = Quantity::from_si(3, Dimensions::DIMENSIONLESS)
            .with_uncertainty(0.1)
            .unwrap();
        let b = Quantity::from_si(4, Dimensions::DIMENSIONLESS)
            .with_uncertainty(0.05)
            .unwrap();
        let product = &a * &b;
        assert_eq!(product.value_si(), &Number::from(12));
        assert!((product.relative_uncertainty() - 0.1118).abs() < 1e-4);
    }

    #[test]
    fn test_metric_derivation_scenario() {
        let meters = Units::new("meters", "meter", "m", Dimensions::LENGTH, 1.0).metric_base();
        let km = meters.derive("kilo", "k", 1000).unwrap();
        assert_eq!(km.name(), "kilometers");
        assert_eq!(km.to_base(&Number::from(5)), Number::from(5000));
    }

    #[test]
    fn test_affine_offset_scenario() {
        let celsius = Units::new("celsius", "celsius", "C", Dimensions::TEMPERATURE, 1.0)
            .with_offset(273.15);
        assert_eq!(celsius.to_base(&Number::from(0)), Number::from(273.15));
        assert_eq!(celsius.from_base(&Number::from(273.15)), Number::from(0));
    }

    #[test]
    fn test_registry_to_quantity() {
        let registry = UnitRegistry::standard();
        let km = registry.get("km").unwrap();
        let h = registry.get("h").unwrap();

        let distance = Quantity::new(36, &km);
        let time = Quantity::new(1, &h);
        let speed = &distance / &time;

        assert_eq!(speed.dimensions(), Dimensions::VELOCITY);
        assert_eq!(speed.value_si(), &Number::from(10));
        let mps = Arc::new(Units::si(Dimensions::VELOCITY));
        assert_eq!(speed.value_in_units(&mps).unwrap(), Number::from(10));
    }

    #[test]
    fn test_decimal_infects_tower() {
        let d: Number = "0.1".parse().unwrap();
        let sum = &d + &Number::from(0.2);
        assert!(matches!(sum, Number::Decimal(_)));
        assert_eq!(sum, "0.3".parse::<Number>().unwrap());
    }

    #[test]
    fn test_division_by_zero_sentinels() {
        let d: Number = "2.5".parse().unwrap();
        let inf = &d / &Number::ZERO;
        assert!(inf.is_infinite());
        assert!((&Number::ZERO / &Number::ZERO).is_nan());
        let q = &Quantity::from_si(1, Dimensions::LENGTH) / &Quantity::from_si(0, Dimensions::TIME);
        assert!(q.value_si().is_infinite());
    }

    #[test]
    fn test_config_drives_parsing() {
        let config = NumericConfig::compact();
        assert!(config.validate().is_ok());
        let pi = PreciseDecimal::parse_with("3.14159265358979323846", &config).unwrap();
        assert_eq!(pi.digit_count(), config.decimal_precision);
    }
}
