// ============================================================================
// Physical Constants
// CODATA values built through the raw SI constructor
// ============================================================================

use super::{si_units, Quantity};
use crate::dimension::Dimensions;
use crate::numeric::Number;
use std::sync::LazyLock;

macro_rules! constant {
    ($(#[$meta:meta])* $ident:ident = ($mantissa:expr, $power:expr), $dimensions:expr) => {
        constant!($(#[$meta])* $ident = ($mantissa, $power), $dimensions, 0.0);
    };
    ($(#[$meta:meta])* $ident:ident = ($mantissa:expr, $power:expr), $dimensions:expr, $uncertainty:expr) => {
        $(#[$meta])*
        pub static $ident: LazyLock<Quantity> = LazyLock::new(|| {
            let dimensions = $dimensions;
            Quantity::from_parts(
                Number::exact($mantissa, $power),
                dimensions,
                si_units(dimensions),
                $uncertainty,
            )
        });
    };
}

constant!(
    /// Speed of light in vacuum, m·s⁻¹ (exact)
    SPEED_OF_LIGHT = (299_792_458, 0),
    Dimensions::VELOCITY
);
constant!(
    /// Planck constant, J·s (exact)
    PLANCK = (662_607_015, -42),
    Dimensions::ENERGY.product(Dimensions::TIME)
);
constant!(
    /// Elementary charge, C (exact)
    ELEMENTARY_CHARGE = (1_602_176_634, -28),
    Dimensions::CHARGE
);
constant!(
    /// Boltzmann constant, J·K⁻¹ (exact)
    BOLTZMANN = (1_380_649, -29),
    Dimensions::ENERGY.quotient(Dimensions::TEMPERATURE)
);
constant!(
    /// Avogadro constant, mol⁻¹ (exact)
    AVOGADRO = (602_214_076, 15),
    Dimensions::AMOUNT.reciprocal()
);
constant!(
    /// Newtonian constant of gravitation, m³·kg⁻¹·s⁻²
    GRAVITATIONAL = (667_430, -16),
    Dimensions::VOLUME.quotient(Dimensions::MASS.product(Dimensions::TIME.powi(2))),
    2.2e-5
);
constant!(
    /// Standard acceleration of gravity, m·s⁻² (exact)
    STANDARD_GRAVITY = (980_665, -5),
    Dimensions::ACCELERATION
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::standard;

    #[test]
    fn test_constants_are_exact_decimals() {
        assert_eq!(SPEED_OF_LIGHT.value_si(), &Number::from(299_792_458));
        assert_eq!(STANDARD_GRAVITY.value_si(), &Number::from(9.80665));
        assert_eq!(AVOGADRO.value_si(), &Number::from(6.02214076e23));
        assert_eq!(ELEMENTARY_CHARGE.relative_uncertainty(), 0.0);
    }

    #[test]
    fn test_gravitational_uncertainty() {
        assert_eq!(GRAVITATIONAL.relative_uncertainty(), 2.2e-5);
        assert_eq!(GRAVITATIONAL.dimensions().to_string(), "kg^-1·m^3·s^-2");
    }

    #[test]
    fn test_constants_compose() {
        // E = m c²
        let mass = Quantity::new(1, &standard::KILOGRAMS);
        let energy = &mass * &SPEED_OF_LIGHT.powi(2);
        assert_eq!(energy.dimensions(), Dimensions::ENERGY);
        assert_eq!(energy.value_si(), &Number::from(89_875_517_873_681_764i64));

        // R = N_A k_B
        let gas = &*AVOGADRO * &*BOLTZMANN;
        let expected = Number::exact(831_446_261_815_324, -14);
        assert_eq!(gas.value_si(), &expected);
        assert_eq!(
            gas.dimensions(),
            Dimensions::ENERGY / Dimensions::TEMPERATURE / Dimensions::AMOUNT
        );
    }
}
