// ============================================================================
// Dimensions Module
// Exponent vectors over the base dimensions and their algebra
// ============================================================================
//
// A quantity kind is identified by how many times each base dimension
// appears in it: velocity is length¹·time⁻¹, force is mass¹·length¹·time⁻².
// Dimensions only carry exponents. Multiplying two quantities adds their
// exponents, dividing subtracts them and raising to a power scales them.

mod base;

pub use base::BaseDimension;

use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Div, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exponent vector over [`BaseDimension`].
///
/// Equality is structural: two values built independently with the same
/// exponents are interchangeable.
/// Exponent arithmetic saturates at the `i32` bounds.
///
/// # Example
/// ```
/// use physical_quantity::dimension::{BaseDimension, Dimensions};
///
/// let velocity = Dimensions::LENGTH / Dimensions::TIME;
/// assert_eq!(velocity, Dimensions::VELOCITY);
/// assert_eq!(velocity.exponent(BaseDimension::Time), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    exponents: [i32; BaseDimension::COUNT],
}

impl Dimensions {
    /// Build from a full exponent vector in [`BaseDimension::ALL`] order.
    pub const fn from_exponents(exponents: [i32; BaseDimension::COUNT]) -> Self {
        Self { exponents }
    }

    /// Return a copy with one exponent replaced.
    pub const fn with(self, base: BaseDimension, exponent: i32) -> Self {
        let mut exponents = self.exponents;
        exponents[base.index()] = exponent;
        Self { exponents }
    }

    /// Single base dimension to the first power.
    pub const fn base(base: BaseDimension) -> Self {
        Self::DIMENSIONLESS.with(base, 1)
    }

    /// Exponent sum, usable in constant definitions.
    pub const fn product(self, other: Self) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < BaseDimension::COUNT {
            exponents[i] = exponents[i].saturating_add(other.exponents[i]);
            i += 1;
        }
        Self { exponents }
    }

    /// Exponent difference, usable in constant definitions.
    pub const fn quotient(self, other: Self) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < BaseDimension::COUNT {
            exponents[i] = exponents[i].saturating_sub(other.exponents[i]);
            i += 1;
        }
        Self { exponents }
    }

    /// Scale every exponent by `n`.
    pub const fn powi(self, n: i32) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < BaseDimension::COUNT {
            exponents[i] = exponents[i].saturating_mul(n);
            i += 1;
        }
        Self { exponents }
    }

    pub const fn reciprocal(self) -> Self {
        self.powi(-1)
    }

    /// Divide every exponent by `n`, or `None` if any exponent is not a
    /// multiple of `n`.
    pub fn root(self, n: i32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            if e.wrapping_rem(n) != 0 {
                return None;
            }
            *e = e.saturating_div(n);
        }
        Some(Self { exponents })
    }

    pub const fn exponent(&self, base: BaseDimension) -> i32 {
        self.exponents[base.index()]
    }

    pub const fn exponents(&self) -> &[i32; BaseDimension::COUNT] {
        &self.exponents
    }

    /// Base dimensions with a non-zero exponent, in canonical order.
    pub fn components(&self) -> ArrayVec<(BaseDimension, i32), { BaseDimension::COUNT }> {
        BaseDimension::ALL
            .iter()
            .map(|&base| (base, self.exponent(base)))
            .filter(|&(_, e)| e != 0)
            .collect()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }
}

// ============================================================================
// Named Quantity Kinds
// ============================================================================

impl Dimensions {
    pub const DIMENSIONLESS: Dimensions = Dimensions::from_exponents([0; BaseDimension::COUNT]);

    pub const LENGTH: Dimensions = Dimensions::base(BaseDimension::Length);
    pub const MASS: Dimensions = Dimensions::base(BaseDimension::Mass);
    pub const TIME: Dimensions = Dimensions::base(BaseDimension::Time);
    pub const CURRENT: Dimensions = Dimensions::base(BaseDimension::Current);
    pub const TEMPERATURE: Dimensions = Dimensions::base(BaseDimension::Temperature);
    pub const AMOUNT: Dimensions = Dimensions::base(BaseDimension::Amount);
    pub const LUMINOUS_INTENSITY: Dimensions = Dimensions::base(BaseDimension::LuminousIntensity);
    pub const ANGLE: Dimensions = Dimensions::base(BaseDimension::Angle);
    pub const SOLID_ANGLE: Dimensions = Dimensions::base(BaseDimension::SolidAngle);

    pub const AREA: Dimensions = Self::LENGTH.powi(2);
    pub const VOLUME: Dimensions = Self::LENGTH.powi(3);
    pub const FREQUENCY: Dimensions = Self::TIME.reciprocal();
    pub const VELOCITY: Dimensions = Self::LENGTH.quotient(Self::TIME);
    pub const ACCELERATION: Dimensions = Self::VELOCITY.quotient(Self::TIME);
    pub const FORCE: Dimensions = Self::MASS.product(Self::ACCELERATION);
    pub const ENERGY: Dimensions = Self::FORCE.product(Self::LENGTH);
    pub const POWER: Dimensions = Self::ENERGY.quotient(Self::TIME);
    pub const PRESSURE: Dimensions = Self::FORCE.quotient(Self::AREA);
    pub const CHARGE: Dimensions = Self::CURRENT.product(Self::TIME);
    pub const VOLTAGE: Dimensions = Self::POWER.quotient(Self::CURRENT);
}

impl Mul for Dimensions {
    type Output = Dimensions;

    fn mul(self, rhs: Dimensions) -> Dimensions {
        self.product(rhs)
    }
}

impl Div for Dimensions {
    type Output = Dimensions;

    fn div(self, rhs: Dimensions) -> Dimensions {
        self.quotient(rhs)
    }
}

impl From<BaseDimension> for Dimensions {
    fn from(base: BaseDimension) -> Self {
        Dimensions::base(base)
    }
}

impl fmt::Display for Dimensions {
    /// Coherent SI symbols joined by `·`, e.g. `kg·m·s^-2`; `1` when
    /// dimensionless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Mass first so that force reads kg·m·s^-2.
        const ORDER: [BaseDimension; BaseDimension::COUNT] = [
            BaseDimension::Mass,
            BaseDimension::Length,
            BaseDimension::Time,
            BaseDimension::Current,
            BaseDimension::Temperature,
            BaseDimension::Amount,
            BaseDimension::LuminousIntensity,
            BaseDimension::Angle,
            BaseDimension::SolidAngle,
        ];

        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for base in ORDER {
            let e = self.exponent(base);
            if e == 0 {
                continue;
            }
            if !first {
                f.write_str("·")?;
            }
            first = false;
            f.write_str(base.si_symbol())?;
            if e != 1 {
                write!(f, "^{}", e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Dimensions::DIMENSIONLESS
            .with(BaseDimension::Length, 1)
            .with(BaseDimension::Time, -1);
        let b = Dimensions::from_exponents([1, 0, -1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(a, b);
        assert_eq!(a, Dimensions::VELOCITY);
        assert_ne!(Dimensions::LENGTH, Dimensions::MASS);
    }

    #[test]
    fn test_multiply_adds_exponents() {
        let d = Dimensions::LENGTH * Dimensions::MASS;
        assert_eq!(d.exponent(BaseDimension::Length), 1);
        assert_eq!(d.exponent(BaseDimension::Mass), 1);
        assert_eq!(d.components().len(), 2);
    }

    #[test]
    fn test_divide_subtracts_exponents() {
        assert_eq!(Dimensions::ENERGY / Dimensions::TIME, Dimensions::POWER);
        assert!((Dimensions::FORCE / Dimensions::FORCE).is_dimensionless());
    }

    #[test]
    fn test_power_scales_exponents() {
        assert_eq!(Dimensions::LENGTH.powi(3), Dimensions::VOLUME);
        assert_eq!(Dimensions::VELOCITY.powi(0), Dimensions::DIMENSIONLESS);
        assert_eq!(Dimensions::TIME.reciprocal(), Dimensions::FREQUENCY);
    }

    #[test]
    fn test_exponents_saturate() {
        let huge = Dimensions::LENGTH.powi(i32::MAX);
        assert_eq!((huge * Dimensions::LENGTH).exponent(BaseDimension::Length), i32::MAX);
        assert_eq!(
            (huge.reciprocal() / Dimensions::LENGTH).exponent(BaseDimension::Length),
            -i32::MAX - 1
        );
        assert_eq!(huge.reciprocal().reciprocal(), huge);

        let lowest = Dimensions::LENGTH.powi(i32::MIN);
        assert_eq!(lowest.exponent(BaseDimension::Length), i32::MIN);
        assert_eq!(lowest.root(-1).map(|d| d.exponent(BaseDimension::Length)), Some(i32::MAX));
    }

    #[test]
    fn test_root() {
        assert_eq!(Dimensions::AREA.root(2), Some(Dimensions::LENGTH));
        assert_eq!(Dimensions::VOLUME.root(2), None);
        assert_eq!(Dimensions::LENGTH.root(0), None);
        assert_eq!(Dimensions::AREA.root(-2), Some(Dimensions::LENGTH.reciprocal()));
    }

    #[test]
    fn test_derived_kinds() {
        assert_eq!(
            Dimensions::FORCE.components().as_slice(),
            &[
                (BaseDimension::Length, 1),
                (BaseDimension::Mass, 1),
                (BaseDimension::Time, -2)
            ]
        );
        assert_eq!(Dimensions::PRESSURE, Dimensions::ENERGY / Dimensions::VOLUME);
        assert_eq!(Dimensions::VOLTAGE * Dimensions::CHARGE, Dimensions::ENERGY);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimensions::FORCE.to_string(), "kg·m·s^-2");
        assert_eq!(Dimensions::DIMENSIONLESS.to_string(), "1");
        assert_eq!(Dimensions::AREA.to_string(), "m^2");
    }
}
