// ============================================================================
// Base Dimensions
// The fixed set of independent dimensions every quantity kind is built from
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An independent base dimension.
///
/// The seven SI base dimensions plus plane and solid angle, which are kept
/// separate so that torque and energy stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
    Angle,
    SolidAngle,
}

impl BaseDimension {
    /// Number of base dimensions
    pub const COUNT: usize = 9;

    /// All base dimensions in exponent-vector order
    pub const ALL: [BaseDimension; Self::COUNT] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Angle,
        BaseDimension::SolidAngle,
    ];

    /// Position of this dimension in an exponent vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol of the coherent SI unit for this dimension
    pub fn si_symbol(self) -> &'static str {
        use BaseDimension::*;
        match self {
            Length => "m",
            Mass => "kg",
            Time => "s",
            Current => "A",
            Temperature => "K",
            Amount => "mol",
            LuminousIntensity => "cd",
            Angle => "rad",
            SolidAngle => "sr",
        }
    }

    pub fn name(self) -> &'static str {
        use BaseDimension::*;
        match self {
            Length => "length",
            Mass => "mass",
            Time => "time",
            Current => "current",
            Temperature => "temperature",
            Amount => "amount",
            LuminousIntensity => "luminous intensity",
            Angle => "angle",
            SolidAngle => "solid angle",
        }
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, base) in BaseDimension::ALL.iter().enumerate() {
            assert_eq!(base.index(), i);
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(BaseDimension::Mass.si_symbol(), "kg");
        assert_eq!(BaseDimension::Amount.si_symbol(), "mol");
        assert_eq!(BaseDimension::LuminousIntensity.to_string(), "luminous intensity");
    }
}
