// ============================================================================
// Metric Prefixes
// SI decimal prefixes from quecto (10^-30) to quetta (10^30)
// ============================================================================

use crate::numeric::Number;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SI decimal prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetricPrefix {
    Quecto,
    Ronto,
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
    Ronna,
    Quetta,
}

impl MetricPrefix {
    pub const ALL: [MetricPrefix; 24] = [
        MetricPrefix::Quecto,
        MetricPrefix::Ronto,
        MetricPrefix::Yocto,
        MetricPrefix::Zepto,
        MetricPrefix::Atto,
        MetricPrefix::Femto,
        MetricPrefix::Pico,
        MetricPrefix::Nano,
        MetricPrefix::Micro,
        MetricPrefix::Milli,
        MetricPrefix::Centi,
        MetricPrefix::Deci,
        MetricPrefix::Deca,
        MetricPrefix::Hecto,
        MetricPrefix::Kilo,
        MetricPrefix::Mega,
        MetricPrefix::Giga,
        MetricPrefix::Tera,
        MetricPrefix::Peta,
        MetricPrefix::Exa,
        MetricPrefix::Zetta,
        MetricPrefix::Yotta,
        MetricPrefix::Ronna,
        MetricPrefix::Quetta,
    ];

    /// Power of ten this prefix scales by
    pub fn exponent(self) -> i64 {
        use MetricPrefix::*;
        match self {
            Quecto => -30,
            Ronto => -27,
            Yocto => -24,
            Zepto => -21,
            Atto => -18,
            Femto => -15,
            Pico => -12,
            Nano => -9,
            Micro => -6,
            Milli => -3,
            Centi => -2,
            Deci => -1,
            Deca => 1,
            Hecto => 2,
            Kilo => 3,
            Mega => 6,
            Giga => 9,
            Tera => 12,
            Peta => 15,
            Exa => 18,
            Zetta => 21,
            Yotta => 24,
            Ronna => 27,
            Quetta => 30,
        }
    }

    pub fn name(self) -> &'static str {
        use MetricPrefix::*;
        match self {
            Quecto => "quecto",
            Ronto => "ronto",
            Yocto => "yocto",
            Zepto => "zepto",
            Atto => "atto",
            Femto => "femto",
            Pico => "pico",
            Nano => "nano",
            Micro => "micro",
            Milli => "milli",
            Centi => "centi",
            Deci => "deci",
            Deca => "deca",
            Hecto => "hecto",
            Kilo => "kilo",
            Mega => "mega",
            Giga => "giga",
            Tera => "tera",
            Peta => "peta",
            Exa => "exa",
            Zetta => "zetta",
            Yotta => "yotta",
            Ronna => "ronna",
            Quetta => "quetta",
        }
    }

    pub fn symbol(self) -> &'static str {
        use MetricPrefix::*;
        match self {
            Quecto => "q",
            Ronto => "r",
            Yocto => "y",
            Zepto => "z",
            Atto => "a",
            Femto => "f",
            Pico => "p",
            Nano => "n",
            Micro => "µ",
            Milli => "m",
            Centi => "c",
            Deci => "d",
            Deca => "da",
            Hecto => "h",
            Kilo => "k",
            Mega => "M",
            Giga => "G",
            Tera => "T",
            Peta => "P",
            Exa => "E",
            Zetta => "Z",
            Yotta => "Y",
            Ronna => "R",
            Quetta => "Q",
        }
    }

    /// Exact scale factor, `Integer` where it fits and `Decimal` otherwise.
    pub fn multiplier(self) -> Number {
        Number::exact(1, self.exponent())
    }

    pub fn from_name(name: &str) -> Option<MetricPrefix> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Look up by symbol. `u` is accepted for micro.
    pub fn from_symbol(symbol: &str) -> Option<MetricPrefix> {
        if symbol == "u" {
            return Some(MetricPrefix::Micro);
        }
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }
}

impl fmt::Display for MetricPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_is_exact() {
        assert_eq!(MetricPrefix::Kilo.multiplier(), Number::from(1000));
        assert!(matches!(MetricPrefix::Kilo.multiplier(), Number::Integer(1000)));
        assert!(matches!(MetricPrefix::Milli.multiplier(), Number::Decimal(_)));
        assert_eq!(MetricPrefix::Milli.multiplier(), Number::from(0.001));
        assert!(matches!(MetricPrefix::Quetta.multiplier(), Number::Decimal(_)));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(MetricPrefix::from_name("mega"), Some(MetricPrefix::Mega));
        assert_eq!(MetricPrefix::from_symbol("da"), Some(MetricPrefix::Deca));
        assert_eq!(MetricPrefix::from_symbol("u"), Some(MetricPrefix::Micro));
        assert_eq!(MetricPrefix::from_symbol("x"), None);
    }

    #[test]
    fn test_exponents_are_ordered() {
        let exps: Vec<i64> = MetricPrefix::ALL.iter().map(|p| p.exponent()).collect();
        assert!(exps.windows(2).all(|w| w[0] < w[1]));
    }
}
