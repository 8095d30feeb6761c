// ============================================================================
// Numeric Configuration
// Precision and tolerance settings shared by the tower and quantity layers
// ============================================================================

use crate::numeric::{DEFAULT_PRECISION, MAX_PRECISION};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default relative tolerance for approximate comparisons
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Settings for parsing decimals and comparing inexact results
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericConfig {
    /// Maximum significant digits kept by decimals parsed under this config
    pub decimal_precision: usize,

    /// Relative tolerance used by approximate equality
    pub relative_tolerance: f64,
}

impl NumericConfig {
    /// Create a new configuration with explicit parameters
    pub fn new(decimal_precision: usize, relative_tolerance: f64) -> Self {
        Self {
            decimal_precision,
            relative_tolerance,
        }
    }

    /// Builder method: Set decimal precision
    pub fn with_decimal_precision(mut self, precision: usize) -> Self {
        self.decimal_precision = precision;
        self
    }

    /// Builder method: Set relative tolerance
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.decimal_precision == 0 {
            return Err("Decimal precision must be at least one digit".to_string());
        }
        if self.decimal_precision > MAX_PRECISION {
            return Err(format!(
                "Decimal precision cannot exceed {} digits",
                MAX_PRECISION
            ));
        }
        if !self.relative_tolerance.is_finite() || self.relative_tolerance < 0.0 {
            return Err("Relative tolerance must be finite and non-negative".to_string());
        }
        Ok(())
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl NumericConfig {
    /// Standard configuration
    /// - 50 significant decimal digits
    /// - 1e-12 relative tolerance
    pub fn standard() -> Self {
        Self::new(DEFAULT_PRECISION, DEFAULT_RELATIVE_TOLERANCE)
    }

    /// High-precision configuration
    /// - 200 significant decimal digits
    /// - 1e-40 relative tolerance
    pub fn high_precision() -> Self {
        Self::new(200, 1e-40)
    }

    /// Compact configuration, about what a binary double carries
    /// - 16 significant decimal digits
    /// - 1e-9 relative tolerance
    pub fn compact() -> Self {
        Self::new(16, 1e-9)
    }
}
