// ============================================================================
// Quantity Errors
// Dimensional and domain errors raised by units and quantities
// ============================================================================

use crate::dimension::Dimensions;
use crate::numeric::NumericError;
use std::fmt;

/// Errors that can occur in unit and quantity operations.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityError {
    /// Operands of an operation that requires equal dimensions differ
    DimensionMismatch {
        operation: &'static str,
        left: Dimensions,
        right: Dimensions,
    },

    /// A unit does not measure the expected quantity kind
    IncompatibleUnits { unit: String, expected: Dimensions },

    /// Metric prefixes only apply to metric base units
    NotMetricBase { unit: String },

    /// No unit is known under this name or abbreviation
    UnknownUnit(String),

    /// Relative uncertainty must be finite and non-negative
    InvalidUncertainty(f64),

    /// Some exponent is not divisible by the requested root
    NonIntegralRoot { dimensions: Dimensions, root: i32 },

    /// An absolute temperature below 0 K
    BelowAbsoluteZero { kelvin: f64 },

    /// Physically meaningless combination of temperatures
    InvalidTemperatureOperation { operation: &'static str },

    /// Underlying numeric construction error
    Numeric(NumericError),
}

impl QuantityError {
    pub(crate) fn mismatch(operation: &'static str, left: Dimensions, right: Dimensions) -> Self {
        tracing::debug!(operation, %left, %right, "rejected dimension mismatch");
        QuantityError::DimensionMismatch {
            operation,
            left,
            right,
        }
    }
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityError::DimensionMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "dimension mismatch: cannot {} [{}] and [{}]",
                operation, left, right
            ),
            QuantityError::IncompatibleUnits { unit, expected } => {
                write!(f, "incompatible units: {} does not measure [{}]", unit, expected)
            },
            QuantityError::NotMetricBase { unit } => {
                write!(f, "{} is not a metric base unit and cannot take a prefix", unit)
            },
            QuantityError::UnknownUnit(name) => write!(f, "unknown unit: {:?}", name),
            QuantityError::InvalidUncertainty(u) => write!(
                f,
                "invalid uncertainty: {} is not a finite non-negative fraction",
                u
            ),
            QuantityError::NonIntegralRoot { dimensions, root } => write!(
                f,
                "cannot take root {} of [{}]: exponents are not divisible",
                root, dimensions
            ),
            QuantityError::BelowAbsoluteZero { kelvin } => {
                write!(f, "temperature below absolute zero: {} K", kelvin)
            },
            QuantityError::InvalidTemperatureOperation { operation } => {
                write!(f, "invalid temperature operation: {}", operation)
            },
            QuantityError::Numeric(e) => write!(f, "numeric error: {}", e),
        }
    }
}

impl std::error::Error for QuantityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantityError::Numeric(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NumericError> for QuantityError {
    fn from(e: NumericError) -> Self {
        QuantityError::Numeric(e)
    }
}

/// Result type for quantity operations
pub type QuantityResult<T> = Result<T, QuantityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display() {
        let err = QuantityError::mismatch("add", Dimensions::LENGTH, Dimensions::MASS);
        assert_eq!(err.to_string(), "dimension mismatch: cannot add [m] and [kg]");
    }

    #[test]
    fn test_from_numeric_error() {
        let err: QuantityError = NumericError::InvalidFormat.into();
        assert_eq!(err, QuantityError::Numeric(NumericError::InvalidFormat));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_temperature_errors() {
        let err = QuantityError::BelowAbsoluteZero { kelvin: -1.0 };
        assert!(err.to_string().contains("-1 K"));
    }
}
