//! Time series error types
//!
//! Defines the standardized error type for all algorithm operations.

use thiserror::Error;

/// Result type alias for algorithm operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors that can occur during time series operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TsError::InsufficientData {
            required: 10,
            actual: 5,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 10 points, got 5"
        );

        assert_eq!(
            TsError::NotFitted.to_string(),
            "Model must be fitted before prediction"
        );

        let error = TsError::InvalidParameter {
            name: "alpha".to_string(),
            reason: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'alpha': must be between 0 and 1"
        );
    }

    #[test]
    fn test_error_equality() {
        let a = TsError::InsufficientData {
            required: 4,
            actual: 2,
        };
        let b = TsError::InsufficientData {
            required: 4,
            actual: 2,
        };
        assert_eq!(a, b);
        assert_ne!(a, TsError::NotFitted);
    }
}
