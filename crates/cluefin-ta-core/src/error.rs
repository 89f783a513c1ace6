//! Error types and handling for the TA engine
//!
//! This module defines the `TalibError` enum which represents every error a
//! public function can return. Errors are only produced by the validation
//! prelude that runs before any computation: kernels themselves never fail, and
//! data insufficiency is reported through NaN output rather than an error.

use thiserror::Error;

/// Error type for TA engine operations
///
/// All public operations that can fail return a `Result<T, TalibError>`.
/// Degenerate numerical cases (zero range, zero volume, constant windows) are
/// absorbed by each indicator's documented default and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TalibError {
    /// Invalid input data (e.g., companion arrays of different lengths)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input
        message: String,
    },

    /// Invalid period parameter (e.g., zero or below the indicator minimum)
    #[error("Invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value
        period: usize,
        /// Description of why it's invalid
        reason: String,
    },

    /// Insufficient data for a model fit
    ///
    /// Public indicator functions never return this; it is raised internally by
    /// model fitting and converted to NaN output by the caller.
    #[error("Insufficient data: required {required} data points, got {actual}")]
    InsufficientData {
        /// Required minimum data length
        required: usize,
        /// Actual data length provided
        actual: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': got '{value}', expected {expected}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Invalid value (as string for flexible representation)
        value: String,
        /// Expected value description
        expected: String,
    },

    /// Computation error (e.g., a model fit that diverged)
    #[error("Computation error: {message}")]
    ComputationError {
        /// Description of the computation failure
        message: String,
    },

    /// Capability compiled out of this build
    #[error("Feature not implemented: {feature}")]
    NotImplemented {
        /// Feature name or description
        feature: String,
    },
}

impl TalibError {
    /// Creates an InvalidInput error
    ///
    /// # Example
    ///
    /// ```rust
    /// use cluefin_ta_core::error::TalibError;
    ///
    /// let err = TalibError::invalid_input("high and low have different lengths");
    /// ```
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        TalibError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an InvalidPeriod error
    ///
    /// # Example
    ///
    /// ```rust
    /// use cluefin_ta_core::error::TalibError;
    ///
    /// let err = TalibError::invalid_period(0, "period must be greater than zero");
    /// ```
    pub fn invalid_period<S: Into<String>>(period: usize, reason: S) -> Self {
        TalibError::InvalidPeriod {
            period,
            reason: reason.into(),
        }
    }

    /// Creates an InsufficientData error
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        TalibError::InsufficientData { required, actual }
    }

    /// Creates an InvalidParameter error
    ///
    /// # Example
    ///
    /// ```rust
    /// use cluefin_ta_core::error::TalibError;
    ///
    /// let err =
    ///     TalibError::invalid_parameter("method", "weekly", "one of swing, ma_cross, hybrid");
    /// ```
    pub fn invalid_parameter<N, V, E>(name: N, value: V, expected: E) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        E: Into<String>,
    {
        TalibError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Creates a ComputationError
    pub fn computation_error<S: Into<String>>(message: S) -> Self {
        TalibError::ComputationError {
            message: message.into(),
        }
    }

    /// Creates a NotImplemented error
    pub fn not_implemented<S: Into<String>>(feature: S) -> Self {
        TalibError::NotImplemented {
            feature: feature.into(),
        }
    }
}

/// Result type alias for TA engine operations
///
/// # Example
///
/// ```rust
/// use cluefin_ta_core::error::{Result, TalibError};
///
/// fn calculate_something() -> Result<f64> {
///     Ok(42.0)
/// }
/// ```
pub type Result<T> = core::result::Result<T, TalibError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_creation() {
        let err = TalibError::invalid_input("Test message");
        assert_eq!(err.to_string(), "Invalid input: Test message");
    }

    #[test]
    fn test_invalid_period_creation() {
        let err = TalibError::invalid_period(0, "must be positive");
        assert_eq!(err.to_string(), "Invalid period 0: must be positive");
    }

    #[test]
    fn test_insufficient_data_creation() {
        let err = TalibError::insufficient_data(20, 10);
        assert_eq!(
            err.to_string(),
            "Insufficient data: required 20 data points, got 10"
        );
    }

    #[test]
    fn test_invalid_parameter_creation() {
        let err = TalibError::invalid_parameter("alpha", "1.5", "value in [0.0, 1.0]");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'alpha': got '1.5', expected value in [0.0, 1.0]"
        );
    }

    #[test]
    fn test_invalid_parameter_accepts_owned_values() {
        let value = format!("{}", 120.5);
        let err = TalibError::invalid_parameter("threshold_percentile", value, "value in [0, 100]");
        assert!(err.to_string().contains("120.5"));
    }

    #[test]
    fn test_computation_error_creation() {
        let err = TalibError::computation_error("log-likelihood diverged");
        assert_eq!(err.to_string(), "Computation error: log-likelihood diverged");
    }

    #[test]
    fn test_not_implemented_creation() {
        let err = TalibError::not_implemented("regime_hmm");
        assert_eq!(err.to_string(), "Feature not implemented: regime_hmm");
    }

    #[test]
    fn test_error_variants_are_equality_comparable() {
        let err1 = TalibError::invalid_input("Test");
        let err2 = TalibError::invalid_input("Test");
        let err3 = TalibError::invalid_input("Different");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_convenience_methods_create_correct_variants() {
        assert!(matches!(
            TalibError::invalid_input("x"),
            TalibError::InvalidInput { .. }
        ));
        assert!(matches!(
            TalibError::invalid_period(5, "too small"),
            TalibError::InvalidPeriod { .. }
        ));
        assert!(matches!(
            TalibError::insufficient_data(10, 5),
            TalibError::InsufficientData { .. }
        ));
        assert!(matches!(
            TalibError::invalid_parameter("x", "-1", "positive number"),
            TalibError::InvalidParameter { .. }
        ));
        assert!(matches!(
            TalibError::computation_error("overflow"),
            TalibError::ComputationError { .. }
        ));
        assert!(matches!(
            TalibError::not_implemented("hmm"),
            TalibError::NotImplemented { .. }
        ));
    }

    #[test]
    fn test_question_mark_operator() {
        fn validate(period: usize) -> Result<usize> {
            if period == 0 {
                return Err(TalibError::invalid_period(period, "must be >= 1"));
            }
            Ok(period)
        }

        fn process(periods: &[usize]) -> Result<Vec<usize>> {
            periods.iter().map(|&p| validate(p)).collect()
        }

        assert!(process(&[1, 2, 3]).is_ok());
        let result = process(&[1, 0, 3]);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid period 0: must be >= 1"
        );
    }
}
