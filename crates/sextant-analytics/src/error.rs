//! Error types for portfolio analytics.
//!
//! Lookup and shape failures abort an analysis run. Degenerate inputs and
//! short histories are normally carried as `NaN` values in the output; the
//! variants here exist for the operations that cannot produce any value.

use sextant_core::CoreError;
use sextant_math::MathError;
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur during analytics operations.
#[derive(Error, Debug, Clone)]
pub enum AnalyticsError {
    /// Data model error (missing instrument, shape mismatch).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Numerical error.
    #[error(transparent)]
    Math(#[from] MathError),

    /// The input makes the requested quantity undefined.
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// Why the input is degenerate.
        reason: String,
    },

    /// Not enough observations to compute the requested quantity.
    #[error("Insufficient data for {operation}: need at least {required}, got {actual}")]
    InsufficientData {
        /// The operation that needed more data.
        operation: String,
        /// Minimum required observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// Invalid metric settings.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// A probability distribution could not be constructed.
    #[error("Distribution error: {reason}")]
    Distribution {
        /// Description of the failure.
        reason: String,
    },
}

impl AnalyticsError {
    /// Create a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(operation: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            operation: operation.into(),
            required,
            actual,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a distribution error.
    #[must_use]
    pub fn distribution(reason: impl ToString) -> Self {
        Self::Distribution {
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors that abort an analysis run: a missing
    /// instrument or mismatched weights.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::InstrumentNotFound { .. } | CoreError::ShapeMismatch { .. })
        )
    }
}
