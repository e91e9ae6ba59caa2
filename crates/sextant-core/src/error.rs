//! Error types for the Sextant data model.
//!
//! Lookup and shape failures abort an analysis run. Degenerate numeric
//! situations are not errors at this level; they surface as `NaN` values.

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or projecting the data model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A requested instrument is not present in the panel.
    #[error("Instrument not found: {id}")]
    InstrumentNotFound {
        /// The missing identifier.
        id: String,
    },

    /// Two collections that must line up have different lengths.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being compared.
        context: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A series violates its ordering invariant.
    #[error("Invalid series: {reason}")]
    InvalidSeries {
        /// Description of the violation.
        reason: String,
    },

    /// The same (date, instrument) pair appeared twice in the input table.
    #[error("Duplicate observation for {id} on {date}")]
    DuplicateObservation {
        /// Instrument identifier.
        id: String,
        /// Observation date.
        date: NaiveDate,
    },

    /// Invalid portfolio definition.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },
}

impl CoreError {
    /// Creates an instrument-not-found error.
    #[must_use]
    pub fn not_found(id: impl ToString) -> Self {
        Self::InstrumentNotFound { id: id.to_string() }
    }

    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }

    /// Creates an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }
}
