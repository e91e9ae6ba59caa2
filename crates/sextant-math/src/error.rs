//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Matrix or vector dimensions are incompatible.
    #[error("Incompatible dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in first operand.
        rows1: usize,
        /// Columns in first operand.
        cols1: usize,
        /// Rows in second operand.
        rows2: usize,
        /// Columns in second operand.
        cols2: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
