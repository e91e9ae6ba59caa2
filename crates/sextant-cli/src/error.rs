//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date '{value}' on line {line}. Use YYYY-MM-DD or YYYYMMDD.")]
    InvalidDate {
        /// The unparseable text.
        value: String,
        /// 1-based line number in the input file.
        line: u64,
    },

    /// A required column is absent from the input header.
    #[error("Column '{column}' not found in {} (available: {available})", path.display())]
    MissingColumn {
        /// Requested column name.
        column: String,
        /// Input file.
        path: PathBuf,
        /// Comma-separated header names.
        available: String,
    },

    /// The input file holds no data rows.
    #[error("No return observations in {}", .0.display())]
    EmptyInput(PathBuf),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] sextant_config::ConfigError),

    /// Analysis error.
    #[error("Analysis error: {0}")]
    Analytics(#[from] sextant_analytics::AnalyticsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
