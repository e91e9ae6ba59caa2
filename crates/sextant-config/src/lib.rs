//! Sextant Configuration Layer
//!
//! This crate provides configuration for the Sextant portfolio analytics
//! library: which instruments make up the portfolio, their weights, the
//! benchmark, and the settings for rolling and annualized metrics.
//!
//! # Features
//!
//! - **File Formats**: TOML and JSON, chosen by file extension
//! - **Validation**: Field-level errors collected through the [`Validate`] trait
//! - **Defaults**: A six-fund sector ETF portfolio against the S&P 500 ETF
//! - **Conversion**: Into the core `PortfolioDefinition` and `MetricsConfig`
//!
//! # Example
//!
//! ```rust
//! use sextant_config::{AnalysisConfig, Validate};
//!
//! let config = AnalysisConfig::from_toml_str(r#"
//!     name = "Balanced"
//!
//!     [[constituents]]
//!     id = "VTI"
//!     weight = 0.6
//!
//!     [[constituents]]
//!     id = "BND"
//!     weight = 0.4
//!
//!     [benchmark]
//!     id = "VOO"
//!     label = "S&P 500 ETF"
//!
//!     [metrics]
//!     rolling_window = 12
//! "#).unwrap();
//!
//! assert!(config.is_valid());
//! let definition = config.to_definition().unwrap();
//! assert_eq!(definition.weights(), vec![0.6, 0.4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod analysis;
mod error;

pub use analysis::{AnalysisConfig, BenchmarkConfig, ConstituentConfig, MetricsSettings};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{AnalysisConfig, BenchmarkConfig, ConstituentConfig, MetricsSettings};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
