//! # Sextant Core
//!
//! Core types for the Sextant portfolio analytics library.
//!
//! This crate provides the data model shared by every other Sextant crate:
//!
//! - **Identifiers**: [`InstrumentId`], an opaque security identifier
//! - **Series**: [`ReturnSeries`], a date-ordered sequence of fractional returns
//! - **Panels**: [`ReturnPanel`], several series aligned on one date axis
//! - **Portfolios**: [`PortfolioDefinition`], weighted constituents plus a benchmark
//!
//! ## Design Philosophy
//!
//! - **Immutable values**: everything is built once and never mutated in place
//! - **Missing is not zero**: unobserved periods are stored as `NaN`
//! - **Explicit over implicit**: configuration is passed in, never read from globals
//!
//! ## Example
//!
//! ```rust
//! use sextant_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let dates = vec![
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
//! ];
//! let series = ReturnSeries::new(dates, vec![0.01, f64::NAN]).unwrap();
//! assert_eq!(series.observed_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Constituent, InstrumentId, MetricsConfig, PortfolioDefinition, ReturnObservation,
        ReturnPanel, ReturnSeries,
    };
}

pub use error::{CoreError, CoreResult};
pub use types::{
    Constituent, InstrumentId, MetricsConfig, PortfolioDefinition, ReturnObservation,
    ReturnPanel, ReturnSeries,
};
