//! # Sextant Math
//!
//! Statistical and numerical utilities for the Sextant portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Means, sample variances, pairwise-complete covariance and correlation
//! - **Linear Algebra**: Covariance matrices and quadratic forms on `nalgebra` types
//! - **Optimization**: Derivative-free Nelder-Mead minimization
//! - **Kolmogorov**: Exact and asymptotic two-sample Kolmogorov-Smirnov distributions
//!
//! ## Design Philosophy
//!
//! - **Missing data is explicit**: `NaN` inputs are skipped or propagated, never zeroed
//! - **Numerical Stability**: Flat samples have exactly zero dispersion, probabilities kept in `[0, 1]`
//! - **Degenerate cases surface as `NaN`**: callers decide whether they are errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod kolmogorov;
pub mod linear_algebra;
pub mod optimization;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::kolmogorov::{kolmogorov_sf, ks_two_sample_pvalue, ks_two_sample_statistic};
    pub use crate::linear_algebra::{covariance_matrix, correlation_matrix, quadratic_form};
    pub use crate::optimization::{nelder_mead, OptimizationConfig, OptimizationResult};
    pub use crate::statistics::{
        excess_kurtosis, is_constant, mean, median, observed, pairwise_correlation,
        pairwise_covariance, sample_std, sample_variance, sorted_observed,
    };
}

pub use error::{MathError, MathResult};
