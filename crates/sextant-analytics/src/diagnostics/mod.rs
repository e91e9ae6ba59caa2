//! Distribution diagnostics for portfolio returns.
//!
//! Provides:
//! - Maximum-likelihood Student-t fit
//! - QQ plot data against normal and Student-t references
//! - Paired t-test and two-sample KS test against the benchmark

mod fit;
mod hypothesis;
mod qq;

pub use fit::*;
pub use hypothesis::*;
pub use qq::*;

use serde::Serialize;
use sextant_core::ReturnSeries;
use tracing::{debug, warn};

use crate::error::AnalyticsResult;

/// Distribution diagnostics of a portfolio against its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionDiagnostics {
    /// Student-t fit of the portfolio returns; `None` if the fit is impossible.
    pub student_t: Option<StudentTFit>,
    /// QQ datasets, normal first, then the t references when a fit exists.
    pub qq_plots: Vec<QqPlotData>,
    /// Paired t-test of portfolio against benchmark.
    pub paired_t: HypothesisTestResult,
    /// Two-sample KS test of portfolio against benchmark.
    pub kolmogorov_smirnov: HypothesisTestResult,
}

/// Runs every diagnostic on `portfolio`, testing against `benchmark`.
///
/// A failed Student-t fit (too few observations, zero dispersion) is logged
/// and reported as `None`; the remaining diagnostics still run.
pub fn distribution_diagnostics(
    portfolio: &ReturnSeries,
    benchmark: &ReturnSeries,
) -> AnalyticsResult<DistributionDiagnostics> {
    let student_t = match fit_students_t(portfolio.values()) {
        Ok(fit) => Some(fit),
        Err(e) => {
            warn!(error = %e, "Student-t fit unavailable");
            None
        }
    };

    let references = match &student_t {
        Some(fit) => qq_references(fit).to_vec(),
        None => vec![QqReference::StandardNormal],
    };
    let qq_plots = references
        .into_iter()
        .map(|reference| qq_plot_data(portfolio.values(), reference))
        .collect::<AnalyticsResult<Vec<_>>>()?;

    let paired_t = paired_t_test(portfolio, benchmark)?;
    let kolmogorov_smirnov = ks_two_sample_test(portfolio.values(), benchmark.values());

    debug!(
        paired_t = paired_t.statistic,
        paired_p = paired_t.p_value,
        ks = kolmogorov_smirnov.statistic,
        ks_p = kolmogorov_smirnov.p_value,
        "Computed distribution diagnostics"
    );

    Ok(DistributionDiagnostics {
        student_t,
        qq_plots,
        paired_t,
        kolmogorov_smirnov,
    })
}
