//! # Sextant Analytics
//!
//! Portfolio performance, contribution and distribution analytics.
//!
//! This crate turns a [`ReturnPanel`](sextant_core::ReturnPanel) and a
//! fixed-weight [`PortfolioDefinition`](sextant_core::PortfolioDefinition)
//! into:
//!
//! - **Return series**: weighted portfolio returns and the benchmark column
//! - **Performance**: cumulative return, drawdown, rolling volatility and
//!   Sharpe-like ratio, calendar-year returns, summary statistics
//! - **Contribution**: return and risk shares by constituent, correlations
//! - **Diagnostics**: Student-t fit, QQ data, paired t and KS tests
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every input is explicit, nothing is cached or read
//!   from globals
//! - **Missing data stays missing**: gaps are `NaN`, never zero
//! - **Degenerate is data**: undefined quantities are reported as `NaN`
//!   rather than raised; only lookups and shape mismatches abort a run
//!
//! ## Example
//!
//! ```rust,ignore
//! use sextant_analytics::prelude::*;
//!
//! let report = analyze(&panel, &definition, &MetricsConfig::MONTHLY)?;
//! println!("Total return: {:.2}%", report.portfolio.summary.total_return * 100.0);
//! for entry in &report.risk_contribution.breakdown.entries {
//!     println!("{}: {:.1}% of risk", entry.label, entry.share * 100.0);
//! }
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
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod contribution;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod panel;
pub mod performance;
pub mod portfolio;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::contribution::{
        correlation_matrix, return_contribution, risk_contribution, ContributionBreakdown,
        ContributionEntry, ContributionKind, CorrelationMatrix, ReturnContribution,
        RiskContribution,
    };
    pub use crate::diagnostics::{
        distribution_diagnostics, fit_students_t, ks_two_sample_test, paired_t_test,
        qq_plot_data, DistributionDiagnostics, HypothesisTestResult, QqPlotData, QqReference,
        QuantilePair, StudentTFit, TestKind,
    };
    pub use crate::engine::{analyze, analyze_observations, AnalysisEngine, AnalysisReport};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::panel::{portfolio_view, select_instruments, PortfolioView};
    pub use crate::performance::{
        annual_returns, best_and_worst_years, cumulative_returns, drawdowns, equity_curve,
        max_drawdown, performance_metrics, rolling_sharpe, rolling_volatility,
        summary_statistics, AnnualReturn, PerformanceMetrics, SummaryStatistics, YearExtremes,
    };
    pub use crate::portfolio::{
        benchmark_returns, build_portfolio_series, portfolio_returns, PortfolioSeries,
    };
    pub use sextant_core::prelude::*;
}

pub use engine::{analyze, analyze_observations, AnalysisEngine, AnalysisReport};
pub use error::{AnalyticsError, AnalyticsResult};
