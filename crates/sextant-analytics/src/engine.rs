//! End-to-end analysis run.
//!
//! Assembles every analytic for one portfolio definition into a single
//! serializable report.

use chrono::NaiveDate;
use serde::Serialize;
use sextant_core::{
    Constituent, InstrumentId, MetricsConfig, PortfolioDefinition, ReturnObservation, ReturnPanel,
    ReturnSeries,
};
use tracing::{debug, info, info_span, warn};

use crate::contribution::{
    correlation_matrix, return_contribution, risk_contribution, CorrelationMatrix,
    ReturnContribution, RiskContribution,
};
use crate::diagnostics::{distribution_diagnostics, DistributionDiagnostics};
use crate::error::AnalyticsResult;
use crate::performance::{performance_metrics, AnnualReturn, PerformanceMetrics};
use crate::portfolio::build_portfolio_series;

/// Everything computed for one portfolio against its benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// First date on the panel axis.
    pub period_start: Option<NaiveDate>,
    /// Last date on the panel axis.
    pub period_end: Option<NaiveDate>,
    /// Portfolio constituents, in definition order.
    pub constituents: Vec<Constituent>,
    /// Benchmark identifier.
    pub benchmark_id: InstrumentId,
    /// Benchmark label.
    pub benchmark_label: String,
    /// Metric settings used for the run.
    pub metrics_config: MetricsConfig,
    /// Weighted portfolio returns.
    pub portfolio_returns: ReturnSeries,
    /// Benchmark returns.
    pub benchmark_returns: ReturnSeries,
    /// Portfolio performance metrics.
    pub portfolio: PerformanceMetrics,
    /// Benchmark performance metrics.
    pub benchmark: PerformanceMetrics,
    /// Return contribution by constituent.
    pub return_contribution: ReturnContribution,
    /// Risk contribution by constituent.
    pub risk_contribution: RiskContribution,
    /// Constituent correlation matrix.
    pub correlation: CorrelationMatrix,
    /// Distribution diagnostics of the portfolio.
    pub diagnostics: DistributionDiagnostics,
}

impl AnalysisReport {
    /// Best calendar year of the portfolio.
    #[must_use]
    pub fn best_year(&self) -> Option<AnnualReturn> {
        self.portfolio.year_extremes.map(|e| e.best)
    }

    /// Worst calendar year of the portfolio.
    #[must_use]
    pub fn worst_year(&self) -> Option<AnnualReturn> {
        self.portfolio.year_extremes.map(|e| e.worst)
    }
}

/// Runs analyses with a fixed metric configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    metrics: MetricsConfig,
}

impl AnalysisEngine {
    /// Create an engine with the default monthly settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metric configuration.
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    /// The metric configuration.
    pub fn metrics(&self) -> &MetricsConfig {
        &self.metrics
    }

    /// Analyze a portfolio against its benchmark.
    ///
    /// A missing instrument or mismatched weights abort the run. Degenerate
    /// results (zero volatility, short history, failed fit) are carried in
    /// the report as `NaN` values or `None`.
    pub fn analyze(
        &self,
        panel: &ReturnPanel,
        definition: &PortfolioDefinition,
    ) -> AnalyticsResult<AnalysisReport> {
        let span = info_span!(
            "analyze",
            constituents = definition.constituents().len(),
            benchmark = %definition.benchmark()
        );
        let _guard = span.enter();

        let series = build_portfolio_series(panel, definition)?;
        debug!(
            periods = series.portfolio.len(),
            observed = series.portfolio.observed_count(),
            "Built portfolio series"
        );

        let portfolio = performance_metrics(&series.portfolio, &self.metrics)?;
        let benchmark = performance_metrics(&series.benchmark, &self.metrics)?;

        let return_contribution = return_contribution(panel, definition)?;
        let risk_contribution = risk_contribution(panel, definition)?;
        if return_contribution.breakdown.is_degenerate() {
            warn!("Return contribution shares are undefined");
        }
        let correlation = correlation_matrix(panel, definition)?;

        let diagnostics = distribution_diagnostics(&series.portfolio, &series.benchmark)?;

        info!(
            total_return = portfolio.summary.total_return,
            benchmark_total_return = benchmark.summary.total_return,
            max_drawdown = portfolio.summary.max_drawdown,
            portfolio_volatility = risk_contribution.portfolio_volatility,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            period_start: series.portfolio.first_date(),
            period_end: series.portfolio.last_date(),
            constituents: definition.constituents().to_vec(),
            benchmark_id: definition.benchmark().clone(),
            benchmark_label: definition.benchmark_label().to_string(),
            metrics_config: self.metrics,
            portfolio_returns: series.portfolio,
            benchmark_returns: series.benchmark,
            portfolio,
            benchmark,
            return_contribution,
            risk_contribution,
            correlation,
            diagnostics,
        })
    }
}

/// Analyze a portfolio against its benchmark with the given settings.
pub fn analyze(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
    config: &MetricsConfig,
) -> AnalyticsResult<AnalysisReport> {
    AnalysisEngine::new().with_metrics(*config).analyze(panel, definition)
}

/// Builds the panel from long-format observations, then runs [`analyze`].
pub fn analyze_observations(
    observations: &[ReturnObservation],
    definition: &PortfolioDefinition,
    config: &MetricsConfig,
) -> AnalyticsResult<AnalysisReport> {
    let panel = ReturnPanel::from_observations(observations)?;
    analyze(&panel, definition, config)
}
