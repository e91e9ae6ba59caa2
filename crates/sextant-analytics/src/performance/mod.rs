//! Performance metrics on a single return series.
//!
//! Every series-valued metric keeps the input's date axis; `NaN` marks dates
//! where a metric is undefined (gaps, incomplete rolling windows).

mod annual;
mod cumulative;
mod rolling;
mod summary;

pub use annual::{annual_returns, best_and_worst_years, AnnualReturn, YearExtremes};
pub use cumulative::{cumulative_returns, drawdowns, equity_curve, max_drawdown};
pub use rolling::{rolling_apply, rolling_sharpe, rolling_volatility};
pub use summary::{summary_statistics, SummaryStatistics};

use serde::Serialize;
use sextant_core::{MetricsConfig, ReturnSeries};
use tracing::debug;

use crate::error::AnalyticsResult;

/// All performance outputs for one return series.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    /// Compounded cumulative return.
    pub cumulative_return: ReturnSeries,
    /// Decline from the running equity peak.
    pub drawdown: ReturnSeries,
    /// Annualized trailing-window volatility.
    pub rolling_volatility: ReturnSeries,
    /// Trailing-window Sharpe-like ratio.
    pub rolling_sharpe: ReturnSeries,
    /// Compounded calendar-year returns.
    pub annual_returns: Vec<AnnualReturn>,
    /// Best and worst calendar years, if any year has a value.
    pub year_extremes: Option<YearExtremes>,
    /// Full-sample summary.
    pub summary: SummaryStatistics,
}

/// Computes every performance metric for `returns`.
pub fn performance_metrics(
    returns: &ReturnSeries,
    config: &MetricsConfig,
) -> AnalyticsResult<PerformanceMetrics> {
    let annual = annual_returns(returns);
    let metrics = PerformanceMetrics {
        cumulative_return: cumulative_returns(returns)?,
        drawdown: drawdowns(returns)?,
        rolling_volatility: rolling_volatility(returns, config)?,
        rolling_sharpe: rolling_sharpe(returns, config)?,
        year_extremes: best_and_worst_years(&annual),
        annual_returns: annual,
        summary: summary_statistics(returns, config)?,
    };

    debug!(
        periods = metrics.summary.periods,
        observed = metrics.summary.observed,
        total_return = metrics.summary.total_return,
        max_drawdown = metrics.summary.max_drawdown,
        "Computed performance metrics"
    );
    Ok(metrics)
}
