//! Full-sample summary statistics.

use serde::Serialize;
use sextant_core::{MetricsConfig, ReturnSeries};
use sextant_math::statistics::{mean, sample_std};

use super::cumulative::max_drawdown;
use crate::error::AnalyticsResult;

/// Headline numbers for one return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Dates on the axis, observed or not.
    pub periods: usize,
    /// Observed (non-`NaN`) periods.
    pub observed: usize,
    /// Compounded return over all observed periods.
    pub total_return: f64,
    /// Geometric annualized return: `(1 + total)^(ppy / observed) - 1`.
    pub annualized_return: f64,
    /// Sample standard deviation of observed returns times `sqrt(ppy)`.
    pub annualized_volatility: f64,
    /// Full-sample Sharpe-like ratio with a zero risk-free rate.
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough decline (non-positive).
    pub max_drawdown: f64,
    /// Highest single-period return.
    pub best_period: f64,
    /// Lowest single-period return.
    pub worst_period: f64,
}

/// Computes [`SummaryStatistics`] over the observed values of a series.
///
/// Quantities that need more observations than the series has are `NaN`.
pub fn summary_statistics(
    returns: &ReturnSeries,
    config: &MetricsConfig,
) -> AnalyticsResult<SummaryStatistics> {
    let observed = returns.observed_values();
    let n = observed.len();
    let periods_per_year = f64::from(config.periods_per_year);

    let total_return = if n == 0 {
        f64::NAN
    } else {
        observed.iter().map(|r| 1.0 + r).product::<f64>() - 1.0
    };
    let annualized_return = if n == 0 {
        f64::NAN
    } else {
        let years = n as f64 / periods_per_year;
        (1.0 + total_return).powf(1.0 / years) - 1.0
    };

    let std = sample_std(&observed);
    let annualized_volatility = std * config.annualization_factor();
    let sharpe_ratio = (mean(&observed) * periods_per_year) / annualized_volatility;

    Ok(SummaryStatistics {
        periods: returns.len(),
        observed: n,
        total_return,
        annualized_return,
        annualized_volatility,
        sharpe_ratio,
        max_drawdown: max_drawdown(returns)?,
        best_period: observed.iter().copied().fold(f64::NAN, f64::max),
        worst_period: observed.iter().copied().fold(f64::NAN, f64::min),
    })
}
