//! Trailing-window volatility and Sharpe-like ratio.

use sextant_core::{MetricsConfig, ReturnSeries};
use sextant_math::statistics::{mean, sample_std};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Applies `f` to every full trailing window of `window` values.
///
/// The first `window - 1` dates are `NaN`, as is any window that contains a
/// gap. The output keeps the input's date axis.
pub fn rolling_apply<F>(
    returns: &ReturnSeries,
    window: usize,
    f: F,
) -> AnalyticsResult<ReturnSeries>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return Err(AnalyticsError::invalid_config("rolling window must be positive"));
    }
    let values = returns.values();
    let out = (0..values.len())
        .map(|t| {
            if t + 1 < window {
                return f64::NAN;
            }
            let slice = &values[t + 1 - window..=t];
            if slice.iter().any(|v| v.is_nan()) {
                f64::NAN
            } else {
                f(slice)
            }
        })
        .collect();
    Ok(returns.with_values(out)?)
}

/// Annualized rolling volatility: sample standard deviation (ddof = 1) of the
/// trailing window, scaled by `sqrt(periods_per_year)`.
pub fn rolling_volatility(
    returns: &ReturnSeries,
    config: &MetricsConfig,
) -> AnalyticsResult<ReturnSeries> {
    check_window(config)?;
    let scale = config.annualization_factor();
    rolling_apply(returns, config.rolling_window, |w| sample_std(w) * scale)
}

/// Rolling Sharpe-like ratio with a zero risk-free rate:
/// `(mean * periods_per_year) / (std * sqrt(periods_per_year))`.
///
/// A flat window divides by zero and yields `±∞` or `NaN`; the value is
/// reported as is.
pub fn rolling_sharpe(
    returns: &ReturnSeries,
    config: &MetricsConfig,
) -> AnalyticsResult<ReturnSeries> {
    check_window(config)?;
    let periods = f64::from(config.periods_per_year);
    let scale = config.annualization_factor();
    rolling_apply(returns, config.rolling_window, |w| {
        (mean(w) * periods) / (sample_std(w) * scale)
    })
}

fn check_window(config: &MetricsConfig) -> AnalyticsResult<()> {
    if config.rolling_window < 2 {
        return Err(AnalyticsError::invalid_config(format!(
            "rolling window must be at least 2 periods, got {}",
            config.rolling_window
        )));
    }
    if config.periods_per_year == 0 {
        return Err(AnalyticsError::invalid_config("periods per year must be positive"));
    }
    Ok(())
}
