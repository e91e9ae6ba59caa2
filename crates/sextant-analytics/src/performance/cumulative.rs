//! Compounded equity, cumulative return and drawdown.
//!
//! Gaps (`NaN` returns) are skipped: the output is `NaN` on the gap date and
//! compounding resumes from the last observed level, so a single missing
//! month does not poison the rest of the series.

use sextant_core::ReturnSeries;

use crate::error::AnalyticsResult;

/// Growth of one unit: running product of `1 + r` over observed periods.
pub fn equity_curve(returns: &ReturnSeries) -> AnalyticsResult<ReturnSeries> {
    let mut level = 1.0;
    let values = returns
        .values()
        .iter()
        .map(|r| {
            if r.is_nan() {
                f64::NAN
            } else {
                level *= 1.0 + r;
                level
            }
        })
        .collect();
    Ok(returns.with_values(values)?)
}

/// Cumulative return: `equity(t) - 1`.
pub fn cumulative_returns(returns: &ReturnSeries) -> AnalyticsResult<ReturnSeries> {
    let equity = equity_curve(returns)?;
    let values = equity.values().iter().map(|e| e - 1.0).collect();
    Ok(returns.with_values(values)?)
}

/// Drawdown: `equity(t) / max(equity up to t) - 1`.
///
/// Always `<= 0`, and exactly `0` on every date that sets a new running
/// maximum. The running maximum starts at the first observed equity level.
pub fn drawdowns(returns: &ReturnSeries) -> AnalyticsResult<ReturnSeries> {
    let equity = equity_curve(returns)?;
    let mut peak = f64::NEG_INFINITY;
    let values = equity
        .values()
        .iter()
        .map(|&e| {
            if e.is_nan() {
                return f64::NAN;
            }
            if e >= peak {
                peak = e;
                0.0
            } else {
                e / peak - 1.0
            }
        })
        .collect();
    Ok(returns.with_values(values)?)
}

/// Largest peak-to-trough decline, as a non-positive fraction.
///
/// `NaN` when the series has no observations.
pub fn max_drawdown(returns: &ReturnSeries) -> AnalyticsResult<f64> {
    let dd = drawdowns(returns)?;
    Ok(dd
        .values()
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::min))
}
