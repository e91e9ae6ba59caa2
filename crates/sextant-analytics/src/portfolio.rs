//! Portfolio and benchmark return series.

use sextant_core::{CoreError, InstrumentId, PortfolioDefinition, ReturnPanel, ReturnSeries};

use crate::error::AnalyticsResult;
use crate::panel::portfolio_view;

/// Portfolio and benchmark returns on a shared date axis.
#[derive(Debug, Clone)]
pub struct PortfolioSeries {
    /// Weighted portfolio returns.
    pub portfolio: ReturnSeries,
    /// Benchmark returns, unchanged from the panel.
    pub benchmark: ReturnSeries,
}

/// Weighted portfolio return per date: the dot product of `weights` with the
/// panel row.
///
/// Weights are used as given (no renormalization) and must match the panel's
/// column order and count. A `NaN` in any constituent on a date makes the
/// portfolio return on that date `NaN`.
pub fn portfolio_returns(panel: &ReturnPanel, weights: &[f64]) -> AnalyticsResult<ReturnSeries> {
    if weights.len() != panel.n_instruments() {
        return Err(CoreError::shape_mismatch("weights", panel.n_instruments(), weights.len()).into());
    }

    let values = (0..panel.n_periods())
        .map(|row| {
            panel
                .columns()
                .iter()
                .zip(weights)
                .map(|(column, w)| w * column[row])
                .sum::<f64>()
        })
        .collect();

    Ok(ReturnSeries::new(panel.dates().to_vec(), values)?)
}

/// Benchmark returns extracted unchanged from the panel.
pub fn benchmark_returns(panel: &ReturnPanel, id: &InstrumentId) -> AnalyticsResult<ReturnSeries> {
    Ok(panel.series(id)?)
}

/// Builds portfolio and benchmark series for a definition.
pub fn build_portfolio_series(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
) -> AnalyticsResult<PortfolioSeries> {
    let view = portfolio_view(panel, definition)?;
    let portfolio = portfolio_returns(&view.constituents, &definition.weights())?;
    Ok(PortfolioSeries {
        portfolio,
        benchmark: view.benchmark,
    })
}
