//! Return contribution.
//!
//! Each constituent's contribution is its weight times the arithmetic sum of
//! its observed returns. Shares are normalized by the sum of those weighted
//! sums, which with no gaps equals the arithmetic sum of the portfolio's
//! period returns. This is not the compounded total return; the arithmetic
//! portfolio total is reported alongside so the base is visible.

use serde::Serialize;
use sextant_core::{PortfolioDefinition, ReturnPanel};

use super::{ContributionBreakdown, ContributionKind};
use crate::error::AnalyticsResult;
use crate::panel::select_instruments;
use crate::portfolio::portfolio_returns;

/// Return contribution by constituent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnContribution {
    /// Per-constituent weighted return sums and shares.
    pub breakdown: ContributionBreakdown,

    /// Arithmetic sum of the observed portfolio returns.
    pub portfolio_arithmetic_total: f64,
}

/// Computes return contributions for the definition's constituents.
pub fn return_contribution(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
) -> AnalyticsResult<ReturnContribution> {
    let constituents = select_instruments(panel, &definition.ids())?;
    let weights = definition.weights();

    let weighted_sums: Vec<f64> = constituents
        .columns()
        .iter()
        .zip(&weights)
        .map(|(column, w)| w * column.iter().filter(|r| !r.is_nan()).sum::<f64>())
        .collect();

    let portfolio = portfolio_returns(&constituents, &weights)?;
    let portfolio_arithmetic_total = portfolio.observed_values().iter().sum::<f64>();

    let breakdown = ContributionBreakdown::from_contributions(
        ContributionKind::Return,
        definition
            .constituents()
            .iter()
            .map(|c| (c.id.clone(), c.label.clone(), c.weight)),
        &weighted_sums,
    );

    Ok(ReturnContribution {
        breakdown,
        portfolio_arithmetic_total,
    })
}
