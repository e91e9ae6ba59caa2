//! Risk contribution.
//!
//! Euler decomposition of portfolio volatility: with sample covariance `Σ`
//! and weights `w`, `σ_p = sqrt(wᵀΣw)` and constituent `i` contributes
//! `w_i (Σw)_i / σ_p`. The contributions sum to `σ_p`.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use sextant_core::{PortfolioDefinition, ReturnPanel};
use sextant_math::linear_algebra::{covariance_matrix, matrix_vector};
use tracing::warn;

use super::{ContributionBreakdown, ContributionKind};
use crate::error::AnalyticsResult;
use crate::panel::select_instruments;

/// Risk contribution by constituent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskContribution {
    /// Per-constituent volatility contributions and shares.
    pub breakdown: ContributionBreakdown,

    /// Portfolio volatility per period, `sqrt(wᵀΣw)` (not annualized).
    pub portfolio_volatility: f64,

    /// Marginal contributions `(Σw)_i`.
    pub marginal_contributions: Vec<f64>,
}

impl RiskContribution {
    /// Returns true when portfolio volatility is zero or undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.breakdown.is_degenerate()
    }
}

/// Computes risk contributions for the definition's constituents.
///
/// The covariance matrix uses pairwise-complete observations (ddof = 1).
/// When portfolio volatility is not finite, or is negligible next to the
/// largest constituent volatility, the contributions and shares are `NaN`
/// and the result reports itself degenerate.
pub fn risk_contribution(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
) -> AnalyticsResult<RiskContribution> {
    let constituents = select_instruments(panel, &definition.ids())?;
    let cov = covariance_matrix(constituents.columns())?;
    let w = DVector::from_vec(definition.weights());

    let marginal = matrix_vector(&cov, &w)?;
    let variance = w.dot(&marginal);
    let portfolio_volatility = variance.sqrt();

    let contributions: Vec<f64> = if !is_negligible(portfolio_volatility, &cov) {
        w.iter()
            .zip(marginal.iter())
            .map(|(wi, mi)| wi * mi / portfolio_volatility)
            .collect()
    } else {
        warn!(
            variance,
            "Portfolio volatility is zero or undefined; risk shares are NaN"
        );
        vec![f64::NAN; w.len()]
    };

    let breakdown = ContributionBreakdown::from_contributions(
        ContributionKind::Risk,
        definition
            .constituents()
            .iter()
            .map(|c| (c.id.clone(), c.label.clone(), c.weight)),
        &contributions,
    );

    Ok(RiskContribution {
        breakdown,
        portfolio_volatility,
        marginal_contributions: marginal.iter().copied().collect(),
    })
}

/// Portfolio volatility at or below this fraction of the largest constituent
/// volatility is treated as zero.
const RELATIVE_VOLATILITY_FLOOR: f64 = 1e-12;

/// True when `volatility` is undefined or indistinguishable from zero
/// relative to the constituents' own volatilities.
fn is_negligible(volatility: f64, cov: &DMatrix<f64>) -> bool {
    if !volatility.is_finite() {
        return true;
    }
    let largest = cov
        .diagonal()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max)
        .sqrt();
    volatility <= RELATIVE_VOLATILITY_FLOOR * largest
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use sextant_core::{Constituent, ReturnObservation};

    fn d(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 28).unwrap()
    }

    fn definition(wa: f64, wb: f64) -> PortfolioDefinition {
        PortfolioDefinition::new(
            vec![Constituent::new("A", "Alpha", wa), Constituent::new("B", "Beta", wb)],
            "IDX",
            "Index",
        )
        .unwrap()
    }

    fn panel(a: &[f64], b: &[f64]) -> ReturnPanel {
        let mut obs = Vec::new();
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            let date = d(i as u32 + 1);
            obs.push(ReturnObservation::new(date, "A", *x));
            obs.push(ReturnObservation::new(date, "B", *y));
        }
        ReturnPanel::from_observations(&obs).unwrap()
    }

    #[test]
    fn test_contributions_sum_to_volatility() {
        let p = panel(&[0.01, -0.02, 0.03, 0.00], &[0.02, 0.01, -0.01, 0.015]);
        let rc = risk_contribution(&p, &definition(0.7, 0.3)).unwrap();

        let sum: f64 = rc.breakdown.entries.iter().map(|e| e.contribution).sum();
        assert_relative_eq!(sum, rc.portfolio_volatility, epsilon = 1e-12);
        assert_relative_eq!(rc.breakdown.sum_of_shares(), 1.0, epsilon = 1e-9);
        assert!(!rc.is_degenerate());
    }

    #[test]
    fn test_volatility_matches_portfolio_series() {
        let a = [0.01, -0.02, 0.03, 0.00, 0.025];
        let b = [0.02, 0.01, -0.01, 0.015, -0.005];
        let rc = risk_contribution(&panel(&a, &b), &definition(0.5, 0.5)).unwrap();

        let portfolio: Vec<f64> = a.iter().zip(&b).map(|(x, y)| 0.5 * x + 0.5 * y).collect();
        let expected = sextant_math::statistics::sample_std(&portfolio);
        assert_relative_eq!(rc.portfolio_volatility, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_single_risky_asset_takes_all_risk() {
        let p = panel(&[0.01, -0.02, 0.03], &[0.0, 0.0, 0.0]);
        let rc = risk_contribution(&p, &definition(0.5, 0.5)).unwrap();

        assert_relative_eq!(rc.breakdown.shares()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(rc.breakdown.shares()[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let p = panel(&[0.01; 12], &[0.03; 12]);
        let rc = risk_contribution(&p, &definition(0.5, 0.5)).unwrap();

        assert_eq!(rc.portfolio_volatility, 0.0);
        assert!(rc.is_degenerate());
        assert!(rc.breakdown.shares().iter().all(|s| s.is_nan()));
        assert!(rc.breakdown.require_non_degenerate().is_err());
    }

    #[test]
    fn test_hedged_volatility_below_floor_is_degenerate() {
        // B = -A exactly, so the equal-weight portfolio is flat
        let a = [0.01, -0.02, 0.03, 0.00, 0.025, -0.015];
        let b: Vec<f64> = a.iter().map(|x| -x).collect();
        let rc = risk_contribution(&panel(&a, &b), &definition(0.5, 0.5)).unwrap();

        assert!(rc.portfolio_volatility.is_nan() || rc.portfolio_volatility < 1e-15);
        assert!(rc.is_degenerate());
    }

    #[test]
    fn test_negligible_volatility() {
        let cov = DMatrix::from_row_slice(2, 2, &[1e-4, 0.0, 0.0, 4e-4]);
        assert!(is_negligible(0.0, &cov));
        assert!(is_negligible(1e-16, &cov));
        assert!(is_negligible(f64::NAN, &cov));
        assert!(!is_negligible(1e-6, &cov));
    }
}
