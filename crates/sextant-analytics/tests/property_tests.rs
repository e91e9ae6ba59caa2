//! Property-based tests for analytics invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Drawdown is never positive and is zero at new highs
//! - Cumulative return equals equity minus one
//! - Return and risk shares sum to one
//! - Flat inputs have exactly zero dispersion and degenerate risk shares
//! - Hypothesis tests are deterministic

use chrono::NaiveDate;
use proptest::prelude::*;
use sextant_analytics::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn month(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2000 + (i / 12) as i32, (i % 12) as u32 + 1, 28).unwrap()
}

fn series(values: &[f64]) -> ReturnSeries {
    ReturnSeries::new((0..values.len()).map(month).collect(), values.to_vec()).unwrap()
}

/// Monthly returns between -30% and +30%, with occasional gaps.
fn returns_with_gaps(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![9 => -0.3..0.3_f64, 1 => Just(f64::NAN)],
        1..max_len,
    )
}

fn panel_and_definition(columns: &[Vec<f64>], weights: &[f64]) -> (ReturnPanel, PortfolioDefinition) {
    let mut observations = Vec::new();
    for (k, column) in columns.iter().enumerate() {
        for (i, v) in column.iter().enumerate() {
            observations.push(ReturnObservation::new(month(i), format!("C{k}"), *v));
        }
    }
    for i in 0..columns[0].len() {
        observations.push(ReturnObservation::new(month(i), "BM", 0.0));
    }
    let panel = ReturnPanel::from_observations(&observations).unwrap();
    let constituents = weights
        .iter()
        .enumerate()
        .map(|(k, w)| Constituent::new(format!("C{k}"), format!("Fund {k}"), *w))
        .collect();
    let definition = PortfolioDefinition::new(constituents, "BM", "Benchmark").unwrap();
    (panel, definition)
}

// =============================================================================
// PERFORMANCE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_drawdown_never_positive(values in returns_with_gaps(120)) {
        let returns = series(&values);
        let dd = drawdowns(&returns).unwrap();
        let equity = equity_curve(&returns).unwrap();

        let mut peak = f64::NEG_INFINITY;
        for (d, e) in dd.values().iter().zip(equity.values()) {
            if e.is_nan() {
                prop_assert!(d.is_nan());
                continue;
            }
            prop_assert!(*d <= 0.0);
            if *e >= peak {
                peak = *e;
                prop_assert_eq!(*d, 0.0);
            }
        }
    }

    #[test]
    fn prop_cumulative_is_equity_minus_one(values in returns_with_gaps(120)) {
        let returns = series(&values);
        let cum = cumulative_returns(&returns).unwrap();
        let equity = equity_curve(&returns).unwrap();

        prop_assert_eq!(cum.len(), returns.len());
        for (c, e) in cum.values().iter().zip(equity.values()) {
            if e.is_nan() {
                prop_assert!(c.is_nan());
            } else {
                prop_assert!((c - (e - 1.0)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn prop_rolling_warmup_is_nan(values in prop::collection::vec(-0.2..0.2_f64, 12..60)) {
        let returns = series(&values);
        let vol = rolling_volatility(&returns, &MetricsConfig::MONTHLY).unwrap();

        prop_assert!(vol.values()[..11].iter().all(|v| v.is_nan()));
        prop_assert!(vol.values()[11..].iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn prop_flat_window_has_zero_volatility(level in -0.2..0.2_f64, len in 12..48_usize) {
        let returns = series(&vec![level; len]);
        let vol = rolling_volatility(&returns, &MetricsConfig::MONTHLY).unwrap();
        let sharpe = rolling_sharpe(&returns, &MetricsConfig::MONTHLY).unwrap();

        prop_assert!(vol.values()[11..].iter().all(|v| *v == 0.0));
        prop_assert!(sharpe.values()[11..].iter().all(|s| s.is_infinite() || s.is_nan()));
    }

    #[test]
    fn prop_annual_returns_cover_every_year(values in returns_with_gaps(60)) {
        let returns = series(&values);
        let years = annual_returns(&returns);
        prop_assert_eq!(years.len(), (values.len() - 1) / 12 + 1);
        let observed: usize = years.iter().map(|y| y.observations).sum();
        prop_assert_eq!(observed, returns.observed_count());
    }
}

// =============================================================================
// CONTRIBUTION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_risk_shares_sum_to_one(
        columns in prop::collection::vec(prop::collection::vec(-0.2..0.2_f64, 24), 2..6),
        raw_weights in prop::collection::vec(0.05..1.0_f64, 6),
    ) {
        let weights = &raw_weights[..columns.len()];
        let (panel, definition) = panel_and_definition(&columns, weights);
        let risk = risk_contribution(&panel, &definition).unwrap();

        prop_assume!(!risk.is_degenerate());
        prop_assert!((risk.breakdown.sum_of_shares() - 1.0).abs() < 1e-9);

        let total: f64 = risk.breakdown.entries.iter().map(|e| e.contribution).sum();
        prop_assert!((total - risk.portfolio_volatility).abs() < 1e-9);
    }

    #[test]
    fn prop_constant_columns_are_risk_degenerate(
        levels in prop::collection::vec(-0.1..0.1_f64, 2..6),
        len in 3..36_usize,
        raw_weights in prop::collection::vec(0.05..1.0_f64, 6),
    ) {
        let columns: Vec<Vec<f64>> = levels.iter().map(|level| vec![*level; len]).collect();
        let weights = &raw_weights[..columns.len()];
        let (panel, definition) = panel_and_definition(&columns, weights);
        let risk = risk_contribution(&panel, &definition).unwrap();

        prop_assert_eq!(risk.portfolio_volatility, 0.0);
        prop_assert!(risk.is_degenerate());
    }

    #[test]
    fn prop_return_shares_sum_to_one(
        columns in prop::collection::vec(prop::collection::vec(-0.2..0.2_f64, 12), 2..6),
        raw_weights in prop::collection::vec(0.05..1.0_f64, 6),
    ) {
        let weights = &raw_weights[..columns.len()];
        let (panel, definition) = panel_and_definition(&columns, weights);
        let rc = return_contribution(&panel, &definition).unwrap();

        prop_assume!(rc.breakdown.total.abs() > 1e-6);
        prop_assert!((rc.breakdown.sum_of_shares() - 1.0).abs() < 1e-9);
        // No gaps: the share base is the portfolio's arithmetic total
        prop_assert!((rc.breakdown.total - rc.portfolio_arithmetic_total).abs() < 1e-12);
    }
}

// =============================================================================
// HYPOTHESIS TEST PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_tests_are_deterministic(
        a in prop::collection::vec(-0.2..0.2_f64, 3..80),
        b in prop::collection::vec(-0.2..0.2_f64, 3..80),
    ) {
        let first = ks_two_sample_test(&a, &b);
        let second = ks_two_sample_test(&a, &b);
        prop_assert_eq!(first.statistic.to_bits(), second.statistic.to_bits());
        prop_assert_eq!(first.p_value.to_bits(), second.p_value.to_bits());
        prop_assert!((0.0..=1.0).contains(&first.p_value));

        let (sa, sb) = (series(&a), series(&b));
        let first = paired_t_test(&sa, &sb).unwrap();
        let second = paired_t_test(&sa, &sb).unwrap();
        prop_assert_eq!(first.statistic.to_bits(), second.statistic.to_bits());
        prop_assert_eq!(first.p_value.to_bits(), second.p_value.to_bits());
    }

    #[test]
    fn prop_identical_samples(a in prop::collection::vec(-0.2..0.2_f64, 2..50)) {
        let s = series(&a);
        let paired = paired_t_test(&s, &s).unwrap();
        prop_assert!(paired.statistic.is_nan());

        let ks = ks_two_sample_test(&a, &a);
        prop_assert_eq!(ks.statistic, 0.0);
        prop_assert_eq!(ks.p_value, 1.0);
    }
}
