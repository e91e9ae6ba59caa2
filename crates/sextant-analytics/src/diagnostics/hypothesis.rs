//! Paired t-test and two-sample Kolmogorov-Smirnov test.

use serde::Serialize;
use sextant_core::ReturnSeries;
use sextant_math::kolmogorov::{ks_two_sample_pvalue, ks_two_sample_statistic};
use sextant_math::statistics::{mean, sample_std, sorted_observed};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::cmp::Ordering;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Which test produced a [`HypothesisTestResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestKind {
    /// Two-sided paired t-test on date-aligned differences.
    PairedT,
    /// Two-sided two-sample Kolmogorov-Smirnov test.
    KolmogorovSmirnov,
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PairedT => write!(f, "Paired t-test"),
            Self::KolmogorovSmirnov => write!(f, "Kolmogorov-Smirnov"),
        }
    }
}

/// Outcome of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    /// The test.
    pub kind: TestKind,
    /// Test statistic; `NaN` when undefined.
    pub statistic: f64,
    /// Two-sided p-value; `NaN` when undefined.
    pub p_value: f64,
    /// Size of the first sample (number of pairs for the paired test).
    pub n1: usize,
    /// Size of the second sample (number of pairs for the paired test).
    pub n2: usize,
}

impl HypothesisTestResult {
    /// Returns true if the null is rejected at level `alpha`.
    ///
    /// An undefined p-value never rejects.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Paired two-sided t-test of `mean(a - b) = 0`.
///
/// Pairs are the dates on which both series are observed. With `n` pairs,
/// `t = mean(d) / (sd(d) / sqrt(n))` against a Student-t with `n - 1` degrees
/// of freedom. Identical series give `NaN` for both statistic and p-value; a
/// constant non-zero difference gives an infinite statistic and `p = 0`;
/// fewer than two pairs give `NaN`.
pub fn paired_t_test(a: &ReturnSeries, b: &ReturnSeries) -> AnalyticsResult<HypothesisTestResult> {
    let diffs = aligned_differences(a, b);
    let n = diffs.len();

    let (statistic, p_value) = if n < 2 {
        (f64::NAN, f64::NAN)
    } else {
        let t = mean(&diffs) / (sample_std(&diffs) / (n as f64).sqrt());
        (t, t_two_sided_pvalue(t, n - 1)?)
    };

    Ok(HypothesisTestResult {
        kind: TestKind::PairedT,
        statistic,
        p_value,
        n1: n,
        n2: n,
    })
}

/// Two-sample two-sided Kolmogorov-Smirnov test.
///
/// `NaN` values are dropped from each sample independently. The p-value is
/// exact for samples of up to 10 000 points and asymptotic beyond.
#[must_use]
pub fn ks_two_sample_test(a: &[f64], b: &[f64]) -> HypothesisTestResult {
    let a = sorted_observed(a);
    let b = sorted_observed(b);
    let statistic = ks_two_sample_statistic(&a, &b);

    HypothesisTestResult {
        kind: TestKind::KolmogorovSmirnov,
        statistic,
        p_value: ks_two_sample_pvalue(statistic, a.len(), b.len()),
        n1: a.len(),
        n2: b.len(),
    }
}

/// `a - b` on the dates where both are observed, in date order.
fn aligned_differences(a: &ReturnSeries, b: &ReturnSeries) -> Vec<f64> {
    let (da, va) = (a.dates(), a.values());
    let (db, vb) = (b.dates(), b.values());
    let (mut i, mut j) = (0, 0);
    let mut diffs = Vec::new();

    while i < da.len() && j < db.len() {
        match da[i].cmp(&db[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                if !va[i].is_nan() && !vb[j].is_nan() {
                    diffs.push(va[i] - vb[j]);
                }
                i += 1;
                j += 1;
            }
        }
    }
    diffs
}

fn t_two_sided_pvalue(t: f64, df: usize) -> AnalyticsResult<f64> {
    if t.is_nan() {
        return Ok(f64::NAN);
    }
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df as f64).map_err(AnalyticsError::distribution)?;
    Ok((2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0))
}
