//! Descriptive statistics on `f64` slices.
//!
//! Single-sample functions operate on exactly the values given; a `NaN` in
//! the input propagates. Use [`observed`] first to drop unobserved periods.
//! Two-sample functions use pairwise-complete observations.
//!
//! Moments come from [`statrs::statistics`]. A sample whose values are all
//! equal has a dispersion of exactly zero, so a flat window divides by zero
//! instead of by rounding noise.

use std::cmp::Ordering;

use statrs::statistics::{Data, Median, Statistics};

/// Returns the non-`NaN` values of a slice, preserving order.
pub fn observed(xs: &[f64]) -> Vec<f64> {
    xs.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Returns true when the slice is non-empty and every value equals the first.
///
/// Any `NaN` makes the slice non-constant.
#[allow(clippy::float_cmp)]
pub fn is_constant(xs: &[f64]) -> bool {
    match xs.first() {
        Some(first) => xs.iter().all(|x| x == first),
        None => false,
    }
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().mean()
}

/// Sample variance with one degree of freedom removed (ddof = 1).
///
/// `NaN` when fewer than two values are given, exactly `0.0` when all values
/// are equal.
pub fn sample_variance(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    if is_constant(xs) {
        return 0.0;
    }
    xs.iter().variance()
}

/// Sample standard deviation (ddof = 1).
pub fn sample_std(xs: &[f64]) -> f64 {
    sample_variance(xs).sqrt()
}

/// Median of a slice. `NaN` for an empty slice or one containing `NaN`.
pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() || xs.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    Data::new(xs.to_vec()).median()
}

/// Population excess kurtosis (fourth standardized moment minus three).
///
/// `NaN` for fewer than four values or zero dispersion.
pub fn excess_kurtosis(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 4 || is_constant(xs) {
        return f64::NAN;
    }
    let m = mean(xs);
    let m2 = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n as f64;
    let m4 = xs.iter().map(|x| (x - m).powi(4)).sum::<f64>() / n as f64;
    if m2 <= 0.0 {
        return f64::NAN;
    }
    m4 / (m2 * m2) - 3.0
}

/// The two sides of the pairs `(x[i], y[i])` where both values are observed.
fn complete_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .unzip()
}

/// Sample covariance (ddof = 1) over pairwise-complete observations.
///
/// `NaN` when fewer than two complete pairs exist, exactly `0.0` when either
/// side is constant over those pairs.
pub fn pairwise_covariance(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys) = complete_pairs(x, y);
    if xs.len() < 2 {
        return f64::NAN;
    }
    if is_constant(&xs) || is_constant(&ys) {
        return 0.0;
    }
    xs.iter().covariance(ys.iter())
}

/// Pearson correlation over pairwise-complete observations.
///
/// `NaN` when fewer than two complete pairs exist or either side is constant.
pub fn pairwise_correlation(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys) = complete_pairs(x, y);
    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return f64::NAN;
    }
    let denom = (sample_variance(&xs) * sample_variance(&ys)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (xs.iter().covariance(ys.iter()) / denom).clamp(-1.0, 1.0)
}

/// Sorts a copy of the slice ascending, `NaN` values removed.
pub fn sorted_observed(xs: &[f64]) -> Vec<f64> {
    let mut sorted = observed(xs);
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&xs), 5.0);
        // Population variance is 4, sample variance is 32/7.
        assert_relative_eq!(sample_variance(&xs), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(sample_std(&xs), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(sample_variance(&[1.0]).is_nan());
        assert!(median(&[]).is_nan());
        assert!(excess_kurtosis(&[1.0, 1.0, 1.0, 1.0]).is_nan());
        assert!(pairwise_covariance(&[1.0, f64::NAN], &[f64::NAN, 2.0]).is_nan());
    }

    #[test]
    fn test_nan_propagates_in_single_sample() {
        assert!(mean(&[1.0, f64::NAN]).is_nan());
        assert_relative_eq!(mean(&observed(&[1.0, f64::NAN, 3.0])), 2.0);
    }

    #[test]
    fn test_median() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_pairwise_covariance_skips_incomplete_pairs() {
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [2.0, 4.0, 100.0, 8.0];
        // Complete pairs: (1,2), (2,4), (4,8)
        let expected = sample_variance(&[1.0, 2.0, 4.0]) * 2.0;
        assert_relative_eq!(pairwise_covariance(&x, &y), expected, epsilon = 1e-12);
        assert_relative_eq!(pairwise_correlation(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_sign() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pairwise_correlation(&x, &y), -1.0, epsilon = 1e-12);
        assert!(pairwise_correlation(&x, &[1.0; 4]).is_nan());
    }

    #[test]
    fn test_excess_kurtosis_uniform_is_negative() {
        let xs: Vec<f64> = (0..100).map(f64::from).collect();
        assert!(excess_kurtosis(&xs) < 0.0);
    }

    #[test]
    fn test_flat_sample_has_exactly_zero_dispersion() {
        // 0.01 is not binary-exact; the moments must still vanish exactly
        let flat = [0.01; 12];
        assert_eq!(sample_variance(&flat), 0.0);
        assert_eq!(sample_std(&flat), 0.0);
        assert_eq!(mean(&flat), 0.01);
        assert_eq!(pairwise_covariance(&flat, &[0.03; 12]), 0.0);
        assert_eq!(pairwise_covariance(&flat, &[0.01, 0.02, 0.03, 0.04]), 0.0);
        assert!(pairwise_correlation(&flat, &[0.03; 12]).is_nan());
        assert!(excess_kurtosis(&flat).is_nan());
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[0.07, 0.07, 0.07]));
        assert!(!is_constant(&[0.07, 0.07 + 1e-15]));
        assert!(!is_constant(&[f64::NAN, f64::NAN]));
        assert!(!is_constant(&[]));
    }

    #[test]
    fn test_median_with_gap_is_nan() {
        assert!(median(&[1.0, f64::NAN, 2.0]).is_nan());
    }

    #[test]
    fn test_sorted_observed() {
        assert_eq!(sorted_observed(&[3.0, f64::NAN, 1.0, 2.0]), vec![1.0, 2.0, 3.0]);
    }
}
