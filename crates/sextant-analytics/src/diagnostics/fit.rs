//! Maximum-likelihood Student-t fit.

use serde::Serialize;
use sextant_math::optimization::{nelder_mead, OptimizationConfig};
use sextant_math::statistics::{excess_kurtosis, median, observed, sample_std};
use statrs::distribution::StudentsT;
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Minimum observations for a three-parameter fit.
pub const MIN_FIT_OBSERVATIONS: usize = 3;

/// Above this `ln(df)` the t is indistinguishable from a normal and the
/// likelihood surface is flat.
const MAX_LOG_DF: f64 = 25.0;

/// Fitted location-scale Student-t parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudentTFit {
    /// Degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Location.
    pub location: f64,
    /// Scale.
    pub scale: f64,
    /// Log-likelihood at the fitted parameters.
    pub log_likelihood: f64,
    /// Observations used.
    pub observations: usize,
    /// Optimizer iterations.
    pub iterations: u32,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
}

impl StudentTFit {
    /// The fitted distribution.
    pub fn distribution(&self) -> AnalyticsResult<StudentsT> {
        StudentsT::new(self.location, self.scale, self.degrees_of_freedom)
            .map_err(AnalyticsError::distribution)
    }
}

/// Log-likelihood of `xs` under a location-scale Student-t.
pub fn students_t_log_likelihood(xs: &[f64], df: f64, location: f64, scale: f64) -> f64 {
    if !(df > 0.0 && scale > 0.0) {
        return f64::NEG_INFINITY;
    }
    let n = xs.len() as f64;
    let norm = ln_gamma((df + 1.0) / 2.0) - ln_gamma(df / 2.0) - 0.5 * (df * PI).ln() - scale.ln();
    let kernel: f64 = xs
        .iter()
        .map(|x| {
            let z = (x - location) / scale;
            (1.0 + z * z / df).ln()
        })
        .sum();
    n * norm - (df + 1.0) / 2.0 * kernel
}

/// Fits `(df, location, scale)` by maximum likelihood over the observed
/// values of `returns`.
///
/// The search runs Nelder-Mead on `(ln df, location, ln scale)`, starting
/// from the median, a kurtosis-implied df and the matching scale. Needs at
/// least three observations and non-zero dispersion.
pub fn fit_students_t(returns: &[f64]) -> AnalyticsResult<StudentTFit> {
    let xs = observed(returns);
    if xs.len() < MIN_FIT_OBSERVATIONS {
        return Err(AnalyticsError::insufficient_data(
            "Student-t fit",
            MIN_FIT_OBSERVATIONS,
            xs.len(),
        ));
    }

    let std = sample_std(&xs);
    if !(std > 0.0 && std.is_finite()) {
        return Err(AnalyticsError::degenerate("Student-t fit needs non-zero dispersion"));
    }

    let kurtosis = excess_kurtosis(&xs);
    let df0 = (if kurtosis > 0.0 { 6.0 / kurtosis + 4.0 } else { 30.0 }).clamp(2.5, 100.0);
    let scale0 = std * ((df0 - 2.0) / df0).sqrt();
    let start = [df0.ln(), median(&xs), scale0.ln()];

    let objective = |p: &[f64]| {
        if p[0] > MAX_LOG_DF {
            return f64::INFINITY;
        }
        -students_t_log_likelihood(&xs, p[0].exp(), p[1], p[2].exp())
    };

    let config = OptimizationConfig::default();
    let mut result = nelder_mead(&objective, &start, &config)?;
    if !result.converged {
        // A fresh simplex around the best point usually finishes the job
        let iterations = result.iterations;
        result = nelder_mead(&objective, &result.parameters, &config)?;
        result.iterations += iterations;
    }

    let fit = StudentTFit {
        degrees_of_freedom: result.parameters[0].exp(),
        location: result.parameters[1],
        scale: result.parameters[2].exp(),
        log_likelihood: -result.objective_value,
        observations: xs.len(),
        iterations: result.iterations,
        converged: result.converged,
    };
    debug!(
        df = fit.degrees_of_freedom,
        loc = fit.location,
        scale = fit.scale,
        iterations = fit.iterations,
        converged = fit.converged,
        "Fitted Student-t"
    );
    Ok(fit)
}
