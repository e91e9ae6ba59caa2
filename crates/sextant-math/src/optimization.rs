//! Optimization algorithms.
//!
//! This module provides derivative-free minimization used for
//! maximum-likelihood distribution fitting.

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Tolerance for convergence, applied to both the simplex spread in
    /// parameter space and in objective values.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Relative size of the initial simplex around the starting point.
    pub step_size: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 2000,
            step_size: 0.05,
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Nelder-Mead downhill simplex minimizer.
///
/// Uses the standard reflection (1), expansion (2), contraction (0.5) and
/// shrink (0.5) coefficients. Non-finite objective values are treated as
/// `+∞`, so the simplex steers away from infeasible regions.
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input("Nelder-Mead needs at least one parameter"));
    }
    if initial.iter().any(|x| !x.is_finite()) {
        return Err(MathError::invalid_input("Nelder-Mead starting point must be finite"));
    }

    let eval = |x: &[f64]| {
        let v = f(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for k in 0..n {
        let mut vertex = initial.to_vec();
        vertex[k] = if vertex[k] == 0.0 {
            0.00025
        } else {
            vertex[k] * (1.0 + config.step_size)
        };
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|x| eval(x)).collect();

    let mut iterations = 0;
    while iterations < config.max_iterations {
        // Order vertices best to worst
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        simplex = order.iter().map(|&i| simplex[i].clone()).collect();
        values = order.iter().map(|&i| values[i]).collect();

        let x_spread = simplex[1..]
            .iter()
            .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
            .fold(0.0_f64, f64::max);
        let f_spread = values[1..]
            .iter()
            .map(|v| (v - values[0]).abs())
            .fold(0.0_f64, f64::max);
        if x_spread <= config.tolerance && f_spread <= config.tolerance {
            return Ok(OptimizationResult {
                parameters: simplex[0].clone(),
                objective_value: values[0],
                iterations,
                converged: true,
            });
        }
        iterations += 1;

        // Centroid of all but the worst vertex
        let mut centroid = vec![0.0; n];
        for vertex in &simplex[..n] {
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }
        let along = |t: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&simplex[n])
                .map(|(c, w)| c + t * (c - w))
                .collect()
        };

        let reflected = along(1.0);
        let f_reflected = eval(&reflected);

        if f_reflected < values[0] {
            let expanded = along(2.0);
            let f_expanded = eval(&expanded);
            if f_expanded < f_reflected {
                simplex[n] = expanded;
                values[n] = f_expanded;
            } else {
                simplex[n] = reflected;
                values[n] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[n - 1] {
            simplex[n] = reflected;
            values[n] = f_reflected;
            continue;
        }

        let (contracted, f_contracted) = if f_reflected < values[n] {
            let outside = along(0.5);
            let f_outside = eval(&outside);
            (outside, f_outside)
        } else {
            let inside = along(-0.5);
            let f_inside = eval(&inside);
            (inside, f_inside)
        };

        if f_contracted < values[n].min(f_reflected) {
            simplex[n] = contracted;
            values[n] = f_contracted;
            continue;
        }

        // Shrink towards the best vertex
        let best = simplex[0].clone();
        for i in 1..=n {
            for (x, b) in simplex[i].iter_mut().zip(&best) {
                *x = b + 0.5 * (*x - b);
            }
            values[i] = eval(&simplex[i]);
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| values[a].total_cmp(&values[b]))
        .unwrap_or(0);
    Ok(OptimizationResult {
        parameters: simplex[best].clone(),
        objective_value: values[best],
        iterations,
        converged: false,
    })
}
