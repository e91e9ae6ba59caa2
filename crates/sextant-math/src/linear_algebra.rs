//! Linear algebra utilities.
//!
//! Covariance and correlation matrices built from column-major return data,
//! plus the products needed for portfolio risk decomposition.

use crate::error::{MathError, MathResult};
use crate::statistics::{pairwise_correlation, pairwise_covariance};
use nalgebra::{DMatrix, DVector};

/// Sample covariance matrix (ddof = 1) of the given columns.
///
/// Each entry uses the pairwise-complete observations of its two columns.
/// All columns must have the same length.
pub fn covariance_matrix(columns: &[Vec<f64>]) -> MathResult<DMatrix<f64>> {
    check_columns(columns)?;
    let n = columns.len();
    let mut cov = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let c = pairwise_covariance(&columns[i], &columns[j]);
            cov[(i, j)] = c;
            cov[(j, i)] = c;
        }
    }
    Ok(cov)
}

/// Pearson correlation matrix of the given columns (pairwise-complete).
pub fn correlation_matrix(columns: &[Vec<f64>]) -> MathResult<DMatrix<f64>> {
    check_columns(columns)?;
    let n = columns.len();
    let mut corr = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let c = pairwise_correlation(&columns[i], &columns[j]);
            corr[(i, j)] = c;
            corr[(j, i)] = c;
        }
    }
    Ok(corr)
}

/// Computes `wᵀ M w`.
pub fn quadratic_form(matrix: &DMatrix<f64>, w: &DVector<f64>) -> MathResult<f64> {
    let mw = matrix_vector(matrix, w)?;
    Ok(w.dot(&mw))
}

/// Computes `M w`, checking dimensions.
pub fn matrix_vector(matrix: &DMatrix<f64>, w: &DVector<f64>) -> MathResult<DVector<f64>> {
    if matrix.ncols() != w.len() {
        return Err(MathError::DimensionMismatch {
            rows1: matrix.nrows(),
            cols1: matrix.ncols(),
            rows2: w.len(),
            cols2: 1,
        });
    }
    Ok(matrix * w)
}

fn check_columns(columns: &[Vec<f64>]) -> MathResult<()> {
    if let Some(first) = columns.first() {
        if let Some(bad) = columns.iter().find(|c| c.len() != first.len()) {
            return Err(MathError::DimensionMismatch {
                rows1: first.len(),
                cols1: 1,
                rows2: bad.len(),
                cols2: 1,
            });
        }
    }
    Ok(())
}
