//! Quantile-quantile plot data.

use serde::Serialize;
use sextant_math::statistics::sorted_observed;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use super::fit::StudentTFit;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Theoretical distribution on the x axis of a QQ plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "distribution", rename_all = "snake_case")]
pub enum QqReference {
    /// Standard normal.
    StandardNormal,
    /// Student-t with location 0 and scale 1.
    StandardStudentT {
        /// Degrees of freedom.
        df: f64,
    },
    /// Location-scale Student-t.
    FittedStudentT {
        /// Degrees of freedom.
        df: f64,
        /// Location.
        location: f64,
        /// Scale.
        scale: f64,
    },
}

impl QqReference {
    /// Short label for reports.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::StandardNormal => "Normal".to_string(),
            Self::StandardStudentT { df } => format!("t(df={df:.2})"),
            Self::FittedStudentT { df, location, scale } => {
                format!("t(df={df:.2}, loc={location:.4}, scale={scale:.4})")
            }
        }
    }
}

/// One point of a QQ plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantilePair {
    /// Theoretical quantile.
    pub theoretical: f64,
    /// Observed order statistic.
    pub sample: f64,
}

/// A full QQ dataset against one reference distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QqPlotData {
    /// The reference distribution.
    pub reference: QqReference,
    /// Points in ascending sample order.
    pub points: Vec<QuantilePair>,
}

/// Pairs the sorted observed sample with `dist` quantiles at the plotting
/// positions `i / (n + 1)`, `i = 1..=n`.
pub fn quantile_pairs<D>(sample: &[f64], dist: &D) -> Vec<QuantilePair>
where
    D: ContinuousCDF<f64, f64>,
{
    let sorted = sorted_observed(sample);
    let denom = (sorted.len() + 1) as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, x)| {
            let p = (i + 1) as f64 / denom;
            QuantilePair {
                theoretical: dist.inverse_cdf(p),
                sample: x,
            }
        })
        .collect()
}

/// QQ dataset for a sample against `reference`.
pub fn qq_plot_data(sample: &[f64], reference: QqReference) -> AnalyticsResult<QqPlotData> {
    let points = match reference {
        QqReference::StandardNormal => {
            let dist = Normal::new(0.0, 1.0).map_err(AnalyticsError::distribution)?;
            quantile_pairs(sample, &dist)
        }
        QqReference::StandardStudentT { df } => {
            let dist = StudentsT::new(0.0, 1.0, df).map_err(AnalyticsError::distribution)?;
            quantile_pairs(sample, &dist)
        }
        QqReference::FittedStudentT { df, location, scale } => {
            let dist = StudentsT::new(location, scale, df).map_err(AnalyticsError::distribution)?;
            quantile_pairs(sample, &dist)
        }
    };
    Ok(QqPlotData { reference, points })
}

/// The three standard references for a fitted sample: standard normal,
/// standard t with the fitted df, and the fully fitted t.
#[must_use]
pub fn qq_references(fit: &StudentTFit) -> [QqReference; 3] {
    [
        QqReference::StandardNormal,
        QqReference::StandardStudentT {
            df: fit.degrees_of_freedom,
        },
        QqReference::FittedStudentT {
            df: fit.degrees_of_freedom,
            location: fit.location,
            scale: fit.scale,
        },
    ]
}
