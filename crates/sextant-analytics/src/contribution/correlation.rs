//! Constituent correlation matrix.

use serde::Serialize;
use sextant_core::{InstrumentId, PortfolioDefinition, ReturnPanel};
use sextant_math::linear_algebra;

use crate::error::AnalyticsResult;
use crate::panel::select_instruments;

/// Pairwise-complete Pearson correlations among constituents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Row and column identifiers, in definition order.
    pub ids: Vec<InstrumentId>,
    /// Display labels matching `ids`.
    pub labels: Vec<String>,
    /// Row-major correlation values; `NaN` where undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two constituents, if both are present.
    #[must_use]
    pub fn get(&self, a: &InstrumentId, b: &InstrumentId) -> Option<f64> {
        let i = self.ids.iter().position(|id| id == a)?;
        let j = self.ids.iter().position(|id| id == b)?;
        Some(self.values[i][j])
    }
}

/// Correlation matrix of the definition's constituents.
pub fn correlation_matrix(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
) -> AnalyticsResult<CorrelationMatrix> {
    let constituents = select_instruments(panel, &definition.ids())?;
    let corr = linear_algebra::correlation_matrix(constituents.columns())?;

    let values: Vec<Vec<f64>> = corr
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();

    Ok(CorrelationMatrix {
        ids: definition.ids(),
        labels: definition.labels(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use sextant_core::{Constituent, ReturnObservation};

    #[test]
    fn test_correlation_matrix() {
        let mut obs = Vec::new();
        let a = [0.01, 0.02, -0.01, 0.03];
        for (i, x) in a.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2024, i as u32 + 1, 28).unwrap();
            obs.push(ReturnObservation::new(date, "A", *x));
            obs.push(ReturnObservation::new(date, "B", 2.0 * x));
            obs.push(ReturnObservation::new(date, "C", -x));
        }
        let panel = ReturnPanel::from_observations(&obs).unwrap();
        let definition = PortfolioDefinition::new(
            vec![
                Constituent::new("A", "Alpha", 0.4),
                Constituent::new("B", "Beta", 0.4),
                Constituent::new("C", "Gamma", 0.2),
            ],
            "IDX",
            "Index",
        )
        .unwrap();

        let corr = correlation_matrix(&panel, &definition).unwrap();

        assert_eq!(corr.labels, vec!["Alpha", "Beta", "Gamma"]);
        assert_relative_eq!(corr.values[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(corr.get(&"A".into(), &"B".into()).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(corr.values[2][0], -1.0, epsilon = 1e-12);
        assert_eq!(corr.values[1][2], corr.values[2][1]);
        assert!(corr.get(&"A".into(), &"Z".into()).is_none());
    }
}
