//! Portfolio definitions and metric settings.

use serde::{Deserialize, Serialize};

use super::InstrumentId;
use crate::error::{CoreError, CoreResult};

/// A weighted portfolio constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    /// Instrument identifier.
    pub id: InstrumentId,
    /// Human-readable label, used for reporting only.
    pub label: String,
    /// Static portfolio weight. Any finite real is allowed.
    pub weight: f64,
}

impl Constituent {
    /// Creates a constituent.
    pub fn new(id: impl Into<InstrumentId>, label: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
        }
    }
}

/// A fixed-weight portfolio and the benchmark it is measured against.
///
/// Weights are consumed as provided and are never renormalized; if they do
/// not sum to one, portfolio return magnitudes scale accordingly.
///
/// Deserialization goes through [`PortfolioDefinition::new`], so the same
/// validation applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PortfolioDefinitionRecord")]
pub struct PortfolioDefinition {
    constituents: Vec<Constituent>,
    benchmark: InstrumentId,
    benchmark_label: String,
}

/// Unvalidated serialized form of [`PortfolioDefinition`].
#[derive(Deserialize)]
struct PortfolioDefinitionRecord {
    constituents: Vec<Constituent>,
    benchmark: InstrumentId,
    benchmark_label: String,
}

impl TryFrom<PortfolioDefinitionRecord> for PortfolioDefinition {
    type Error = CoreError;

    fn try_from(record: PortfolioDefinitionRecord) -> CoreResult<Self> {
        Self::new(record.constituents, record.benchmark, record.benchmark_label)
    }
}

impl PortfolioDefinition {
    /// Creates a portfolio definition.
    ///
    /// Fails if there are no constituents, a constituent id repeats, or a
    /// weight is not finite.
    pub fn new(
        constituents: Vec<Constituent>,
        benchmark: impl Into<InstrumentId>,
        benchmark_label: impl Into<String>,
    ) -> CoreResult<Self> {
        if constituents.is_empty() {
            return Err(CoreError::invalid_portfolio("no constituents"));
        }
        for (i, c) in constituents.iter().enumerate() {
            if !c.weight.is_finite() {
                return Err(CoreError::invalid_portfolio(format!(
                    "weight for {} is not finite: {}",
                    c.id, c.weight
                )));
            }
            if constituents[..i].iter().any(|other| other.id == c.id) {
                return Err(CoreError::invalid_portfolio(format!(
                    "constituent {} listed twice",
                    c.id
                )));
            }
        }
        Ok(Self {
            constituents,
            benchmark: benchmark.into(),
            benchmark_label: benchmark_label.into(),
        })
    }

    /// Builds a definition from parallel id, label and weight lists.
    ///
    /// The three lists must have equal length.
    pub fn from_parts(
        ids: Vec<InstrumentId>,
        labels: Vec<String>,
        weights: Vec<f64>,
        benchmark: impl Into<InstrumentId>,
        benchmark_label: impl Into<String>,
    ) -> CoreResult<Self> {
        if labels.len() != ids.len() {
            return Err(CoreError::shape_mismatch("labels", ids.len(), labels.len()));
        }
        if weights.len() != ids.len() {
            return Err(CoreError::shape_mismatch("weights", ids.len(), weights.len()));
        }
        let constituents = ids
            .into_iter()
            .zip(labels)
            .zip(weights)
            .map(|((id, label), weight)| Constituent { id, label, weight })
            .collect();
        Self::new(constituents, benchmark, benchmark_label)
    }

    /// Constituents in definition order.
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Constituent identifiers in definition order.
    pub fn ids(&self) -> Vec<InstrumentId> {
        self.constituents.iter().map(|c| c.id.clone()).collect()
    }

    /// Constituent labels in definition order.
    pub fn labels(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.label.clone()).collect()
    }

    /// Weight vector in definition order.
    pub fn weights(&self) -> Vec<f64> {
        self.constituents.iter().map(|c| c.weight).collect()
    }

    /// Sum of weights.
    pub fn total_weight(&self) -> f64 {
        self.constituents.iter().map(|c| c.weight).sum()
    }

    /// Benchmark identifier.
    pub fn benchmark(&self) -> &InstrumentId {
        &self.benchmark
    }

    /// Benchmark label.
    pub fn benchmark_label(&self) -> &str {
        &self.benchmark_label
    }

    /// Label for an instrument, falling back to its identifier.
    pub fn label_for(&self, id: &InstrumentId) -> String {
        if id == &self.benchmark {
            return self.benchmark_label.clone();
        }
        self.constituents
            .iter()
            .find(|c| &c.id == id)
            .map_or_else(|| id.to_string(), |c| c.label.clone())
    }

    /// Every instrument the analysis needs: constituents, then the benchmark
    /// unless it is already a constituent.
    pub fn required_ids(&self) -> Vec<InstrumentId> {
        let mut ids = self.ids();
        if !ids.contains(&self.benchmark) {
            ids.push(self.benchmark.clone());
        }
        ids
    }
}

/// Settings for windowed and annualized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Trailing window length, in periods, for rolling metrics.
    pub rolling_window: usize,
    /// Number of periods per year, used for annualization.
    pub periods_per_year: u32,
}

impl MetricsConfig {
    /// Monthly data with a twelve-month window.
    pub const MONTHLY: Self = Self {
        rolling_window: 12,
        periods_per_year: 12,
    };

    /// Creates a config.
    #[must_use]
    pub fn new(rolling_window: usize, periods_per_year: u32) -> Self {
        Self {
            rolling_window,
            periods_per_year,
        }
    }

    /// Square root of the periods per year, the volatility scaling factor.
    pub fn annualization_factor(&self) -> f64 {
        f64::from(self.periods_per_year).sqrt()
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::MONTHLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> PortfolioDefinition {
        PortfolioDefinition::new(
            vec![
                Constituent::new(89996_u32, "VGT", 0.6),
                Constituent::new(90878_u32, "VTI", 0.4),
            ],
            12305_u32,
            "VOO",
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let p = sample();
        assert_eq!(p.weights(), vec![0.6, 0.4]);
        assert_eq!(p.labels(), vec!["VGT".to_string(), "VTI".to_string()]);
        assert_relative_eq!(p.total_weight(), 1.0);
        assert_eq!(p.label_for(&InstrumentId::from(12305_u32)), "VOO");
        assert_eq!(p.label_for(&InstrumentId::from(1_u32)), "1");
    }

    #[test]
    fn test_required_ids_appends_benchmark_once() {
        let p = sample();
        assert_eq!(p.required_ids().len(), 3);

        let overlapping = PortfolioDefinition::new(
            vec![Constituent::new("A", "A", 0.5), Constituent::new("B", "B", 0.5)],
            "A",
            "A",
        )
        .unwrap();
        assert_eq!(
            overlapping.required_ids(),
            vec![InstrumentId::from("A"), InstrumentId::from("B")]
        );
    }

    #[test]
    fn test_from_parts_shape_mismatch() {
        let result = PortfolioDefinition::from_parts(
            vec!["A".into(), "B".into()],
            vec!["A".into(), "B".into()],
            vec![1.0],
            "X",
            "X",
        );
        assert!(matches!(result, Err(CoreError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_rejects_bad_definitions() {
        assert!(PortfolioDefinition::new(vec![], "X", "X").is_err());
        assert!(PortfolioDefinition::new(vec![Constituent::new("A", "A", f64::NAN)], "X", "X")
            .is_err());
        assert!(PortfolioDefinition::new(
            vec![Constituent::new("A", "A", 0.5), Constituent::new("A", "A", 0.5)],
            "X",
            "X"
        )
        .is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: PortfolioDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());

        let duplicated = r#"{
            "constituents": [
                {"id": "A", "label": "A", "weight": 0.5},
                {"id": "A", "label": "A", "weight": 0.5}
            ],
            "benchmark": "X",
            "benchmark_label": "X"
        }"#;
        let err = serde_json::from_str::<PortfolioDefinition>(duplicated).unwrap_err();
        assert!(err.to_string().contains("listed twice"));

        let empty = r#"{"constituents": [], "benchmark": "X", "benchmark_label": "X"}"#;
        assert!(serde_json::from_str::<PortfolioDefinition>(empty).is_err());
    }

    #[test]
    fn test_weights_not_renormalized() {
        let p = PortfolioDefinition::new(vec![Constituent::new("A", "A", 2.5)], "X", "X").unwrap();
        assert_eq!(p.weights(), vec![2.5]);
    }

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.rolling_window, 12);
        assert_relative_eq!(config.annualization_factor(), 12.0_f64.sqrt());
    }
}
