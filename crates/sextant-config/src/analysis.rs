//! Analysis configuration types.
//!
//! An [`AnalysisConfig`] names the portfolio constituents, their weights, the
//! benchmark, and the settings for windowed metrics. It is plain data: load it
//! from a file, validate it, then convert it into the core types the analytics
//! engine consumes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use sextant_core::{Constituent, MetricsConfig, PortfolioDefinition};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// ANALYSIS CONFIGURATION
// =============================================================================

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Configuration name.
    pub name: String,

    /// Description of this configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Portfolio constituents, in reporting order.
    pub constituents: Vec<ConstituentConfig>,

    /// Benchmark the portfolio is measured against.
    pub benchmark: BenchmarkConfig,

    /// Windowed and annualized metric settings.
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// One weighted constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituentConfig {
    /// Instrument identifier as it appears in the return data.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display label; defaults to the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Static portfolio weight.
    pub weight: f64,
}

impl ConstituentConfig {
    /// Creates a constituent entry.
    pub fn new(id: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            weight,
        }
    }

    /// The label, or the identifier if none is set.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// The benchmark instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Instrument identifier as it appears in the return data.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display label; defaults to the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BenchmarkConfig {
    /// The label, or the identifier if none is set.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Settings for rolling and annualized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Trailing window length in periods.
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,

    /// Periods per year used for annualization.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

fn default_rolling_window() -> usize {
    12
}

fn default_periods_per_year() -> u32 {
    12
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            rolling_window: default_rolling_window(),
            periods_per_year: default_periods_per_year(),
        }
    }
}

impl From<MetricsSettings> for MetricsConfig {
    fn from(settings: MetricsSettings) -> Self {
        MetricsConfig::new(settings.rolling_window, settings.periods_per_year)
    }
}

/// Accepts identifiers written either as strings or as integers, so CRSP
/// PERMNOs can be written bare in TOML and JSON.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// =============================================================================
// CONSTRUCTION AND LOADING
// =============================================================================

impl Default for AnalysisConfig {
    /// Six Vanguard sector ETFs against the S&P 500 ETF, keyed by CRSP PERMNO.
    fn default() -> Self {
        Self {
            name: "Sector ETF Portfolio".to_string(),
            description: Some("Six-fund Vanguard ETF portfolio against the S&P 500".to_string()),
            constituents: vec![
                ConstituentConfig::new("89996", "VGT", 0.30),
                ConstituentConfig::new("90878", "VTI", 0.20),
                ConstituentConfig::new("89997", "VAW", 0.15),
                ConstituentConfig::new("91952", "BND", 0.15),
                ConstituentConfig::new("89998", "VPU", 0.10),
                ConstituentConfig::new("90347", "VDE", 0.10),
            ],
            benchmark: BenchmarkConfig {
                id: "12305".to_string(),
                label: Some("VOO".to_string()),
            },
            metrics: MetricsSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates a configuration, choosing the format from the
    /// file extension (`.toml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the rolling window.
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.metrics.rolling_window = window;
        self
    }

    /// Sum of constituent weights.
    pub fn total_weight(&self) -> f64 {
        self.constituents.iter().map(|c| c.weight).sum()
    }

    /// Converts into the core portfolio definition.
    pub fn to_definition(&self) -> ConfigResult<PortfolioDefinition> {
        let constituents = self
            .constituents
            .iter()
            .map(|c| Constituent::new(c.id.as_str(), c.display_label(), c.weight))
            .collect();
        Ok(PortfolioDefinition::new(
            constituents,
            self.benchmark.id.as_str(),
            self.benchmark.display_label(),
        )?)
    }

    /// Converts into the core metric settings.
    pub fn metrics_config(&self) -> MetricsConfig {
        self.metrics.into()
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.constituents.is_empty() {
            errors.push(ValidationError::with_rule(
                "constituents",
                "At least one constituent is required",
                "non_empty",
            ));
        }

        let mut seen = HashSet::new();
        for (i, c) in self.constituents.iter().enumerate() {
            if c.id.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("constituents[{i}].id"),
                    "Identifier cannot be empty",
                ));
            } else if !seen.insert(c.id.as_str()) {
                errors.push(ValidationError::with_rule(
                    format!("constituents[{i}].id"),
                    format!("Duplicate constituent '{}'", c.id),
                    "unique_ids",
                ));
            }
            if !c.weight.is_finite() {
                errors.push(ValidationError::with_rule(
                    format!("constituents[{i}].weight"),
                    format!("Weight must be finite, got {}", c.weight),
                    "finite_weight",
                ));
            }
        }

        if self.benchmark.id.trim().is_empty() {
            errors.push(ValidationError::new("benchmark.id", "Identifier cannot be empty"));
        }

        if self.metrics.rolling_window < 2 {
            errors.push(ValidationError::with_rule(
                "metrics.rolling_window",
                format!(
                    "Rolling window must be at least 2 periods, got {}",
                    self.metrics.rolling_window
                ),
                "min_window",
            ));
        }

        if self.metrics.periods_per_year == 0 {
            errors.push(ValidationError::with_rule(
                "metrics.periods_per_year",
                "Periods per year must be at least 1",
                "positive_periods",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.constituents.len(), 6);
        assert!((config.total_weight() - 1.0).abs() < 1e-12);
        assert_eq!(config.benchmark.id, "12305");
        assert_eq!(config.metrics_config(), MetricsConfig::MONTHLY);
    }

    #[test]
    fn test_to_definition() {
        let definition = AnalysisConfig::default().to_definition().unwrap();
        assert_eq!(definition.labels()[0], "VGT");
        assert_eq!(definition.benchmark().as_str(), "12305");
        assert_eq!(definition.benchmark_label(), "VOO");
    }

    #[test]
    fn test_validation_collects_every_error() {
        let mut config = AnalysisConfig::default();
        config.name = String::new();
        config.constituents[1].id = "89996".to_string();
        config.constituents[2].weight = f64::NAN;
        config.metrics.rolling_window = 1;
        config.metrics.periods_per_year = 0;

        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "constituents[1].id",
                "constituents[2].weight",
                "metrics.rolling_window",
                "metrics.periods_per_year",
            ]
        );
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_toml_with_numeric_ids() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            name = "Two funds"

            [[constituents]]
            id = 89996
            label = "VGT"
            weight = 0.6

            [[constituents]]
            id = "BND"
            weight = 0.4

            [benchmark]
            id = 12305
            "#,
        )
        .unwrap();

        assert_eq!(config.constituents[0].id, "89996");
        assert_eq!(config.constituents[1].display_label(), "BND");
        assert_eq!(config.benchmark.display_label(), "12305");
        assert_eq!(config.metrics, MetricsSettings::default());
    }

    #[test]
    fn test_json_partial_metrics() {
        let config = AnalysisConfig::from_json_str(
            r#"{
                "name": "One fund",
                "constituents": [{"id": "A", "weight": 1.0}],
                "benchmark": {"id": "IDX", "label": "Index"},
                "metrics": {"rolling_window": 6}
            }"#,
        )
        .unwrap();
        assert_eq!(config.metrics.rolling_window, 6);
        assert_eq!(config.metrics.periods_per_year, 12);
    }

    #[test]
    fn test_invalid_file_content_is_rejected() {
        assert!(matches!(
            AnalysisConfig::from_json_str("{ not json"),
            Err(ConfigError::Deserialization(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("name = \"x\"\nconstituents = []\n[benchmark]\nid = \"B\""),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AnalysisConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }
}
