//! CLI command implementations.

pub mod analyze;
pub mod config;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;

use std::path::Path;

use sextant_config::AnalysisConfig;
use tracing::info;

use crate::error::CliResult;

/// Loads the configuration file if one is given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::from_file(path)?;
            info!(name = %config.name, path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}
