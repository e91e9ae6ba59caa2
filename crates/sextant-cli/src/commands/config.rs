//! Config command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{
    format_percent, print_header, print_info, print_json, print_output, print_table, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Portfolio configuration (.toml or .json). Defaults to the six-fund ETF portfolio.
    #[arg(short, long, env = "SEXTANT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Serialize, Tabled)]
struct ConstituentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Weight")]
    #[serde(skip)]
    weight_display: String,
    #[tabled(skip)]
    weight: f64,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if format == OutputFormat::Json {
        return print_json(&config);
    }

    let rows: Vec<ConstituentRow> = config
        .constituents
        .iter()
        .map(|c| ConstituentRow {
            id: c.id.clone(),
            label: c.display_label().to_string(),
            weight_display: format_percent(c.weight),
            weight: c.weight,
        })
        .collect();

    if format == OutputFormat::Table {
        if args.config.is_none() {
            print_info("No configuration file given; showing the built-in defaults");
        }
        print_header(&config.name);
        let mut summary = Vec::new();
        if let Some(description) = &config.description {
            summary.push(KeyValue::new("Description", description.clone()));
        }
        summary.push(KeyValue::new(
            "Benchmark",
            format!("{} ({})", config.benchmark.display_label(), config.benchmark.id),
        ));
        summary.push(KeyValue::new(
            "Rolling Window",
            config.metrics.rolling_window.to_string(),
        ));
        summary.push(KeyValue::new(
            "Periods per Year",
            config.metrics.periods_per_year.to_string(),
        ));
        summary.push(KeyValue::new(
            "Total Weight",
            format_percent(config.total_weight()),
        ));
        print_table(&summary)?;

        print_header("Constituents");
    }

    print_output(&rows, format)
}
