//! Sextant CLI - Command-line interface for portfolio performance analytics.
//!
//! # Usage
//!
//! ```bash
//! # Analyze the default six-fund portfolio from a CRSP monthly extract
//! sextant analyze --returns crsp_monthly.csv
//!
//! # Use a custom portfolio and emit the full report as JSON
//! sextant --format json analyze --returns returns.csv --config portfolio.toml
//!
//! # Show the effective configuration
//! sextant config --config portfolio.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod loader;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let default_filter = if cli.verbose {
        "info,sextant_analytics=debug,sextant=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
