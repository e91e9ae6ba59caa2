//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ConfigArgs};

/// Sextant - Portfolio performance and risk analytics CLI
#[derive(Parser)]
#[command(name = "sextant")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log analysis progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a portfolio against its benchmark from a return file
    Analyze(AnalyzeArgs),

    /// Show the effective portfolio configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
