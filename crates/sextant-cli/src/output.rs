//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a fraction as a percentage; undefined values print as `n/a`.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", value * 100.0)
    }
}

/// Formats a plain number; undefined values print as `n/a`.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.precision$}")
    }
}

/// Formats a fraction as a percentage, green when positive and red when negative.
pub fn format_signed_percent(value: f64) -> String {
    let text = format_percent(value);
    if value > 0.0 {
        text.green().to_string()
    } else if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
