//! Analyze command implementation.
//!
//! Loads a long-format return file, runs the full analysis and renders the
//! report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style, Tabled};

use sextant_analytics::performance::SummaryStatistics;
use sextant_analytics::{analyze_observations, AnalysisReport};

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::loader::{load_returns, ColumnNames};
use crate::output::{
    format_number, format_percent, format_signed_percent, print_csv, print_header, print_json,
    print_table, print_warning, KeyValue,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Long-format return file (CSV with date, id and return columns)
    #[arg(short, long)]
    pub returns: PathBuf,

    /// Portfolio configuration (.toml or .json). Defaults to the six-fund ETF portfolio.
    #[arg(short, long, env = "SEXTANT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the date column
    #[arg(long, default_value = "date")]
    pub date_column: String,

    /// Name of the instrument id column
    #[arg(long, default_value = "PERMNO")]
    pub id_column: String,

    /// Name of the return column
    #[arg(long, default_value = "RET")]
    pub return_column: String,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let definition = config.to_definition()?;

    let columns = ColumnNames {
        date: args.date_column,
        id: args.id_column,
        value: args.return_column,
    };
    let observations = load_returns(&args.returns, &columns)?;

    let report = analyze_observations(&observations, &definition, &config.metrics_config())?;

    match format {
        OutputFormat::Table => print_report(&config.name, &report)?,
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&period_rows(&report))?,
    }

    Ok(())
}

// =============================================================================
// TABLE OUTPUT
// =============================================================================

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Portfolio")]
    portfolio: String,
    #[tabled(rename = "Benchmark")]
    benchmark: String,
}

#[derive(Tabled)]
struct AnnualRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Portfolio")]
    portfolio: String,
    #[tabled(rename = "Benchmark")]
    benchmark: String,
}

#[derive(Tabled)]
struct ContributionRow {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Return Share")]
    return_share: String,
    #[tabled(rename = "Risk Share")]
    risk_share: String,
}

fn print_report(name: &str, report: &AnalysisReport) -> Result<()> {
    print_header(&format!("{name} vs {}", report.benchmark_label));
    let period = match (report.period_start, report.period_end) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => "empty".to_string(),
    };
    print_table(&[
        KeyValue::new("Period", period),
        KeyValue::new("Periods", report.portfolio_returns.len().to_string()),
        KeyValue::new("Constituents", report.constituents.len().to_string()),
        KeyValue::new(
            "Rolling Window",
            report.metrics_config.rolling_window.to_string(),
        ),
    ])?;

    print_header("Performance Summary");
    print_table(&summary_rows(&report.portfolio.summary, &report.benchmark.summary))?;

    print_header("Annual Returns");
    let annual: Vec<AnnualRow> = report
        .portfolio
        .annual_returns
        .iter()
        .map(|p| AnnualRow {
            year: p.year,
            portfolio: format_signed_percent(p.value),
            benchmark: report
                .benchmark
                .annual_returns
                .iter()
                .find(|b| b.year == p.year)
                .map_or_else(|| "n/a".to_string(), |b| format_signed_percent(b.value)),
        })
        .collect();
    print_table(&annual)?;
    if let (Some(best), Some(worst)) = (report.best_year(), report.worst_year()) {
        println!(
            "Best year: {} ({})   Worst year: {} ({})",
            best.year,
            format_signed_percent(best.value),
            worst.year,
            format_signed_percent(worst.value)
        );
    }

    print_header("Contribution");
    let risk = &report.risk_contribution.breakdown;
    let rows: Vec<ContributionRow> = report
        .return_contribution
        .breakdown
        .entries
        .iter()
        .map(|e| ContributionRow {
            fund: e.label.clone(),
            weight: format_percent(e.weight),
            return_share: format_percent(e.share),
            risk_share: format_percent(risk.share_of(&e.id).unwrap_or(f64::NAN)),
        })
        .collect();
    print_table(&rows)?;
    if report.risk_contribution.is_degenerate() {
        print_warning("Portfolio volatility is zero or undefined; risk shares are not available");
    }

    print_header("Correlation");
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(String::new()).chain(report.correlation.labels.iter().cloned()),
    );
    for (label, row) in report.correlation.labels.iter().zip(&report.correlation.values) {
        builder.push_record(
            std::iter::once(label.clone()).chain(row.iter().map(|v| format_number(*v, 2))),
        );
    }
    println!("{}", builder.build().with(Style::rounded()));

    print_header("Distribution Diagnostics");
    let diagnostics = &report.diagnostics;
    let mut rows = Vec::new();
    match &diagnostics.student_t {
        Some(fit) => {
            rows.push(KeyValue::new(
                "t Degrees of Freedom",
                format_number(fit.degrees_of_freedom, 2),
            ));
            rows.push(KeyValue::new("t Location", format_number(fit.location, 5)));
            rows.push(KeyValue::new("t Scale", format_number(fit.scale, 5)));
        }
        None => rows.push(KeyValue::new("Student-t Fit", "n/a")),
    }
    for test in [&diagnostics.paired_t, &diagnostics.kolmogorov_smirnov] {
        rows.push(KeyValue::new(
            format!("{} statistic", test.kind),
            format_number(test.statistic, 4),
        ));
        rows.push(KeyValue::new(
            format!("{} p-value", test.kind),
            format_number(test.p_value, 4),
        ));
    }
    print_table(&rows)?;

    Ok(())
}

fn summary_rows(p: &SummaryStatistics, b: &SummaryStatistics) -> Vec<SummaryRow> {
    vec![
        signed_row("Total Return", p.total_return, b.total_return),
        signed_row("Annualized Return", p.annualized_return, b.annualized_return),
        SummaryRow {
            metric: "Annualized Volatility",
            portfolio: format_percent(p.annualized_volatility),
            benchmark: format_percent(b.annualized_volatility),
        },
        SummaryRow {
            metric: "Sharpe Ratio",
            portfolio: format_number(p.sharpe_ratio, 3),
            benchmark: format_number(b.sharpe_ratio, 3),
        },
        signed_row("Max Drawdown", p.max_drawdown, b.max_drawdown),
        signed_row("Best Period", p.best_period, b.best_period),
        signed_row("Worst Period", p.worst_period, b.worst_period),
        SummaryRow {
            metric: "Observed Periods",
            portfolio: p.observed.to_string(),
            benchmark: b.observed.to_string(),
        },
    ]
}

fn signed_row(metric: &'static str, portfolio: f64, benchmark: f64) -> SummaryRow {
    SummaryRow {
        metric,
        portfolio: format_signed_percent(portfolio),
        benchmark: format_signed_percent(benchmark),
    }
}

// =============================================================================
// CSV OUTPUT
// =============================================================================

/// One row per date; undefined values are left empty.
#[derive(Serialize)]
struct PeriodRow {
    date: String,
    portfolio_return: Option<f64>,
    benchmark_return: Option<f64>,
    portfolio_cumulative: Option<f64>,
    benchmark_cumulative: Option<f64>,
    portfolio_drawdown: Option<f64>,
    benchmark_drawdown: Option<f64>,
    rolling_volatility: Option<f64>,
    rolling_sharpe: Option<f64>,
}

fn period_rows(report: &AnalysisReport) -> Vec<PeriodRow> {
    let defined = |v: f64| (!v.is_nan()).then_some(v);
    let at = |series: &sextant_core::ReturnSeries, i: usize| defined(series.values()[i]);

    report
        .portfolio_returns
        .dates()
        .iter()
        .enumerate()
        .map(|(i, date)| PeriodRow {
            date: date.to_string(),
            portfolio_return: at(&report.portfolio_returns, i),
            benchmark_return: at(&report.benchmark_returns, i),
            portfolio_cumulative: at(&report.portfolio.cumulative_return, i),
            benchmark_cumulative: at(&report.benchmark.cumulative_return, i),
            portfolio_drawdown: at(&report.portfolio.drawdown, i),
            benchmark_drawdown: at(&report.benchmark.drawdown, i),
            rolling_volatility: at(&report.portfolio.rolling_volatility, i),
            rolling_sharpe: at(&report.portfolio.rolling_sharpe, i),
        })
        .collect()
}
