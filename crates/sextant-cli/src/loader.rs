//! Long-format return file loading.
//!
//! Reads a CSV with one row per (date, instrument) and converts it into
//! [`ReturnObservation`]s. Return cells that are not numbers (CRSP letter
//! codes such as `B` or `C`, blanks) become unobserved periods.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use sextant_core::ReturnObservation;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// Names of the three columns the loader reads.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    /// Period date column.
    pub date: String,
    /// Instrument identifier column.
    pub id: String,
    /// Fractional return column.
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            id: "PERMNO".to_string(),
            value: "RET".to_string(),
        }
    }
}

/// Reads every row of a long-format return file.
pub fn load_returns(path: &Path, columns: &ColumnNames) -> CliResult<Vec<ReturnObservation>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();

    let date_idx = column_index(&headers, &columns.date, path)?;
    let id_idx = column_index(&headers, &columns.id, path)?;
    let value_idx = column_index(&headers, &columns.value, path)?;

    let mut observations = Vec::new();
    let mut unobserved = 0usize;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        let date_text = record.get(date_idx).unwrap_or_default();
        let date = parse_date(date_text).ok_or_else(|| CliError::InvalidDate {
            value: date_text.to_string(),
            line,
        })?;
        let id = record.get(id_idx).unwrap_or_default();

        match parse_return(record.get(value_idx).unwrap_or_default()) {
            Some(value) => observations.push(ReturnObservation::new(date, id, value)),
            None => {
                unobserved += 1;
                observations.push(ReturnObservation::missing(date, id));
            }
        }
    }

    if observations.is_empty() {
        return Err(CliError::EmptyInput(path.to_path_buf()));
    }
    if unobserved > 0 {
        warn!(unobserved, "Non-numeric return cells treated as unobserved");
    }
    debug!(rows = observations.len(), path = %path.display(), "Loaded return file");
    Ok(observations)
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> CliResult<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| CliError::MissingColumn {
            column: name.to_string(),
            path: PathBuf::from(path),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })
}

/// Parses `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .ok()
}

/// Parses a finite return; anything else is unobserved.
pub fn parse_return(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
