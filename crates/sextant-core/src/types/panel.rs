//! Return panels: several instruments on one date axis.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{InstrumentId, ReturnSeries};
use crate::error::{CoreError, CoreResult};

/// One row of a long-format return table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    /// Period end date.
    pub date: NaiveDate,
    /// Instrument identifier.
    pub instrument: InstrumentId,
    /// Fractional return for the period, `None` when unobserved.
    pub value: Option<f64>,
}

impl ReturnObservation {
    /// Creates an observed return.
    pub fn new(date: NaiveDate, instrument: impl Into<InstrumentId>, value: f64) -> Self {
        Self {
            date,
            instrument: instrument.into(),
            value: Some(value),
        }
    }

    /// Creates an unobserved placeholder row.
    pub fn missing(date: NaiveDate, instrument: impl Into<InstrumentId>) -> Self {
        Self {
            date,
            instrument: instrument.into(),
            value: None,
        }
    }
}

/// Return series for several instruments aligned on a shared date axis.
///
/// Columns are stored in a fixed instrument order. Every column has exactly
/// one value per date; dates on which an instrument has no observation hold `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPanel {
    dates: Vec<NaiveDate>,
    ids: Vec<InstrumentId>,
    columns: Vec<Vec<f64>>,
}

impl ReturnPanel {
    /// Creates a panel from its parts, validating the alignment invariant.
    pub fn new(
        dates: Vec<NaiveDate>,
        ids: Vec<InstrumentId>,
        columns: Vec<Vec<f64>>,
    ) -> CoreResult<Self> {
        if ids.len() != columns.len() {
            return Err(CoreError::shape_mismatch(
                "panel columns",
                ids.len(),
                columns.len(),
            ));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::invalid_series(format!(
                "panel dates must be strictly increasing ({} followed by {})",
                w[0], w[1]
            )));
        }
        for (id, column) in ids.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(CoreError::shape_mismatch(
                    format!("panel column {id}"),
                    dates.len(),
                    column.len(),
                ));
            }
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = ids.iter().find(|id| !seen.insert(*id)) {
            return Err(CoreError::invalid_series(format!(
                "instrument {dup} appears twice in panel"
            )));
        }
        Ok(Self {
            dates,
            ids,
            columns,
        })
    }

    /// Pivots a long table into a panel.
    ///
    /// The date axis is the sorted union of every observation date. Columns
    /// appear in order of first appearance in the table. Non-finite values are
    /// treated as unobserved. A repeated (date, instrument) pair is an error.
    pub fn from_observations(observations: &[ReturnObservation]) -> CoreResult<Self> {
        let dates: Vec<NaiveDate> = observations
            .iter()
            .map(|o| o.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let date_index: HashMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut ids: Vec<InstrumentId> = Vec::new();
        let mut column_index: HashMap<&InstrumentId, usize> = HashMap::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut filled: Vec<Vec<bool>> = Vec::new();

        for obs in observations {
            let col = *column_index.entry(&obs.instrument).or_insert_with(|| {
                ids.push(obs.instrument.clone());
                columns.push(vec![f64::NAN; dates.len()]);
                filled.push(vec![false; dates.len()]);
                columns.len() - 1
            });
            let row = date_index[&obs.date];
            if filled[col][row] {
                return Err(CoreError::DuplicateObservation {
                    id: obs.instrument.to_string(),
                    date: obs.date,
                });
            }
            filled[col][row] = true;
            columns[col][row] = obs.value.filter(|v| v.is_finite()).unwrap_or(f64::NAN);
        }

        Self::new(dates, ids, columns)
    }

    /// The shared date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Instrument identifiers in column order.
    pub fn ids(&self) -> &[InstrumentId] {
        &self.ids
    }

    /// Number of instruments.
    pub fn n_instruments(&self) -> usize {
        self.ids.len()
    }

    /// Number of dates.
    pub fn n_periods(&self) -> usize {
        self.dates.len()
    }

    /// Column position of an instrument.
    pub fn position(&self, id: &InstrumentId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// Returns true if the instrument is present.
    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.position(id).is_some()
    }

    /// Raw column for an instrument.
    pub fn column(&self, id: &InstrumentId) -> Option<&[f64]> {
        self.position(id).map(|idx| self.columns[idx].as_slice())
    }

    /// Column by position.
    pub fn column_at(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }

    /// All columns in instrument order.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Values of every instrument on the date at `row`.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[row]).collect()
    }

    /// One instrument as a [`ReturnSeries`] on the panel's date axis.
    pub fn series(&self, id: &InstrumentId) -> CoreResult<ReturnSeries> {
        let column = self.column(id).ok_or_else(|| CoreError::not_found(id))?;
        ReturnSeries::new(self.dates.clone(), column.to_vec())
    }
}
