//! Date-indexed return series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// An ordered sequence of (date, fractional return) pairs.
///
/// Dates are strictly increasing. Unobserved periods are stored as `NaN`
/// and are never coerced to zero; callers decide how to treat them.
///
/// The same shape carries derived outputs (cumulative return, drawdown,
/// rolling metrics), where `NaN` marks dates on which the metric is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Creates a series, checking that dates are strictly increasing and that
    /// there is one value per date.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> CoreResult<Self> {
        if dates.len() != values.len() {
            return Err(CoreError::shape_mismatch(
                "series values",
                dates.len(),
                values.len(),
            ));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::invalid_series(format!(
                "dates must be strictly increasing ({} followed by {})",
                w[0], w[1]
            )));
        }
        Ok(Self { dates, values })
    }

    /// Creates a series from (date, value) pairs in date order.
    pub fn from_pairs<I>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Creates an empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns a new series on the same date axis with different values.
    pub fn with_values(&self, values: Vec<f64>) -> CoreResult<Self> {
        if values.len() != self.dates.len() {
            return Err(CoreError::shape_mismatch(
                "series values",
                self.dates.len(),
                values.len(),
            ));
        }
        Ok(Self {
            dates: self.dates.clone(),
            values,
        })
    }

    /// Number of dates on the axis, observed or not.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The raw values, `NaN` where unobserved.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over all (date, value) pairs, including unobserved ones.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Iterates over observed (non-`NaN`) pairs only.
    pub fn observed(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.iter().filter(|(_, v)| !v.is_nan())
    }

    /// Observed values in date order.
    pub fn observed_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| !v.is_nan()).collect()
    }

    /// Number of observed periods.
    pub fn observed_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Value on a given date, if the date is on the axis.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// First date on the axis.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last date on the axis.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let result = ReturnSeries::new(vec![d(2024, 2, 29), d(2024, 1, 31)], vec![0.0, 0.0]);
        assert!(matches!(result, Err(CoreError::InvalidSeries { .. })));

        let result = ReturnSeries::new(vec![d(2024, 1, 31), d(2024, 1, 31)], vec![0.0, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = ReturnSeries::new(vec![d(2024, 1, 31)], vec![0.0, 0.0]);
        assert!(matches!(result, Err(CoreError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_missing_values_are_kept() {
        let series = ReturnSeries::new(
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 29)],
            vec![0.01, f64::NAN, -0.02],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.observed_count(), 2);
        assert_eq!(series.observed_values(), vec![0.01, -0.02]);
        assert!(series.get(d(2024, 2, 29)).unwrap().is_nan());
        assert_eq!(series.get(d(2024, 4, 30)), None);
    }

    #[test]
    fn test_with_values_keeps_axis() {
        let series = ReturnSeries::from_pairs([(d(2024, 1, 31), 0.01), (d(2024, 2, 29), 0.02)])
            .unwrap();
        let doubled = series
            .with_values(series.values().iter().map(|v| v * 2.0).collect())
            .unwrap();
        assert_eq!(doubled.dates(), series.dates());
        assert!(series.with_values(vec![1.0]).is_err());
    }
}
