//! Calendar-year returns.

use chrono::Datelike;
use serde::Serialize;
use sextant_core::ReturnSeries;

/// Compounded return for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualReturn {
    /// Calendar year.
    pub year: i32,
    /// `prod(1 + r) - 1` over the observed periods of the year.
    pub value: f64,
    /// Number of observed periods that went into `value`.
    pub observations: usize,
}

/// Best and worst calendar years of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearExtremes {
    /// Year with the highest annual return.
    pub best: AnnualReturn,
    /// Year with the lowest annual return.
    pub worst: AnnualReturn,
}

/// Groups a series by calendar year and compounds the observed returns.
///
/// Partial years give partial values. A year present on the date axis with
/// no observed value at all is `NaN`.
#[must_use]
pub fn annual_returns(returns: &ReturnSeries) -> Vec<AnnualReturn> {
    let mut years: Vec<AnnualReturn> = Vec::new();

    for (date, r) in returns.iter() {
        let year = date.year();
        if years.last().map_or(true, |last| last.year != year) {
            years.push(AnnualReturn {
                year,
                value: 1.0,
                observations: 0,
            });
        }
        if let Some(current) = years.last_mut() {
            if !r.is_nan() {
                current.value *= 1.0 + r;
                current.observations += 1;
            }
        }
    }

    for year in &mut years {
        year.value = if year.observations == 0 {
            f64::NAN
        } else {
            year.value - 1.0
        };
    }
    years
}

/// Highest and lowest annual return, ignoring `NaN` years.
///
/// Ties keep the earliest year. `None` when no year has a value.
#[must_use]
pub fn best_and_worst_years(years: &[AnnualReturn]) -> Option<YearExtremes> {
    let mut valued = years.iter().filter(|y| !y.value.is_nan());
    let first = *valued.next()?;

    let (best, worst) = valued.fold((first, first), |(best, worst), &y| {
        (
            if y.value > best.value { y } else { best },
            if y.value < worst.value { y } else { worst },
        )
    });
    Some(YearExtremes { best, worst })
}
