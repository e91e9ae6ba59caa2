//! Panel projection: select and align the instruments an analysis needs.

use sextant_core::{CoreError, InstrumentId, PortfolioDefinition, ReturnPanel, ReturnSeries};

use crate::error::AnalyticsResult;

/// The aligned inputs of one analysis run.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    /// Constituent columns, in definition order.
    pub constituents: ReturnPanel,
    /// Benchmark returns on the same date axis.
    pub benchmark: ReturnSeries,
}

/// Restricts a panel to exactly `ids`, in the requested order.
///
/// The date axis is kept whole and ascending, including dates on which none
/// of the selected instruments is observed. Fails with
/// [`CoreError::InstrumentNotFound`] for the first id absent from the panel.
pub fn select_instruments(panel: &ReturnPanel, ids: &[InstrumentId]) -> AnalyticsResult<ReturnPanel> {
    let columns = ids
        .iter()
        .map(|id| {
            panel
                .column(id)
                .map(<[f64]>::to_vec)
                .ok_or_else(|| CoreError::not_found(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReturnPanel::new(panel.dates().to_vec(), ids.to_vec(), columns)?)
}

/// Selects the constituents and the benchmark for a portfolio definition.
pub fn portfolio_view(
    panel: &ReturnPanel,
    definition: &PortfolioDefinition,
) -> AnalyticsResult<PortfolioView> {
    // Validate every id up front so the error names the first missing one
    // in definition order, benchmark last.
    let required = select_instruments(panel, &definition.required_ids())?;
    let constituents = select_instruments(&required, &definition.ids())?;
    let benchmark = required.series(definition.benchmark())?;
    Ok(PortfolioView {
        constituents,
        benchmark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sextant_core::{Constituent, ReturnObservation};

    fn d(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 28).unwrap()
    }

    fn panel() -> ReturnPanel {
        ReturnPanel::from_observations(&[
            ReturnObservation::new(d(2), "B", 0.02),
            ReturnObservation::new(d(1), "A", 0.01),
            ReturnObservation::new(d(1), "B", 0.03),
            ReturnObservation::new(d(2), "A", -0.01),
            ReturnObservation::new(d(1), "IDX", 0.005),
            ReturnObservation::new(d(3), "C", 0.04),
        ])
        .unwrap()
    }

    #[test]
    fn test_select_reorders_columns() {
        let selected = select_instruments(&panel(), &["B".into(), "A".into()]).unwrap();

        assert_eq!(selected.ids(), &[InstrumentId::from("B"), InstrumentId::from("A")]);
        assert_eq!(selected.dates(), &[d(1), d(2), d(3)]);
        assert_eq!(selected.column_at(0)[0], 0.03);
        assert_eq!(selected.column_at(1)[1], -0.01);
        // Date 3 only has C observed; it stays on the axis
        assert!(selected.column_at(0)[2].is_nan());
    }

    #[test]
    fn test_select_missing_id_fails() {
        let err = select_instruments(&panel(), &["A".into(), "ZZZ".into()]).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("ZZZ"));
    }

    #[test]
    fn test_portfolio_view() {
        let definition = PortfolioDefinition::new(
            vec![Constituent::new("A", "Alpha", 0.5), Constituent::new("B", "Beta", 0.5)],
            "IDX",
            "Index",
        )
        .unwrap();

        let view = portfolio_view(&panel(), &definition).unwrap();

        assert_eq!(view.constituents.n_instruments(), 2);
        assert_eq!(view.benchmark.values()[0], 0.005);
        assert!(view.benchmark.values()[1].is_nan());
    }

    #[test]
    fn test_portfolio_view_missing_benchmark() {
        let definition =
            PortfolioDefinition::new(vec![Constituent::new("A", "Alpha", 1.0)], "SPX", "SPX")
                .unwrap();
        assert!(portfolio_view(&panel(), &definition).is_err());
    }
}
