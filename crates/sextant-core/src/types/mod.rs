//! Domain types for portfolio return analytics.

mod instrument;
mod panel;
mod portfolio;
mod series;

pub use instrument::InstrumentId;
pub use panel::{ReturnObservation, ReturnPanel};
pub use portfolio::{Constituent, MetricsConfig, PortfolioDefinition};
pub use series::ReturnSeries;
