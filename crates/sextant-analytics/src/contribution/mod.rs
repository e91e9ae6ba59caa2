//! Contribution analysis for portfolios.
//!
//! Splits portfolio-level quantities across constituents:
//! - Return contribution (weighted arithmetic return sums)
//! - Risk contribution (Euler decomposition of portfolio volatility)
//! - Constituent correlation matrix
//!
//! # Example
//!
//! ```rust,ignore
//! use sextant_analytics::contribution::risk_contribution;
//!
//! let risk = risk_contribution(&panel, &definition)?;
//! for entry in risk.breakdown.top_contributors(3) {
//!     println!("{}: {:.2}% of risk", entry.label, entry.share * 100.0);
//! }
//! ```

mod correlation;
mod returns;
mod risk;

pub use correlation::*;
pub use returns::*;
pub use risk::*;

use serde::Serialize;
use sextant_core::InstrumentId;

use crate::error::{AnalyticsError, AnalyticsResult};

/// What a [`ContributionBreakdown`] decomposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContributionKind {
    /// Share of the arithmetic portfolio return.
    Return,
    /// Share of portfolio volatility.
    Risk,
}

impl std::fmt::Display for ContributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Return => write!(f, "return"),
            Self::Risk => write!(f, "risk"),
        }
    }
}

/// Contribution of a single constituent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionEntry {
    /// Constituent identifier.
    pub id: InstrumentId,

    /// Display label.
    pub label: String,

    /// Portfolio weight.
    pub weight: f64,

    /// Absolute contribution value.
    pub contribution: f64,

    /// Contribution as a fraction of the total (shares sum to 1).
    pub share: f64,
}

/// Per-constituent contributions, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionBreakdown {
    /// What is being decomposed.
    pub kind: ContributionKind,

    /// One entry per constituent.
    pub entries: Vec<ContributionEntry>,

    /// Sum of the absolute contributions; the share denominator.
    pub total: f64,
}

impl ContributionBreakdown {
    /// Builds a breakdown, normalizing contributions by their sum.
    ///
    /// A zero or non-finite sum leaves every share `NaN`.
    pub(crate) fn from_contributions(
        kind: ContributionKind,
        constituents: impl IntoIterator<Item = (InstrumentId, String, f64)>,
        contributions: &[f64],
    ) -> Self {
        let total: f64 = contributions.iter().sum();
        let usable = total != 0.0 && total.is_finite();

        let entries = constituents
            .into_iter()
            .zip(contributions)
            .map(|((id, label, weight), &contribution)| ContributionEntry {
                id,
                label,
                weight,
                contribution,
                share: if usable { contribution / total } else { f64::NAN },
            })
            .collect();

        Self {
            kind,
            entries,
            total,
        }
    }

    /// Shares in definition order.
    #[must_use]
    pub fn shares(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.share).collect()
    }

    /// Shares scaled to percent.
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.share * 100.0).collect()
    }

    /// Share of a single constituent.
    #[must_use]
    pub fn share_of(&self, id: &InstrumentId) -> Option<f64> {
        self.entries.iter().find(|e| &e.id == id).map(|e| e.share)
    }

    /// Sum of all shares; 1 for a usable breakdown.
    #[must_use]
    pub fn sum_of_shares(&self) -> f64 {
        self.entries.iter().map(|e| e.share).sum()
    }

    /// Returns true when the shares are undefined.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.entries.iter().any(|e| e.share.is_nan())
    }

    /// Fails with [`AnalyticsError::DegenerateInput`] if the shares are undefined.
    pub fn require_non_degenerate(&self) -> AnalyticsResult<&Self> {
        if self.is_degenerate() {
            return Err(AnalyticsError::degenerate(format!(
                "{} contribution shares are undefined (total = {})",
                self.kind, self.total
            )));
        }
        Ok(self)
    }

    /// Returns the top N contributors by absolute contribution.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&ContributionEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
        sorted.truncate(n);
        sorted
    }
}
