//! Instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a tradable instrument (PERMNO, ticker, internal ID).
///
/// Numeric codes are stored in their decimal text form, so `InstrumentId::from(12305)`
/// and `InstrumentId::from("12305")` are equal.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create a new instrument ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u32> for InstrumentId {
    fn from(code: u32) -> Self {
        Self(code.to_string())
    }
}

impl From<u64> for InstrumentId {
    fn from(code: u64) -> Self {
        Self(code.to_string())
    }
}
