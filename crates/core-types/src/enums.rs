use crate::structs::OwnerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse direction of sales activity, comparing the first and last week of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl Trend {
    /// A short human-readable label for reports and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
            Trend::InsufficientData => "Not enough data to determine trend",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which records an aggregate query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Only the records uploaded by one owner.
    Owner(OwnerId),
    /// Every record in the store, regardless of owner.
    Global,
}

impl RecordScope {
    /// Returns true if a record belonging to `owner` falls inside this scope.
    pub fn includes(&self, owner: OwnerId) -> bool {
        match self {
            RecordScope::Owner(scoped) => *scoped == owner,
            RecordScope::Global => true,
        }
    }
}
