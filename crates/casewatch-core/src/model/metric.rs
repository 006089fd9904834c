use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CaseWatchError;

/// A named count tracked for every location
///
/// Variant order is the declaration order used everywhere metrics are listed:
/// table columns, prose sentences and card fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cases,
    Deaths,
    Serious,
    Critical,
    Recovered,
}

impl Metric {
    /// Every metric, in declaration order
    pub const ALL: [Metric; 5] = [
        Metric::Cases,
        Metric::Deaths,
        Metric::Serious,
        Metric::Critical,
        Metric::Recovered,
    ];

    /// Metrics every record schema carries
    pub const CORE: [Metric; 2] = [Metric::Cases, Metric::Deaths];

    /// Lowercase key used in configuration and JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
            Metric::Serious => "serious",
            Metric::Critical => "critical",
            Metric::Recovered => "recovered",
        }
    }

    /// Display label used for table headers and card fields
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cases => "Cases",
            Metric::Deaths => "Deaths",
            Metric::Serious => "Serious",
            Metric::Critical => "Critical",
            Metric::Recovered => "Recovered",
        }
    }

    pub fn is_core(&self) -> bool {
        Metric::CORE.contains(self)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = CaseWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CaseWatchError::UnknownValue {
                field: "metric".to_string(),
                value: s.to_string(),
            })
    }
}
