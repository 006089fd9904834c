use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metric::Metric;

/// One location's state as reported by the record source in a single poll
///
/// Metric values are kept as the raw display strings the source produced
/// (`"3,000"`, `""`, `"N/A"`); they are only turned into counts by
/// [`crate::normalize::normalize_count`] when deltas are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Location name, the identity of the record within a snapshot
    pub location: String,

    /// Raw metric values keyed by metric; absent keys are not part of this record's schema
    #[serde(default)]
    pub metrics: BTreeMap<Metric, String>,

    /// Free-text notes (empty when the source has none)
    #[serde(default)]
    pub notes: String,

    /// Link to the upstream source for this location, if any
    #[serde(default)]
    pub source: Option<String>,
}

impl Record {
    /// Create a record with no metrics, notes or source
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            metrics: BTreeMap::new(),
            notes: String::new(),
            source: None,
        }
    }

    /// Builder: set a raw metric value
    pub fn with_metric(mut self, metric: Metric, raw: impl Into<String>) -> Self {
        self.metrics.insert(metric, raw.into());
        self
    }

    /// Builder: set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builder: set source link
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Raw value for a metric, if this record carries it
    pub fn raw(&self, metric: Metric) -> Option<&str> {
        self.metrics.get(&metric).map(String::as_str)
    }
}
