//! Delta output types.
//!
//! Metric changes are kept in a `BTreeMap` keyed by [`Metric`], so iteration
//! follows metric declaration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Metric;

/// Before/after counts for one metric of one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricChange {
    /// Count in the earliest occurrence (0 for a first appearance)
    pub before: u64,
    /// Count in the latest occurrence
    pub after: u64,
}

impl MetricChange {
    pub fn new(before: u64, after: u64) -> Self {
        Self { before, after }
    }

    /// Signed difference `after - before`
    pub fn diff(&self) -> i128 {
        i128::from(self.after) - i128::from(self.before)
    }

    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

/// The before/after comparison for one location between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Location the delta describes
    pub location: String,
    /// Per-metric change; only metrics the latest record carries are present
    pub metrics: BTreeMap<Metric, MetricChange>,
    /// Notes from the latest occurrence
    pub notes: String,
    /// Notes from the earliest occurrence (empty for a first appearance)
    pub previous_notes: String,
    /// Source link from the latest occurrence
    pub source: Option<String>,
}

impl Delta {
    /// Change for a metric, if the delta carries it
    pub fn change(&self, metric: Metric) -> Option<MetricChange> {
        self.metrics.get(&metric).copied()
    }

    /// True when no metric moved and the notes are the same
    pub fn is_unchanged(&self) -> bool {
        self.notes == self.previous_notes && self.metrics.values().all(MetricChange::is_unchanged)
    }
}
