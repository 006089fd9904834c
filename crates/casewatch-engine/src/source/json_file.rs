//! Local JSON feed.
//!
//! The document holds one array of records per region:
//!
//! ```json
//! {
//!   "china": [{ "location": "Hubei", "metrics": { "cases": "11,177", "deaths": "350" } }],
//!   "international": [{ "location": "Japan", "metrics": { "cases": "20", "deaths": "0" }, "notes": "1 serious" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use casewatch_core::errors::{CaseWatchError, ExError};
use casewatch_core::{Metric, Record, Snapshot};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{RecordSource, Region};

/// Reads the feed from a file that some other process keeps current
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One row as it appears in the document. Metric keys stay strings until
/// conversion so a column this crate does not track cannot sink the table.
#[derive(Debug, Deserialize)]
struct FeedRow {
    location: String,
    #[serde(default)]
    metrics: BTreeMap<String, String>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    source: Option<String>,
}

impl FeedRow {
    fn into_record(self) -> Record {
        let mut record = Record::new(self.location).with_notes(self.notes);
        record.source = self.source;
        for (key, raw) in self.metrics {
            if let Ok(metric) = key.parse::<Metric>() {
                record.metrics.insert(metric, raw);
            } else {
                tracing::debug!(location = %record.location, key = %key, "skipping unknown metric");
            }
        }
        record
    }
}

fn unavailable(reason: String, op: &str) -> ExError {
    ExError::from(CaseWatchError::SourceUnavailable { reason }).with_op(op)
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self) -> Result<String, ExError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| unavailable(format!("{}: {e}", self.path.display()), "fetch"))
    }

    fn parse(&self, payload: &str, region: Region) -> Result<Snapshot, ExError> {
        let document: Map<String, Value> = serde_json::from_str(payload)
            .map_err(|e| unavailable(format!("malformed feed: {e}"), "parse"))?;

        let table = document.get(region.key()).ok_or_else(|| {
            ExError::from(CaseWatchError::TableNotFound {
                region: region.key().to_string(),
            })
            .with_op("parse")
        })?;

        let rows: Vec<FeedRow> = serde_json::from_value(table.clone()).map_err(|e| {
            unavailable(format!("malformed {} table: {e}", region.key()), "parse")
        })?;

        Ok(rows.into_iter().map(FeedRow::into_record).collect())
    }
}
