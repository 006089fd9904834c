use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use casewatch_core::errors::{CaseWatchError, ExError};
use casewatch_core::{Metric, Record, Snapshot};
use casewatch_engine::source::{RecordSource, Region};
use casewatch_engine::{StopSignal, UpdaterConfig};

/// What the scripted source does on one fetch
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Step {
    /// Serve these tables; `None` means the table is missing from the payload
    Feed {
        china: Option<Vec<Record>>,
        international: Option<Vec<Record>>,
    },
    /// Fail the fetch
    Fail(CaseWatchError),
    /// Never answer
    Hang,
}

#[allow(dead_code)]
impl Step {
    pub fn international(records: Vec<Record>) -> Self {
        Step::Feed {
            china: Some(Vec::new()),
            international: Some(records),
        }
    }

    pub fn unavailable() -> Self {
        Step::Fail(CaseWatchError::SourceUnavailable {
            reason: "connection reset".to_string(),
        })
    }
}

/// Source replaying a fixed script; the last step repeats once exhausted
pub struct ScriptedSource {
    steps: Vec<Step>,
    fetches: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch(&self) -> Result<String, ExError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        let index = n.min(self.steps.len() - 1);
        match &self.steps[index] {
            Step::Feed { .. } => Ok(index.to_string()),
            Step::Fail(err) => Err(err.clone().into()),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Ok(index.to_string())
            }
        }
    }

    fn parse(&self, payload: &str, region: Region) -> Result<Snapshot, ExError> {
        let index: usize = payload.parse().map_err(|_| {
            ExError::from(CaseWatchError::SourceUnavailable {
                reason: format!("bad payload {payload}"),
            })
        })?;
        let table = match &self.steps[index] {
            Step::Feed {
                china,
                international,
            } => match region {
                Region::China => china.clone(),
                Region::International => international.clone(),
            },
            _ => None,
        };
        table.map(Snapshot::new).ok_or_else(|| {
            CaseWatchError::TableNotFound {
                region: region.key().to_string(),
            }
            .into()
        })
    }
}

/// Stop signal that allows a fixed number of cycles
#[allow(dead_code)]
pub struct StopAfter {
    remaining: AtomicUsize,
}

#[allow(dead_code)]
impl StopAfter {
    pub fn cycles(n: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(n),
        }
    }
}

impl StopSignal for StopAfter {
    fn should_stop(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}

#[allow(dead_code)]
pub fn record(location: &str, cases: u64, deaths: u64, notes: &str) -> Record {
    Record::new(location)
        .with_metric(Metric::Cases, cases.to_string())
        .with_metric(Metric::Deaths, deaths.to_string())
        .with_notes(notes)
}

/// Config for prose output over cases and deaths
#[allow(dead_code)]
pub fn text_config(channel_id: u64) -> UpdaterConfig {
    let mut config = UpdaterConfig {
        channel_id,
        ..UpdaterConfig::default()
    };
    config.render.format = casewatch_core::OutputFormat::Text;
    config.render.tracked = Metric::CORE.to_vec();
    config
}
