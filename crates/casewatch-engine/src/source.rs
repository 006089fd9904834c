//! Record source abstraction.
//!
//! A source fetches one raw payload per cycle and parses it once per region.
//! Fetching is async and may fail transiently; parsing is pure.
//!
//! - [`RecordSource`]: trait implemented by every upstream
//! - [`JsonFileSource`]: reads region tables from a local JSON document
//! - [`fetch_snapshot`]: fetch with a timeout and merge the selected regions

pub mod json_file;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use casewatch_core::errors::{CaseWatchError, ExError};
use casewatch_core::Snapshot;
use serde::{Deserialize, Serialize};

pub use json_file::JsonFileSource;

/// One region table of the upstream feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    China,
    International,
}

impl Region {
    pub fn key(&self) -> &'static str {
        match self {
            Region::China => "china",
            Region::International => "international",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Which regions a cycle reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSelector {
    /// China followed by international, concatenated
    #[default]
    All,
    China,
    International,
}

impl RegionSelector {
    /// Regions to parse, in merge order
    pub fn regions(&self) -> &'static [Region] {
        match self {
            RegionSelector::All => &[Region::China, Region::International],
            RegionSelector::China => &[Region::China],
            RegionSelector::International => &[Region::International],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionSelector::All => "all",
            RegionSelector::China => "china",
            RegionSelector::International => "international",
        }
    }
}

impl std::fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionSelector {
    type Err = CaseWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RegionSelector::All),
            "china" => Ok(RegionSelector::China),
            "international" => Ok(RegionSelector::International),
            _ => Err(CaseWatchError::UnknownValue {
                field: "region".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Upstream provider of records.
///
/// Implementations must distinguish a payload that could not be obtained
/// (`SourceUnavailable`, `SourceTimeout`, `SourceStatus`) from a payload that
/// arrived but does not contain the expected table (`TableNotFound`).
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the raw payload for this cycle.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable`, `SourceTimeout` or `SourceStatus` when the
    /// payload cannot be obtained.
    async fn fetch(&self) -> Result<String, ExError>;

    /// Extract one region's records from a fetched payload.
    ///
    /// # Errors
    ///
    /// Returns `TableNotFound` when the region's table is absent.
    fn parse(&self, payload: &str, region: Region) -> Result<Snapshot, ExError>;
}

/// Fetch once, then parse and concatenate every selected region.
///
/// The fetch is abandoned with `SourceTimeout` after `timeout`.
///
/// # Errors
///
/// Returns the first fetch, timeout or parse error; no partial snapshot is
/// produced.
pub async fn fetch_snapshot<S>(
    source: &S,
    selector: RegionSelector,
    timeout: Duration,
) -> Result<Snapshot, ExError>
where
    S: RecordSource + ?Sized,
{
    let payload = tokio::time::timeout(timeout, source.fetch())
        .await
        .map_err(|_| {
            ExError::from(CaseWatchError::SourceTimeout {
                after_secs: timeout.as_secs(),
            })
            .with_op("fetch")
        })??;

    let mut snapshot = Snapshot::default();
    for region in selector.regions() {
        let part = source.parse(&payload, *region)?;
        tracing::debug!(region = region.key(), record_count = part.len(), "parsed region");
        snapshot = snapshot.concat(part);
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_merges_china_first() {
        assert_eq!(
            RegionSelector::All.regions(),
            &[Region::China, Region::International]
        );
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(
            "International".parse::<RegionSelector>().unwrap(),
            RegionSelector::International
        );
        assert!("europe".parse::<RegionSelector>().is_err());
    }
}
