use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::record::Record;

/// All records observed in one poll cycle, in source order
///
/// A location normally appears once, but merged region feeds and sources
/// that reissue corrected rows may repeat it. Consumers resolve repeats by
/// position: the first occurrence is the oldest value, the last is the newest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<Record>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another snapshot's records after this one's, keeping duplicates
    pub fn concat(mut self, other: Snapshot) -> Self {
        self.records.extend(other.records);
        self
    }

    /// Distinct locations in order of first appearance
    pub fn locations(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.location.as_str())
            .filter(|loc| seen.insert(*loc))
            .collect()
    }

    /// Every record for `location`, in snapshot order
    pub fn occurrences<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.location == location)
    }
}

impl From<Vec<Record>> for Snapshot {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
