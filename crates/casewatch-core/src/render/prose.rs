//! Sentence renderer.
//!
//! One sentence per metric that moved, one sentence per line:
//!
//! ```text
//! 1 new case(s) identified in **Australia**, total case(s) now are 3 (1 serious)
//! 1 incorrectly identified case(s) in **Sweden**, total case(s) now are 4
//! ```

use chrono::{DateTime, Utc};

use super::{Message, OutputFormat, Renderer};
use crate::chunk::chunk_lines;
use crate::diff::{Delta, MetricChange};
use crate::errors::ExError;
use crate::model::Metric;

/// Renders deltas as natural-language sentences, chunked into text messages.
#[derive(Debug, Clone)]
pub struct ProseRenderer {
    tracked: Vec<Metric>,
    chunk_limit: usize,
}

impl ProseRenderer {
    pub fn new(tracked: Vec<Metric>, chunk_limit: usize) -> Self {
        Self {
            tracked,
            chunk_limit,
        }
    }

    /// All sentences for the deltas, in delta order then metric declaration order
    pub fn sentences(&self, deltas: &[Delta]) -> Vec<String> {
        deltas
            .iter()
            .flat_map(|delta| {
                delta
                    .metrics
                    .iter()
                    .filter(move |(metric, _)| self.tracked.contains(*metric))
                    .filter_map(move |(metric, change)| sentence(*metric, *change, delta))
            })
            .collect()
    }
}

/// Sentence for one metric of one delta, or `None` when it did not move
fn sentence(metric: Metric, change: MetricChange, delta: &Delta) -> Option<String> {
    let diff = change.diff();
    if diff == 0 {
        return None;
    }

    let count = diff.unsigned_abs();
    let location = &delta.location;
    let total = change.after;
    let rose = diff > 0;

    let text = match (metric, rose) {
        (Metric::Cases, true) => {
            let mut text = format!(
                "{count} new case(s) identified in **{location}**, total case(s) now are {total}"
            );
            if !delta.notes.is_empty() {
                text.push_str(&format!(" ({})", delta.notes));
            }
            text
        }
        (Metric::Cases, false) => format!(
            "{count} incorrectly identified case(s) in **{location}**, total case(s) now are {total}"
        ),
        (Metric::Deaths, true) => format!(
            "{count} new death(s) recorded in **{location}**, total death(s) now are {total}"
        ),
        (Metric::Deaths, false) => format!(
            "{count} incorrectly identified death(s) in **{location}**, total death(s) now are {total}"
        ),
        (Metric::Serious, true) => format!(
            "{count} new serious patients identified in **{location}**, total serious now are {total}"
        ),
        (Metric::Serious, false) => format!(
            "{count} less serious patients in **{location}**, total serious now are {total}"
        ),
        (Metric::Critical, true) => format!(
            "{count} new critical patients identified in **{location}**, total critical now are {total}"
        ),
        (Metric::Critical, false) => format!(
            "{count} less critical patients in **{location}**, total critical now are {total}"
        ),
        (Metric::Recovered, true) => format!(
            "{count} new recovered patients identified in **{location}**, total recovered now are {total}"
        ),
        (Metric::Recovered, false) => format!(
            "{count} incorrectly identified recovered patients in **{location}**, total recovered now are {total}"
        ),
    };

    Some(text)
}

impl Renderer for ProseRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, deltas: &[Delta], _rendered_at: DateTime<Utc>) -> Result<Vec<Message>, ExError> {
        let sentences = self.sentences(deltas);
        Ok(chunk_lines(&sentences, self.chunk_limit)
            .into_iter()
            .map(Message::Text)
            .collect())
    }
}
