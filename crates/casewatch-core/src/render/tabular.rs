//! Monospace table renderer.

use chrono::{DateTime, Utc};
use tabled::builder::Builder;
use tabled::settings::{Alignment, Style};

use super::{annotate, required_change, AnnotationScope, Message, OutputFormat, Renderer};
use crate::chunk::chunk_lines;
use crate::diff::Delta;
use crate::errors::ExError;
use crate::model::Metric;

/// Code fence wrapped around every table chunk
pub const CODE_FENCE: &str = "```";

/// Characters added by wrapping a chunk in fences: "```\n" + "\n```"
pub const FENCE_OVERHEAD: usize = CODE_FENCE.len() * 2 + 2;

/// Renders all deltas as one table, split across fenced messages.
///
/// Columns are `Location`, one per tracked metric, then `Notes`.
#[derive(Debug, Clone)]
pub struct TabularRenderer {
    tracked: Vec<Metric>,
    annotation: AnnotationScope,
    chunk_limit: usize,
}

impl TabularRenderer {
    /// `chunk_limit` is the full message limit; fence overhead is subtracted here
    pub fn new(tracked: Vec<Metric>, annotation: AnnotationScope, chunk_limit: usize) -> Self {
        Self {
            tracked,
            annotation,
            chunk_limit,
        }
    }

    /// Limit applied to the table text inside the fences
    pub fn body_limit(&self) -> usize {
        self.chunk_limit.saturating_sub(FENCE_OVERHEAD).max(1)
    }

    fn header(&self) -> Vec<String> {
        std::iter::once("Location".to_string())
            .chain(self.tracked.iter().map(|m| m.label().to_string()))
            .chain(std::iter::once("Notes".to_string()))
            .collect()
    }

    #[allow(clippy::result_large_err)]
    fn row(&self, delta: &Delta) -> Result<Vec<String>, ExError> {
        let mut row = Vec::with_capacity(self.tracked.len() + 2);
        row.push(delta.location.clone());
        for metric in &self.tracked {
            let change = required_change(delta, *metric, "render_table")?;
            if self.annotation.annotates(*metric) {
                row.push(annotate(change));
            } else {
                row.push(change.after.to_string());
            }
        }
        row.push(delta.notes.clone());
        Ok(row)
    }

    /// Draw the full table as monospace text
    #[allow(clippy::result_large_err)]
    pub fn draw(&self, deltas: &[Delta]) -> Result<String, ExError> {
        let mut builder = Builder::default();
        builder.push_record(self.header());
        for delta in deltas {
            builder.push_record(self.row(delta)?);
        }

        let mut table = builder.build();
        table.with(Style::ascii()).with(Alignment::center());
        Ok(table.to_string())
    }
}

impl Renderer for TabularRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Table
    }

    fn render(&self, deltas: &[Delta], _rendered_at: DateTime<Utc>) -> Result<Vec<Message>, ExError> {
        if deltas.is_empty() {
            return Ok(Vec::new());
        }

        let drawn = self.draw(deltas)?;
        let lines: Vec<&str> = drawn.lines().collect();

        Ok(chunk_lines(&lines, self.body_limit())
            .into_iter()
            .map(|chunk| Message::Text(format!("{CODE_FENCE}\n{chunk}\n{CODE_FENCE}")))
            .collect())
    }
}
