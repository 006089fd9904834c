//! Structured card renderer.

use chrono::{DateTime, Utc};

use super::{required_change, Card, CardField, CardStyle, Message, OutputFormat, Renderer};
use crate::diff::{Delta, MetricChange};
use crate::errors::ExError;
use crate::model::Metric;

/// Renders one card per delta. Cards are bounded by field count, so they are
/// never chunked.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    tracked: Vec<Metric>,
    style: CardStyle,
}

impl CardRenderer {
    pub fn new(tracked: Vec<Metric>, style: CardStyle) -> Self {
        Self { tracked, style }
    }

    #[allow(clippy::result_large_err)]
    fn card(&self, delta: &Delta, rendered_at: DateTime<Utc>) -> Result<Card, ExError> {
        let fields = self
            .tracked
            .iter()
            .map(|metric| {
                let change = required_change(delta, *metric, "render_card")?;
                Ok(CardField {
                    name: metric.label().to_string(),
                    value: field_value(change),
                    inline: true,
                })
            })
            .collect::<Result<Vec<_>, ExError>>()?;

        Ok(Card {
            title: delta.location.clone(),
            url: delta.source.clone(),
            description: (!delta.notes.is_empty()).then(|| delta.notes.clone()),
            timestamp: rendered_at,
            colour: self.style.colour,
            author: self.style.author.clone(),
            thumbnail: self.style.thumbnails.get(&delta.location).cloned(),
            fields,
        })
    }
}

/// Card values bold the latest count when it moved
fn field_value(change: MetricChange) -> String {
    let diff = change.diff();
    if diff > 0 {
        format!("**{}** (+{})", change.after, diff)
    } else if diff < 0 {
        format!("**{}** ({})", change.after, diff)
    } else {
        change.after.to_string()
    }
}

impl Renderer for CardRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Card
    }

    fn render(&self, deltas: &[Delta], rendered_at: DateTime<Utc>) -> Result<Vec<Message>, ExError> {
        deltas
            .iter()
            .map(|delta| self.card(delta, rendered_at).map(Message::Card))
            .collect()
    }
}
