//! Notification renderers.
//!
//! Every output format implements [`Renderer`]: it turns the changed deltas
//! of one cycle into the messages handed to the sink. [`build_renderer`]
//! picks the implementation for the configured [`OutputFormat`].
//!
//! All renderers share one annotation rule for a metric that moved:
//! `after (+N)` when it went up, `after (-N)` when it went down, and plain
//! `after` when it did not move. A first appearance is a rise from zero.

pub mod card;
pub mod prose;
pub mod tabular;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::diff::{Delta, MetricChange};
use crate::errors::{CaseWatchError, ExError};
use crate::model::Metric;

pub use card::CardRenderer;
pub use prose::ProseRenderer;
pub use tabular::TabularRenderer;

/// Default chunk limit, leaving headroom under a 2000 character message cap
pub const DEFAULT_CHUNK_LIMIT: usize = 1700;

/// Output format selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Monospace table inside code fences
    #[default]
    Table,
    /// One sentence per metric change
    Text,
    /// One structured card per location
    #[serde(alias = "embed")]
    Card,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Text => "text",
            OutputFormat::Card => "card",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CaseWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "text" => Ok(OutputFormat::Text),
            "card" | "embed" => Ok(OutputFormat::Card),
            _ => Err(CaseWatchError::UnknownValue {
                field: "output format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Which metrics get a `(+N)` / `(-N)` annotation in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationScope {
    /// Every tracked metric
    #[default]
    AllTracked,
    /// Cases and deaths only; other metrics show the plain latest count
    CoreOnly,
}

impl AnnotationScope {
    pub fn annotates(&self, metric: Metric) -> bool {
        match self {
            AnnotationScope::AllTracked => true,
            AnnotationScope::CoreOnly => metric.is_core(),
        }
    }
}

/// Author line shown at the top of every card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAuthor {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Presentation settings for structured cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Accent colour as 0xRRGGBB
    pub colour: u32,
    pub author: Option<CardAuthor>,
    /// Thumbnail image per location (e.g. a flag)
    pub thumbnails: BTreeMap<String, String>,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            colour: 0xD3_2F_2F,
            author: None,
            thumbnails: BTreeMap::new(),
        }
    }
}

/// Everything a renderer needs from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Maximum characters per text message
    pub chunk_limit: usize,
    /// Metrics shown, in the order given
    pub tracked: Vec<Metric>,
    pub annotation: AnnotationScope,
    pub card: CardStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            tracked: Metric::ALL.to_vec(),
            annotation: AnnotationScope::default(),
            card: CardStyle::default(),
        }
    }
}

impl RenderOptions {
    /// Check the options before building a renderer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending setting.
    pub fn validate(&self) -> Result<(), CaseWatchError> {
        let invalid = |reason: &str| -> Result<(), CaseWatchError> {
            Err(CaseWatchError::InvalidConfig {
                reason: reason.to_string(),
            })
        };

        if self.tracked.is_empty() {
            return invalid("at least one metric must be tracked");
        }
        let mut seen = HashSet::new();
        if !self.tracked.iter().all(|m| seen.insert(*m)) {
            return invalid("tracked metrics must not repeat");
        }
        if self.chunk_limit == 0 {
            return invalid("chunk limit must be positive");
        }
        if self.format == OutputFormat::Table && self.chunk_limit <= tabular::FENCE_OVERHEAD {
            return invalid("chunk limit leaves no room inside the code fences");
        }
        Ok(())
    }
}

/// One labelled value on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A structured notification for one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub colour: u32,
    pub author: Option<CardAuthor>,
    pub thumbnail: Option<String>,
    pub fields: Vec<CardField>,
}

/// A unit handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum Message {
    Text(String),
    Card(Card),
}

impl Message {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(text) => Some(text),
            Message::Card(_) => None,
        }
    }

    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Message::Card(card) => Some(card),
            Message::Text(_) => None,
        }
    }
}

/// Turns the changed deltas of one cycle into sink messages.
///
/// Implementations must be deterministic: the same deltas and timestamp
/// always produce identical messages.
#[allow(clippy::result_large_err)]
pub trait Renderer: Send + Sync {
    /// Format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Render deltas into zero or more messages.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::MissingMetric` when a delta lacks a metric the
    /// layout requires. This is a contract violation between record source
    /// and configuration, not a transient failure.
    fn render(&self, deltas: &[Delta], rendered_at: DateTime<Utc>) -> Result<Vec<Message>, ExError>;
}

/// Build the renderer for the configured format
pub fn build_renderer(options: &RenderOptions) -> Box<dyn Renderer> {
    match options.format {
        OutputFormat::Table => Box::new(TabularRenderer::new(
            options.tracked.clone(),
            options.annotation,
            options.chunk_limit,
        )),
        OutputFormat::Text => Box::new(ProseRenderer::new(
            options.tracked.clone(),
            options.chunk_limit,
        )),
        OutputFormat::Card => Box::new(CardRenderer::new(
            options.tracked.clone(),
            options.card.clone(),
        )),
    }
}

/// Render a metric cell: `after (+N)`, `after (-N)` or plain `after`
pub fn annotate(change: MetricChange) -> String {
    let diff = change.diff();
    if diff > 0 {
        format!("{} (+{})", change.after, diff)
    } else if diff < 0 {
        format!("{} ({})", change.after, diff)
    } else {
        change.after.to_string()
    }
}

/// Look up a metric the layout requires, or report the contract violation
#[allow(clippy::result_large_err)]
pub(crate) fn required_change(
    delta: &Delta,
    metric: Metric,
    op: &str,
) -> Result<MetricChange, ExError> {
    delta.change(metric).ok_or_else(|| {
        ExError::from(CaseWatchError::MissingMetric {
            location: delta.location.clone(),
            metric: metric.key().to_string(),
        })
        .with_op(op)
    })
}
