pub mod diff;
pub mod watch;

use casewatch_core::render::{AnnotationScope, RenderOptions};
use casewatch_core::{Metric, OutputFormat};
use clap::Args;

/// Presentation flags shared by every command
#[derive(Debug, Clone, Args)]
pub struct RenderFlags {
    /// Output format: table, text or card (alias: embed)
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Maximum characters per text message
    #[arg(long)]
    pub chunk_limit: Option<usize>,

    /// Metrics to show, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<Metric>,

    /// Only annotate cases and deaths in tables
    #[arg(long)]
    pub core_annotations: bool,
}

impl RenderFlags {
    /// Overlay the flags that were given onto `options`
    pub fn apply(&self, options: &mut RenderOptions) {
        if let Some(format) = self.output {
            options.format = format;
        }
        if let Some(limit) = self.chunk_limit {
            options.chunk_limit = limit;
        }
        if !self.metrics.is_empty() {
            options.tracked = self.metrics.clone();
        }
        if self.core_annotations {
            options.annotation = AnnotationScope::CoreOnly;
        }
    }
}
