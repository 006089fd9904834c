//! Diff command
//!
//! Usage: casewatch diff <PREVIOUS> <CURRENT> [--output text]

use std::path::{Path, PathBuf};
use std::time::Duration;

use casewatch_core::{
    build_renderer, changed_only, compute_deltas, Message, RenderOptions, Snapshot,
};
use casewatch_engine::source::fetch_snapshot;
use casewatch_engine::{JsonFileSource, RegionSelector};
use clap::Args;

use super::RenderFlags;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older feed document
    pub previous: PathBuf,

    /// Newer feed document
    pub current: PathBuf,

    /// Regions to compare: all, china or international
    #[arg(short, long, default_value = "all")]
    pub region: RegionSelector,

    #[command(flatten)]
    pub render: RenderFlags,
}

async fn load(path: &Path, region: RegionSelector) -> anyhow::Result<Snapshot> {
    let source = JsonFileSource::new(path);
    Ok(fetch_snapshot(&source, region, Duration::from_secs(10)).await?)
}

/// Execute diff command
pub async fn execute(args: DiffArgs) -> anyhow::Result<()> {
    let previous = load(&args.previous, args.region).await?;
    let current = load(&args.current, args.region).await?;

    let mut options = RenderOptions::default();
    args.render.apply(&mut options);
    options.validate()?;

    let deltas = changed_only(compute_deltas(&previous, &current));
    let messages = build_renderer(&options).render(&deltas, chrono::Utc::now())?;

    for message in messages {
        match message {
            Message::Text(text) => println!("{}", text),
            Message::Card(card) => println!("{}", serde_json::to_string(&card)?),
        }
    }

    Ok(())
}
