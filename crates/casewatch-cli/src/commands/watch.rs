//! Watch command
//!
//! Usage: casewatch watch --channel <ID> --source <FILE> [--config <TOML>]

use std::path::PathBuf;

use anyhow::Context;
use casewatch_core::logging_facility::{init, Profile, Severity};
use casewatch_engine::{JsonFileSource, RegionSelector, StdoutSink, Updater, UpdaterConfig};
use clap::Args;
use tokio::sync::watch;

use super::RenderFlags;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Feed document to poll
    #[arg(short, long)]
    pub source: PathBuf,

    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Channel to notify
    #[arg(short, long)]
    pub channel: Option<u64>,

    /// Seconds between polls (default: 300)
    #[arg(short, long)]
    pub frequency: Option<u64>,

    /// Seconds to wait after a failed fetch (default: 20)
    #[arg(short, long)]
    pub backoff: Option<u64>,

    /// Regions to report: all, china or international
    #[arg(short, long)]
    pub region: Option<RegionSelector>,

    /// Minimum log severity: debug, info, warning, error or critical
    #[arg(long, default_value = "info")]
    pub severity: Severity,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(flatten)]
    pub render: RenderFlags,
}

impl WatchArgs {
    /// Configuration file values overlaid with the flags that were given
    pub fn resolve_config(&self) -> anyhow::Result<UpdaterConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                UpdaterConfig::from_toml_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => UpdaterConfig::default(),
        };

        if let Some(channel) = self.channel {
            config.channel_id = channel;
        }
        if let Some(frequency) = self.frequency {
            config.poll_interval_secs = frequency;
        }
        if let Some(backoff) = self.backoff {
            config.backoff_interval_secs = backoff;
        }
        if let Some(region) = self.region {
            config.region = region;
        }
        self.render.apply(&mut config.render);

        config.validate()?;
        Ok(config)
    }
}

/// Execute watch command
pub async fn execute(args: WatchArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let profile = if args.json_logs {
        Profile::Production
    } else {
        Profile::Development
    };
    init(profile, args.severity);

    tracing::info!(
        channel_id = config.channel_id,
        source = %args.source.display(),
        region = config.region.as_str(),
        format = config.render.format.as_str(),
        poll_interval_secs = config.poll_interval_secs,
        backoff_interval_secs = config.backoff_interval_secs,
        "casewatch {} starting",
        env!("CARGO_PKG_VERSION")
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received shutdown signal, stopping");
            stop_tx.send(true).ok();
        }
    });

    let source = JsonFileSource::new(&args.source);
    let mut updater = Updater::new(config, source, StdoutSink::stdout());
    updater.run(&stop_rx).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casewatch_core::OutputFormat;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        watch: WatchArgs,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = TestCli::parse_from([
            "casewatch",
            "--source",
            "feed.json",
            "--channel",
            "42",
            "--frequency",
            "60",
            "--region",
            "china",
            "--output",
            "embed",
            "--metrics",
            "cases,deaths",
        ]);

        let config = cli.watch.resolve_config().unwrap();

        assert_eq!(config.channel_id, 42);
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.backoff_interval_secs, 20);
        assert_eq!(config.region, RegionSelector::China);
        assert_eq!(config.render.format, OutputFormat::Card);
        assert_eq!(config.render.tracked.len(), 2);
    }

    #[test]
    fn test_missing_channel_fails_validation() {
        let cli = TestCli::parse_from(["casewatch", "--source", "feed.json"]);
        assert!(cli.watch.resolve_config().is_err());
    }

    #[test]
    fn test_unknown_region_rejected_by_parser() {
        let parsed = TestCli::try_parse_from([
            "casewatch",
            "--source",
            "feed.json",
            "--region",
            "europe",
        ]);
        assert!(parsed.is_err());
    }
}
