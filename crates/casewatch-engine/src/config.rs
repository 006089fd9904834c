//! Orchestrator configuration.
//!
//! Loaded from an optional TOML file and then overlaid with command-line
//! flags by the binary. Every field has a default except the channel.
//!
//! ```toml
//! channel_id = 679337120543498260
//! poll_interval_secs = 300
//! backoff_interval_secs = 20
//! region = "all"
//!
//! [render]
//! format = "table"
//! chunk_limit = 1700
//! tracked = ["cases", "deaths"]
//! annotation = "core_only"
//! ```

use std::time::Duration;

use casewatch_core::errors::CaseWatchError;
use casewatch_core::render::RenderOptions;
use serde::{Deserialize, Serialize};

use crate::source::RegionSelector;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_BACKOFF_INTERVAL_SECS: u64 = 20;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Channel every message is sent to; 0 means unset
    pub channel_id: u64,
    /// Wait between successful cycles
    pub poll_interval_secs: u64,
    /// Wait after a failed fetch, independent of the poll interval
    pub backoff_interval_secs: u64,
    /// Fetches running longer than this fail with a timeout
    pub fetch_timeout_secs: u64,
    pub region: RegionSelector,
    pub render: RenderOptions,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            channel_id: 0,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            backoff_interval_secs: DEFAULT_BACKOFF_INTERVAL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            region: RegionSelector::default(),
            render: RenderOptions::default(),
        }
    }
}

impl UpdaterConfig {
    /// Parse a TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the document is not valid TOML or a value
    /// has the wrong shape.
    pub fn from_toml_str(text: &str) -> Result<Self, CaseWatchError> {
        toml::from_str(text).map_err(|e| CaseWatchError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn backoff_interval(&self) -> Duration {
        Duration::from_secs(self.backoff_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Check the configuration before the first cycle.
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

        if self.channel_id == 0 {
            return invalid("channel_id must be set");
        }
        if self.poll_interval_secs == 0 {
            return invalid("poll interval must be at least one second");
        }
        if self.backoff_interval_secs == 0 {
            return invalid("backoff interval must be at least one second");
        }
        if self.fetch_timeout_secs == 0 {
            return invalid("fetch timeout must be at least one second");
        }
        self.render.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casewatch_core::render::tabular::FENCE_OVERHEAD;
    use casewatch_core::render::{AnnotationScope, OutputFormat};
    use casewatch_core::Metric;

    fn with_channel() -> UpdaterConfig {
        UpdaterConfig {
            channel_id: 1,
            ..UpdaterConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = UpdaterConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.backoff_interval(), Duration::from_secs(20));
        assert_eq!(config.region, RegionSelector::All);
        assert_eq!(config.render.chunk_limit, 1700);
        assert_eq!(config.render.tracked, Metric::ALL.to_vec());
    }

    #[test]
    fn test_channel_is_required() {
        assert!(UpdaterConfig::default().validate().is_err());
        assert!(with_channel().validate().is_ok());
    }

    #[test]
    fn test_repeated_metric_rejected() {
        let mut config = with_channel();
        config.render.tracked = vec![Metric::Cases, Metric::Cases];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tiny_table_limit_rejected() {
        let mut config = with_channel();
        config.render.chunk_limit = FENCE_OVERHEAD;
        assert!(config.validate().is_err());
        config.render.format = OutputFormat::Text;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_selected_keys() {
        let config = UpdaterConfig::from_toml_str(
            r#"
            channel_id = 679337120543498260
            region = "china"

            [render]
            format = "embed"
            tracked = ["cases", "deaths"]
            annotation = "core_only"
            "#,
        )
        .unwrap();

        assert_eq!(config.channel_id, 679_337_120_543_498_260);
        assert_eq!(config.region, RegionSelector::China);
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.render.format, OutputFormat::Card);
        assert_eq!(config.render.annotation, AnnotationScope::CoreOnly);
        assert_eq!(config.render.chunk_limit, 1700);
    }

    #[test]
    fn test_bad_toml_is_invalid_config() {
        let err = UpdaterConfig::from_toml_str("region = 5").unwrap_err();
        assert!(matches!(err, CaseWatchError::InvalidConfig { .. }));
    }
}
