//! Provider configuration loading from YAML files
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! the stock timeouts: one minute for updates, five minutes for deletes.

use crate::constants::{
    DEFAULT_DELETE_TIMEOUT_SECS, DEFAULT_RETRY_INITIAL_INTERVAL_MS,
    DEFAULT_RETRY_MAX_INTERVAL_MS, DEFAULT_UPDATE_TIMEOUT_SECS,
};
use crate::{ProviderError, ResourceKind, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Root structure of a provider configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// AWS region the remote service lives in
    pub region: Option<String>,
    /// Operation timeouts per resource kind
    pub timeouts: TimeoutsConfig,
    /// Conflict retry pacing
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutsConfig {
    pub bot: ResourceTimeouts,
    pub bot_alias: ResourceTimeouts,
}

/// Update and delete timeouts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceTimeouts {
    pub update: u64,
    pub delete: u64,
}

impl Default for ResourceTimeouts {
    fn default() -> Self {
        Self {
            update: DEFAULT_UPDATE_TIMEOUT_SECS,
            delete: DEFAULT_DELETE_TIMEOUT_SECS,
        }
    }
}

impl ResourceTimeouts {
    pub fn update_timeout(&self) -> Duration {
        Duration::from_secs(self.update)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete)
    }
}

/// Back-off pacing between conflict retries, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: DEFAULT_RETRY_INITIAL_INTERVAL_MS,
            max_interval_ms: DEFAULT_RETRY_MAX_INTERVAL_MS,
        }
    }
}

impl RetryConfig {
    /// Build pacing from durations; millisecond counts beyond `u64` saturate
    pub fn from_durations(initial: Duration, max: Duration) -> Self {
        let millis = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            initial_interval_ms: millis(initial),
            max_interval_ms: millis(max),
        }
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}

impl ProviderConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProviderError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            ProviderError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        let config: ProviderConfig = if content.trim().is_empty() {
            ProviderConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject timeouts that would never allow a single attempt
    pub fn validate(&self) -> Result<()> {
        for (kind, timeouts) in [
            (ResourceKind::Bot, &self.timeouts.bot),
            (ResourceKind::BotAlias, &self.timeouts.bot_alias),
        ] {
            if timeouts.update == 0 || timeouts.delete == 0 {
                return Err(ProviderError::Config(format!(
                    "{} timeouts must be greater than zero",
                    kind
                )));
            }
        }

        if self.retry.initial_interval_ms == 0 {
            return Err(ProviderError::Config(
                "retry.initial_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.retry.initial_interval_ms > self.retry.max_interval_ms {
            return Err(ProviderError::Config(format!(
                "retry.initial_interval_ms ({}) exceeds retry.max_interval_ms ({})",
                self.retry.initial_interval_ms, self.retry.max_interval_ms
            )));
        }

        Ok(())
    }

    /// Timeouts configured for a resource kind
    pub fn timeouts_for(&self, kind: ResourceKind) -> ResourceTimeouts {
        match kind {
            ResourceKind::Bot => self.timeouts.bot,
            ResourceKind::BotAlias => self.timeouts.bot_alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        let bot = config.timeouts_for(ResourceKind::Bot);

        assert_eq!(bot.update_timeout(), Duration::from_secs(60));
        assert_eq!(bot.delete_timeout(), Duration::from_secs(300));
        assert_eq!(config.retry.initial_interval(), Duration::from_millis(500));
        assert_eq!(config.retry.max_interval(), Duration::from_secs(10));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ProviderConfig::from_yaml_str("").unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r#"
region: us-east-1
timeouts:
  bot_alias:
    delete: 30
"#;
        let config = ProviderConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.timeouts.bot_alias.delete, 30);
        assert_eq!(config.timeouts.bot_alias.update, 60);
        assert_eq!(config.timeouts.bot, ResourceTimeouts::default());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let yaml = "timeouts:\n  bot:\n    update: 0\n";
        let err = ProviderConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("bot timeouts must be greater than zero"));
    }

    #[test]
    fn test_rejects_inverted_intervals() {
        let yaml = "retry:\n  initial_interval_ms: 2000\n  max_interval_ms: 100\n";
        assert!(matches!(
            ProviderConfig::from_yaml_str(yaml),
            Err(ProviderError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let yaml = "timeouts:\n  bot:\n    create: 10\n";
        assert!(ProviderConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry:\n  initial_interval_ms: 10\n  max_interval_ms: 20").unwrap();

        let config = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(config.retry.initial_interval_ms, 10);
        assert_eq!(config.retry.max_interval_ms, 20);
    }

    #[test]
    fn test_retry_config_from_durations() {
        let pacing = RetryConfig::from_durations(Duration::from_millis(250), Duration::from_secs(4));
        assert_eq!(pacing.initial_interval_ms, 250);
        assert_eq!(pacing.max_interval_ms, 4000);

        let huge = RetryConfig::from_durations(Duration::from_millis(1), Duration::MAX);
        assert_eq!(huge.max_interval_ms, u64::MAX);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProviderConfig::load(Path::new("/nonexistent/lex-provider.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
