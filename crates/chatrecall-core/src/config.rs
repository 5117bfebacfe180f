//! Plugin configuration.
//!
//! The host hands the plugin its config once at construction; the values are
//! immutable afterwards. Only `history_count` is recognized, other keys are
//! ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::ConfigError;

const DEFAULT_HISTORY_COUNT: usize = 5;
const MIN_HISTORY_COUNT: usize = 1;

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Maximum number of records kept per conversation
    pub history_count: usize,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            history_count: DEFAULT_HISTORY_COUNT,
        }
    }
}

impl PluginConfig {
    pub fn with_history_count(history_count: usize) -> Self {
        Self { history_count }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_count < MIN_HISTORY_COUNT {
            return Err(ConfigError::InvalidHistoryCount {
                value: self.history_count,
                min: MIN_HISTORY_COUNT,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a host-supplied JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// Falls back to the defaults when the file is missing, unreadable or
    /// invalid.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|content| Self::from_toml_str(&content));

        match loaded {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Invalid plugin config, using defaults");
                Self::default()
            }
        }
    }

    /// Build from a host-supplied JSON object, falling back to the defaults.
    pub fn from_value_or_default(value: serde_json::Value) -> Self {
        Self::from_value(value).unwrap_or_else(|error| {
            warn!(error = %error, "Invalid plugin config, using defaults");
            Self::default()
        })
    }
}
