//! Error types for history persistence and configuration

use thiserror::Error;

/// History store error types
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Stored record is unreadable or not a valid history log.
    #[error("Failed to read history for {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// History log could not be serialized or persisted.
    #[error("Failed to write history for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl HistoryError {
    pub fn read(key: &str, source: impl Into<anyhow::Error>) -> Self {
        Self::Read {
            key: key.to_string(),
            source: source.into(),
        }
    }

    pub fn write(key: &str, source: impl Into<anyhow::Error>) -> Self {
        Self::Write {
            key: key.to_string(),
            source: source.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("history_count must be at least {min}, got {value}")]
    InvalidHistoryCount { value: usize, min: usize },

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;
