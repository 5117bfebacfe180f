//! Path utilities for the history data directory.

use anyhow::Result;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "data/chat_history";

/// Environment variable to override the history directory.
const CHATRECALL_DIR_ENV: &str = "CHATRECALL_DIR";

/// Resolve the history data directory.
/// Priority: CHATRECALL_DIR env var > ./data/chat_history
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_from(std::env::var(CHATRECALL_DIR_ENV).ok())
}

/// Resolve the history data directory from an optional override value.
pub fn resolve_data_dir_from(override_dir: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Ensure the history directory exists and return its path.
pub fn ensure_data_dir() -> Result<PathBuf> {
    ensure_data_dir_from(std::env::var(CHATRECALL_DIR_ENV).ok())
}

/// Ensure the directory resolved from `override_dir` exists and return it.
pub fn ensure_data_dir_from(override_dir: Option<String>) -> Result<PathBuf> {
    let dir = resolve_data_dir_from(override_dir);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
