//! File-per-conversation storage.
//!
//! Each conversation key maps to `<stem>.json` inside the storage directory.
//! Values are replaced by writing a sibling temp file and renaming it over the
//! target, so readers see either the old value or the new one.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::backend::HistoryBackend;
use crate::paths;

const FILE_EXTENSION: &str = "json";
const KEY_HASH_HEX_LEN: usize = 16;

/// History storage backed by one JSON file per conversation key.
#[derive(Debug, Clone)]
pub struct FileHistoryStorage {
    storage_dir: PathBuf,
}

impl FileHistoryStorage {
    /// Create a storage rooted at `storage_dir`, creating it if missing.
    pub fn new(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        fs::create_dir_all(&storage_dir).with_context(|| {
            format!(
                "Failed to create history directory {}",
                storage_dir.display()
            )
        })?;
        Ok(Self { storage_dir })
    }

    /// Create a storage in the default data directory.
    pub fn open_default() -> Result<Self> {
        Self::new(paths::ensure_data_dir()?)
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.storage_dir
            .join(format!("{}.{}", file_stem_for_key(key), FILE_EXTENSION))
    }
}

impl HistoryBackend for FileHistoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let mut temp = NamedTempFile::new_in(&self.storage_dir).with_context(|| {
            format!(
                "Failed to create temp file in {}",
                self.storage_dir.display()
            )
        })?;
        temp.write_all(data)
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync temp file for {}", path.display()))?;
        temp.persist(&path)
            .map_err(|err| err.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!(path = %path.display(), bytes = data.len(), "History file replaced");
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key).is_file())
    }
}

/// Map a conversation key to a file stem.
///
/// Keys made only of `[A-Za-z0-9._-]` are used verbatim. Anything else is
/// sanitized and suffixed with a hash of the original key.
///
/// A verbatim key spelled exactly like another key's hashed stem would share
/// its file; that requires guessing a 64-bit SHA-256 prefix.
pub fn file_stem_for_key(key: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');

    if !key.is_empty() && !key.starts_with('.') && key.chars().all(is_safe) {
        return key.to_string();
    }

    let sanitized: String = key
        .chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect();
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    format!("{}-{}", sanitized, &digest[..KEY_HASH_HEX_LEN])
}
