use anyhow::Result;

/// Trait for whole-value key-value storage of conversation history.
///
/// Implementors store raw bytes per conversation key. `put_raw` must replace
/// the previous value entirely and must not leave a partially written value
/// behind when it fails.
pub trait HistoryBackend: Send + Sync {
    /// Get raw bytes by key, `None` if nothing was stored yet.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store raw bytes by key, overwriting any previous value.
    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Check if key exists.
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key)?.is_some())
    }
}
