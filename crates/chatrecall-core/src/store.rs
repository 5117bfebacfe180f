//! Typed history store.
//!
//! Wraps a byte-level [`HistoryBackend`] with JSON serialization and the
//! bounded-log rules. Every write re-reads the full log, appends, truncates
//! and writes the full log back.

use chatrecall_storage::HistoryBackend;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::PluginConfig;
use crate::error::{HistoryError, Result};
use crate::models::{HistoryLog, MessageRecord};
use crate::render::{RenderedHistory, render_history};

/// Bounded per-conversation message history.
#[derive(Clone)]
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>, config: &PluginConfig) -> Self {
        let capacity = match config.validate() {
            Ok(()) => config.history_count,
            Err(error) => {
                warn!(error = %error, "Invalid history_count, using default");
                PluginConfig::default().history_count
            }
        };
        Self { backend, capacity }
    }

    /// Maximum number of records kept per conversation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Load the stored log for `key`.
    pub fn load(&self, key: &str) -> Result<Option<HistoryLog>> {
        let Some(bytes) = self
            .backend
            .get_raw(key)
            .map_err(|e| HistoryError::read(key, e))?
        else {
            return Ok(None);
        };

        let log = serde_json::from_slice(&bytes).map_err(|e| HistoryError::read(key, e))?;
        Ok(Some(log))
    }

    /// Append `record` to the log of `key` and persist the whole log.
    ///
    /// Returns the number of records stored afterwards. A corrupt stored log
    /// aborts the append and is left untouched.
    pub fn try_append(&self, key: &str, record: MessageRecord) -> Result<usize> {
        let mut log = self.load(key)?.unwrap_or_default();
        log.push_bounded(record, self.capacity);

        let json = serde_json::to_vec_pretty(&log).map_err(|e| HistoryError::write(key, e))?;
        self.backend
            .put_raw(key, &json)
            .map_err(|e| HistoryError::write(key, e))?;

        Ok(log.len())
    }

    /// Append `record`, logging instead of returning failures.
    pub fn append(&self, key: &str, record: MessageRecord) {
        match self.try_append(key, record) {
            Ok(count) => {
                info!(conversation = %key, count, "Saved message to conversation history");
            }
            Err(error) => {
                error!(conversation = %key, error = %error, "Failed to save chat history");
            }
        }
    }

    /// Render the stored history of `key` followed by `current_message`.
    ///
    /// Returns `None` when there is no usable history.
    pub fn render(&self, key: &str, current_message: &str) -> Option<String> {
        self.render_with_count(key, current_message)
            .map(|rendered| rendered.text)
    }

    /// Like [`HistoryStore::render`], also reporting how many records were
    /// rendered.
    pub fn render_with_count(&self, key: &str, current_message: &str) -> Option<RenderedHistory> {
        match self.load(key) {
            Ok(Some(log)) if !log.is_empty() => Some(RenderedHistory {
                count: log.len(),
                text: render_history(&log, current_message),
            }),
            Ok(_) => {
                debug!(conversation = %key, "No stored history to render");
                None
            }
            Err(error) => {
                error!(conversation = %key, error = %error, "Failed to load chat history");
                None
            }
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chatrecall_storage::{FileHistoryStorage, RedbHistoryStorage};
    use chatrecall_traits::MessageKind;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::tempdir;

    const KEY: &str = "qq:GroupMessage:10001";

    fn record(id: &str) -> MessageRecord {
        MessageRecord {
            message_id: id.to_string(),
            sender_id: format!("u-{id}"),
            sender_name: format!("User{id}"),
            timestamp: 1_700_000_000,
            content: format!("message {id}"),
            message_type: MessageKind::Group,
        }
    }

    fn ids(log: &HistoryLog) -> Vec<String> {
        log.iter().map(|r| r.message_id.clone()).collect()
    }

    fn setup_file_store(capacity: usize) -> (HistoryStore, FileHistoryStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let files = FileHistoryStorage::new(temp_dir.path()).unwrap();
        let store = HistoryStore::new(
            Arc::new(files.clone()),
            &PluginConfig::with_history_count(capacity),
        );
        (store, files, temp_dir)
    }

    /// Backend whose writes can be switched to fail.
    struct FlakyBackend {
        inner: FileHistoryStorage,
        fail_writes: AtomicBool,
    }

    impl HistoryBackend for FlakyBackend {
        fn get_raw(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
            self.inner.get_raw(key)
        }

        fn put_raw(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                bail!("permission denied");
            }
            self.inner.put_raw(key, data)
        }
    }

    #[test]
    fn test_append_truncates_to_capacity() {
        let (store, _files, _temp_dir) = setup_file_store(5);

        let mut counts = Vec::new();
        for id in ["A", "B", "C", "D", "E", "F"] {
            counts.push(store.try_append(KEY, record(id)).unwrap());
        }

        assert_eq!(counts, vec![1, 2, 3, 4, 5, 5]);
        let log = store.load(KEY).unwrap().unwrap();
        assert_eq!(ids(&log), vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_append_many_keeps_last_n_in_order() {
        let (store, _files, _temp_dir) = setup_file_store(3);

        for i in 0..20 {
            store.append(KEY, record(&i.to_string()));
        }

        let log = store.load(KEY).unwrap().unwrap();
        assert_eq!(ids(&log), vec!["17", "18", "19"]);
    }

    #[test]
    fn test_append_is_not_idempotent() {
        let (store, _files, _temp_dir) = setup_file_store(5);

        store.append(KEY, record("A"));
        store.append(KEY, record("A"));

        let log = store.load(KEY).unwrap().unwrap();
        assert_eq!(ids(&log), vec!["A", "A"]);
    }

    #[test]
    fn test_conversations_are_isolated() {
        let (store, _files, _temp_dir) = setup_file_store(5);

        store.append("conv-1", record("A"));
        store.append("conv-2", record("B"));

        assert_eq!(ids(&store.load("conv-1").unwrap().unwrap()), vec!["A"]);
        assert_eq!(ids(&store.load("conv-2").unwrap().unwrap()), vec!["B"]);
    }

    #[test]
    fn test_stored_file_is_pretty_json_array() {
        let (store, files, _temp_dir) = setup_file_store(5);
        let mut message = record("A");
        message.content = "你好".to_string();

        store.append(KEY, message);

        let text = std::fs::read_to_string(files.path_for(KEY)).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"content\": \"你好\""));
        assert!(text.contains("\"message_type\": \"group\""));
    }

    #[test]
    fn test_render_missing_history_returns_none() {
        let (store, _files, _temp_dir) = setup_file_store(5);
        assert!(store.load(KEY).unwrap().is_none());
        assert!(store.render(KEY, "hi").is_none());
    }

    #[test]
    fn test_render_empty_history_returns_none() {
        let (store, files, _temp_dir) = setup_file_store(5);
        files.put_raw(KEY, b"[]").unwrap();

        assert!(store.render(KEY, "hi").is_none());
    }

    #[test]
    fn test_render_two_records() {
        let (store, _files, _temp_dir) = setup_file_store(5);
        store.append(KEY, record("A"));
        store.append(KEY, record("B"));

        let text = store.render(KEY, "hi").unwrap();

        assert!(text.contains("这是前 2 条历史记录："));
        assert!(text.contains("1. UserA: message A\n"));
        assert!(text.contains("2. UserB: message B\n"));
        assert!(text.ends_with("这是刚刚获取到的消息：\nhi"));
    }

    #[test]
    fn test_render_with_count_reports_rendered_records() {
        let (store, _files, _temp_dir) = setup_file_store(5);
        for id in ["A", "B", "C"] {
            store.append(KEY, record(id));
        }

        let rendered = store.render_with_count(KEY, "hi").unwrap();

        assert_eq!(rendered.count, 3);
        assert_eq!(Some(rendered.text), store.render(KEY, "hi"));
        assert!(store.render_with_count("other", "hi").is_none());
    }

    #[test]
    fn test_render_does_not_mutate_history() {
        let (store, files, _temp_dir) = setup_file_store(5);
        store.append(KEY, record("A"));
        let before = files.get_raw(KEY).unwrap();

        store.render(KEY, "hi");
        store.render(KEY, "again");

        assert_eq!(files.get_raw(KEY).unwrap(), before);
    }

    #[test]
    fn test_corrupt_history_is_read_error_and_left_untouched() {
        let (store, files, _temp_dir) = setup_file_store(5);
        files.put_raw(KEY, b"{not json").unwrap();

        assert!(matches!(store.load(KEY), Err(HistoryError::Read { .. })));
        assert!(store.render(KEY, "hi").is_none());
        assert!(matches!(
            store.try_append(KEY, record("A")),
            Err(HistoryError::Read { .. })
        ));

        store.append(KEY, record("B"));
        assert_eq!(files.get_raw(KEY).unwrap().unwrap(), b"{not json");
    }

    #[test]
    fn test_failed_write_keeps_previous_log() {
        let temp_dir = tempdir().unwrap();
        let backend = Arc::new(FlakyBackend {
            inner: FileHistoryStorage::new(temp_dir.path()).unwrap(),
            fail_writes: AtomicBool::new(false),
        });
        let store = HistoryStore::new(backend.clone(), &PluginConfig::default());

        store.append(KEY, record("A"));
        store.append(KEY, record("B"));

        backend.fail_writes.store(true, Ordering::SeqCst);
        let result = store.try_append(KEY, record("C"));
        assert!(matches!(result, Err(HistoryError::Write { .. })));
        store.append(KEY, record("D"));

        let log = store.load(KEY).unwrap().unwrap();
        assert_eq!(ids(&log), vec!["A", "B"]);
    }

    #[test]
    fn test_invalid_capacity_falls_back_to_default() {
        let (store, _files, _temp_dir) = setup_file_store(0);
        assert_eq!(store.capacity(), PluginConfig::default().history_count);
    }

    #[test]
    fn test_redb_backend() {
        let temp_dir = tempdir().unwrap();
        let backend = RedbHistoryStorage::open(temp_dir.path().join("history.db")).unwrap();
        let store = HistoryStore::new(Arc::new(backend), &PluginConfig::with_history_count(2));

        for id in ["A", "B", "C"] {
            store.append(KEY, record(id));
        }

        let log = store.load(KEY).unwrap().unwrap();
        assert_eq!(ids(&log), vec!["B", "C"]);
        assert!(store.render(KEY, "now").unwrap().contains("1. UserB: message B"));
    }
}
