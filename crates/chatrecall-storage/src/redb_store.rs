//! Chat history storage in an embedded redb database.

use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;

use crate::backend::HistoryBackend;

const CHAT_HISTORY_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("chat_history");

/// Low-level chat history storage with byte-level API
#[derive(Debug, Clone)]
pub struct RedbHistoryStorage {
    db: Arc<Database>,
}

impl RedbHistoryStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(CHAT_HISTORY_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Open or create the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Arc::new(Database::create(path.as_ref())?);
        Self::new(db)
    }
}

impl HistoryBackend for RedbHistoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CHAT_HISTORY_TABLE)?;

        if let Some(data) = table.get(key)? {
            Ok(Some(data.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CHAT_HISTORY_TABLE)?;
            table.insert(key, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
