//! chatrecall Storage - Low-level per-conversation persistence
//!
//! This crate provides the durable layer behind the history store. It exposes
//! byte-level APIs so it stays independent of the record types defined in
//! chatrecall-core.
//!
//! # Architecture
//!
//! Every backend stores one opaque value per conversation key and only
//! supports whole-value reads and writes. Callers do read-modify-write on the
//! full value; there is no delta format and no locking.
//!
//! # Backends
//!
//! - [`FileHistoryStorage`] - one pretty JSON file per key, atomic replace
//! - [`RedbHistoryStorage`] - embedded redb table `chat_history`

pub mod backend;
pub mod file_store;
pub mod paths;
pub mod redb_store;

pub use backend::HistoryBackend;
pub use file_store::FileHistoryStorage;
pub use redb_store::RedbHistoryStorage;
