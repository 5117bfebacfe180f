//! chatrecall - chat history injection for chat-bot hosts.
//!
//! Stores the most recent messages of every conversation and injects them
//! into the system prompt of outgoing LLM requests.

pub mod config;
pub mod error;
pub mod models;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod store;

pub use config::PluginConfig;
pub use error::{ConfigError, HistoryError};
pub use models::{HistoryLog, MessageRecord};
pub use plugin::{ChatHistoryInjector, inject_system_prompt};
pub use registry::PluginRegistry;
pub use render::{RenderedHistory, render_history};
pub use store::HistoryStore;

pub use chatrecall_traits::{ChatPlugin, LlmRequest, MessageEvent, MessageKind};
