//! chatrecall Traits - Host-facing plugin contracts.
//!
//! This crate defines what a chat-bot host hands to a plugin and what a
//! plugin can do in return:
//! - `MessageEvent`, the payload of the "message observed" trigger
//! - `LlmRequest`, the mutable request seen by the "LLM request prepared" trigger
//! - `ChatPlugin`, the three capability hooks a plugin exposes

pub mod event;
pub mod plugin;

pub use event::{LlmRequest, MessageEvent, MessageKind};
pub use plugin::ChatPlugin;
