//! Chat history injector plugin.
//!
//! Records every observed message and prepends the stored history of the
//! conversation to the system prompt of outgoing LLM requests. Storage work
//! runs on the blocking pool so one conversation's file I/O does not stall
//! the executor.

use async_trait::async_trait;
use chatrecall_storage::{FileHistoryStorage, HistoryBackend};
use chatrecall_traits::{ChatPlugin, LlmRequest, MessageEvent};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::PluginConfig;
use crate::models::MessageRecord;
use crate::store::HistoryStore;

pub const PLUGIN_NAME: &str = "chat_history_injector";

/// Append `text` to the system prompt, separated by a blank line.
pub fn inject_system_prompt(request: &mut LlmRequest, text: &str) {
    if request.system_prompt.is_empty() {
        request.system_prompt = text.to_string();
    } else {
        request.system_prompt.push_str("\n\n");
        request.system_prompt.push_str(text);
    }
}

#[derive(Debug, Clone)]
pub struct ChatHistoryInjector {
    store: HistoryStore,
}

impl ChatHistoryInjector {
    pub fn new(backend: Arc<dyn HistoryBackend>, config: &PluginConfig) -> Self {
        Self {
            store: HistoryStore::new(backend, config),
        }
    }

    /// Build an injector storing one JSON file per conversation in `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>, config: &PluginConfig) -> anyhow::Result<Self> {
        let storage = FileHistoryStorage::new(dir)?;
        Ok(Self::new(Arc::new(storage), config))
    }

    /// Build an injector in the default data directory.
    pub fn open_default(config: &PluginConfig) -> anyhow::Result<Self> {
        let storage = FileHistoryStorage::open_default()?;
        Ok(Self::new(Arc::new(storage), config))
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }
}

#[async_trait]
impl ChatPlugin for ChatHistoryInjector {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn on_message_observed(&self, event: &MessageEvent) {
        let store = self.store.clone();
        let key = event.conversation_key.clone();
        let record = MessageRecord::from(event);

        if let Err(error) = tokio::task::spawn_blocking(move || store.append(&key, record)).await {
            error!(
                conversation = %event.conversation_key,
                error = %error,
                "History save task failed"
            );
        }
    }

    async fn on_llm_request_prepared(&self, event: &MessageEvent, request: &mut LlmRequest) {
        let store = self.store.clone();
        let key = event.conversation_key.clone();
        let current_message = event.text.clone();

        let rendered = match tokio::task::spawn_blocking(move || {
            store.render_with_count(&key, &current_message)
        })
        .await
        {
            Ok(rendered) => rendered,
            Err(error) => {
                error!(
                    conversation = %event.conversation_key,
                    error = %error,
                    "History render task failed"
                );
                None
            }
        };
        let Some(rendered) = rendered else {
            return;
        };

        inject_system_prompt(request, &rendered.text);
        info!(
            conversation = %event.conversation_key,
            count = rendered.count,
            "Injected chat history into LLM request"
        );
    }

    async fn on_terminate(&self) {
        info!(plugin = PLUGIN_NAME, "Chat history plugin stopped");
    }
}
