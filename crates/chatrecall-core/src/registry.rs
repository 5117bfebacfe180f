//! Plugin registry and event fan-out.
//!
//! Plays the host dispatcher role: plugins are registered once and every
//! trigger is delivered to each of them in registration order.

use chatrecall_traits::{ChatPlugin, LlmRequest, MessageEvent};
use std::sync::Arc;
use tracing::debug;

/// Registry for chat plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn ChatPlugin>>,
}

impl PluginRegistry {
    /// Create an empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin.
    pub fn register<P: ChatPlugin + 'static>(&mut self, plugin: P) {
        self.register_shared(Arc::new(plugin));
    }

    /// Register an already shared plugin.
    pub fn register_shared(&mut self, plugin: Arc<dyn ChatPlugin>) {
        debug!(plugin = plugin.name(), "Registered plugin");
        self.plugins.push(plugin);
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ChatPlugin>> {
        self.plugins.iter().find(|plugin| plugin.name() == name)
    }

    /// Names of registered plugins, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Deliver an observed message to every plugin.
    pub async fn dispatch_message(&self, event: &MessageEvent) {
        for plugin in &self.plugins {
            plugin.on_message_observed(event).await;
        }
    }

    /// Let every plugin adjust `request` before it is sent.
    pub async fn dispatch_llm_request(&self, event: &MessageEvent, request: &mut LlmRequest) {
        for plugin in &self.plugins {
            plugin.on_llm_request_prepared(event, request).await;
        }
    }

    /// Notify every plugin that it is being unloaded.
    pub async fn terminate_all(&self) {
        for plugin in &self.plugins {
            plugin.on_terminate().await;
        }
    }
}
