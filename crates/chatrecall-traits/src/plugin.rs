//! Plugin hook contract.
//!
//! The host runtime registers plugins and calls these hooks one event at a
//! time. Hooks never return errors: a plugin failure must not fail the event
//! that triggered it, so implementations log and swallow their own errors.

use async_trait::async_trait;

use crate::event::{LlmRequest, MessageEvent};

#[async_trait]
pub trait ChatPlugin: Send + Sync {
    /// Stable plugin identifier used in logs.
    fn name(&self) -> &str;

    /// Called for every message the host observes.
    async fn on_message_observed(&self, event: &MessageEvent);

    /// Called right before `request` is sent to the model backend.
    async fn on_llm_request_prepared(&self, event: &MessageEvent, request: &mut LlmRequest);

    /// Called once when the plugin is being unloaded.
    async fn on_terminate(&self) {}
}
