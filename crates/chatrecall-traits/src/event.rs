//! Event payloads delivered by the host runtime.

use serde::{Deserialize, Serialize};

/// Whether a message was sent in a group chat or a private chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Group,
    Private,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound message observed by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Unique conversation identifier (platform, chat type and chat ID)
    pub conversation_key: String,
    /// Platform message ID
    pub message_id: String,
    /// Sender identifier
    pub sender_id: String,
    /// Sender display name
    pub sender_name: String,
    /// Timestamp (seconds since epoch)
    pub timestamp: i64,
    /// Plain-text message content
    pub text: String,
    /// Group identifier, absent for private chats
    pub group_id: Option<String>,
}

impl MessageEvent {
    /// Create a new private message event stamped with the current time
    pub fn new(
        conversation_key: impl Into<String>,
        message_id: impl Into<String>,
        sender_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let sender_id = sender_id.into();
        Self {
            conversation_key: conversation_key.into(),
            message_id: message_id.into(),
            sender_name: sender_id.clone(),
            sender_id,
            timestamp: chrono::Utc::now().timestamp(),
            text: text.into(),
            group_id: None,
        }
    }

    /// Set sender name
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self
    }

    /// Set group ID
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Set timestamp
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Classify the message by the presence of a group ID.
    pub fn kind(&self) -> MessageKind {
        match self.group_id.as_deref() {
            Some(id) if !id.is_empty() => MessageKind::Group,
            _ => MessageKind::Private,
        }
    }
}

/// Request about to be forwarded to the model backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmRequest {
    pub prompt: String,
    pub system_prompt: String,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: String::new(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}
