//! Persisted history types.

use chatrecall_traits::{MessageEvent, MessageKind};
use serde::{Deserialize, Serialize};

/// One observed chat message as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message_id: String,
    pub sender_id: String,
    pub sender_name: String,
    /// Seconds since epoch
    pub timestamp: i64,
    pub content: String,
    pub message_type: MessageKind,
}

impl From<&MessageEvent> for MessageRecord {
    fn from(event: &MessageEvent) -> Self {
        Self {
            message_id: event.message_id.clone(),
            sender_id: event.sender_id.clone(),
            sender_name: event.sender_name.clone(),
            timestamp: event.timestamp,
            content: event.text.clone(),
            message_type: event.kind(),
        }
    }
}

/// Chronological, bounded message history of one conversation.
///
/// Serialized as a plain JSON array of [`MessageRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<MessageRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` and drop the oldest entries beyond `capacity`.
    pub fn push_bounded(&mut self, record: MessageRecord, capacity: usize) {
        self.records.push(record);
        if self.records.len() > capacity {
            let excess = self.records.len() - capacity;
            self.records.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }
}

impl From<Vec<MessageRecord>> for HistoryLog {
    fn from(records: Vec<MessageRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
