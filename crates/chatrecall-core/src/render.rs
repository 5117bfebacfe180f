//! Prompt fragment rendering.

use std::fmt::Write;

use crate::models::HistoryLog;

/// Rendered prompt fragment and the number of records it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHistory {
    pub count: usize,
    pub text: String,
}

/// Render `history` followed by the just-received message.
///
/// Records are listed oldest first, numbered from 1. The header keeps its
/// historical wording even though the listed records are the most recent
/// ones.
pub fn render_history(history: &HistoryLog, current_message: &str) -> String {
    let mut text = format!("这是前 {} 条历史记录：\n", history.len());
    for (index, record) in history.iter().enumerate() {
        let _ = writeln!(text, "{}. {}: {}", index + 1, record.sender_name, record.content);
    }
    let _ = write!(text, "这是刚刚获取到的消息：\n{}", current_message);
    text
}
