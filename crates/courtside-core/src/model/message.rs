//! Messages in a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ConversationId, MessageId, Participant, UserId};

/// A message delivered over the realtime channel or loaded from history.
///
/// Messages are append-only: once in a conversation's log they are never
/// mutated or removed. Order is channel arrival order; the server is the
/// sequencing authority and the client does not resequence by timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-issued identifier.
    pub id: MessageId,
    /// Conversation this message belongs to.
    pub conversation_id: ConversationId,
    /// Author's user id.
    pub sender_id: UserId,
    /// Message body.
    pub content: String,
    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
    /// Author details, when the server includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Participant>,
}

impl Message {
    /// Sender display name for rendering, `"Unknown"` when the server sent
    /// no usable author details.
    pub fn sender_name(&self) -> String {
        let name = self.sender.as_ref().map(|sender| {
            let first = sender.first_name.as_deref().unwrap_or_default();
            let last = sender.last_name.as_deref().unwrap_or_default();
            format!("{first} {last}").trim().to_string()
        });
        match name {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown".to_string(),
        }
    }
}
