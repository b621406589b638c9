//! Conversation and message history.
//!
//! History is read-only over REST; everything that mutates a conversation
//! goes over the realtime channel and comes back as a push.

use courtside_core::model::{Conversation, Message};

use crate::{ApiClient, ApiError, types::ConversationDto};

impl ApiClient {
    /// List the current user's conversations, in server-provided order.
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let raw: Vec<ConversationDto> = self.get_json("/conversations").await?;
        Ok(raw.into_iter().map(Conversation::from).collect())
    }

    /// Fetch the message history of one conversation, oldest first.
    pub async fn conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!("/conversations/{conversation_id}/messages")).await
    }
}
