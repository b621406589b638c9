//! Conversations and the pure helpers the view-model derives state from.

use serde::{Deserialize, Serialize};

use crate::model::{ConversationId, CurrentUser, Message, Participant, User};

/// Placeholder shown while participant identity is still being resolved.
///
/// Display-name resolution must return exactly this literal wherever no
/// usable participant data exists yet, so every surface renders the pending
/// state identically.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// A 1:1 or group messaging thread.
///
/// Created either by hydration from the conversation listing or by a
/// server-pushed `conversation_created` event. Participants are enriched in
/// place as directory data arrives; enrichment never blocks display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Server-issued identifier.
    pub id: ConversationId,
    /// True for group threads.
    pub is_group: bool,
    /// Explicit group name, if one was set at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Everyone in the thread, including the current user.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Most recent message, for list previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
}

impl Conversation {
    /// First participant whose id differs from the current user.
    pub fn other_participant(&self, current_user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id != current_user_id)
    }

    /// True for a non-group thread whose other participant is `recipient_id`.
    ///
    /// Used to reuse an existing 1:1 conversation instead of creating a
    /// duplicate.
    pub fn is_direct_with(&self, current_user_id: &str, recipient_id: &str) -> bool {
        if self.is_group {
            return false;
        }
        self.other_participant(current_user_id).is_some_and(|p| p.id == recipient_id)
    }

    /// Resolve the display name for this conversation.
    ///
    /// Pure function of the conversation and the current user id. The
    /// fallback chain is fixed: explicit group name, then the other
    /// participant's `first last`, then their email local part, then
    /// [`LOADING_PLACEHOLDER`].
    pub fn display_name(&self, current_user_id: &str) -> String {
        if self.is_group {
            if let Some(name) = &self.name {
                if !name.is_empty() {
                    return name.clone();
                }
            }
        }
        match self.other_participant(current_user_id) {
            Some(other) => other.display_name().unwrap_or_else(|| LOADING_PLACEHOLDER.to_string()),
            None => LOADING_PLACEHOLDER.to_string(),
        }
    }

    /// Run an enrichment pass over every participant.
    ///
    /// Best-effort and eventually consistent: participants without a
    /// directory or self match stay pending and a later pass picks them up.
    pub fn enrich_participants(&mut self, directory: &[User], current_user: Option<&CurrentUser>) {
        for participant in &mut self.participants {
            participant.enrich(directory, current_user);
        }
    }
}

/// Insert or replace a conversation in the list.
///
/// Any stale entry with the same id is removed first, then the new entry is
/// placed at the front. The rest of the list keeps its server-provided
/// order.
pub fn upsert(conversations: &mut Vec<Conversation>, conversation: Conversation) {
    conversations.retain(|c| c.id != conversation.id);
    conversations.insert(0, conversation);
}
