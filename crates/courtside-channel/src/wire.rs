//! Wire vocabulary for the realtime channel.
//!
//! Events are JSON objects with an `event` tag and a `data` payload,
//! camelCase on the wire. The channel only delivers events; it never stores
//! message history — durable state lives behind the REST service.

use courtside_core::model::{Conversation, ConversationId, Message, UserId};
use serde::{Deserialize, Serialize};

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// A message was appended to a conversation the client has joined.
    ///
    /// The sender receives their own messages through this event too; there
    /// is no local echo on send.
    NewMessage(Message),

    /// A peer is typing in the given conversation.
    UserTyping {
        /// Conversation the notice applies to.
        conversation_id: ConversationId,
    },

    /// A conversation now exists (first 1:1 message or group creation).
    ///
    /// This is the only creation acknowledgment: `create_conversation` and
    /// `create_group_conversation` have no synchronous reply.
    ConversationCreated(Conversation),

    /// Domain error reported by the server.
    Error {
        /// Human-readable description.
        message: String,
    },
}

/// Operations the client emits over the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientCommand {
    /// Subscribe to pushes for a conversation.
    JoinConversation {
        /// Conversation to join.
        conversation_id: ConversationId,
    },

    /// Send a message. Appears in the log only once the server pushes it
    /// back as [`ServerEvent::NewMessage`].
    SendMessage {
        /// Target conversation.
        conversation_id: ConversationId,
        /// Trimmed, non-empty body.
        content: String,
    },

    /// Notify peers that the user started typing.
    Typing {
        /// Conversation being typed in.
        conversation_id: ConversationId,
    },

    /// Notify peers that the user paused.
    TypingStopped {
        /// Conversation the notice applies to.
        conversation_id: ConversationId,
    },

    /// Create a 1:1 conversation with the recipient.
    CreateConversation {
        /// The other participant.
        recipient_id: UserId,
    },

    /// Create a named group conversation.
    CreateGroupConversation {
        /// Group name (validated non-empty before emission).
        name: String,
        /// At least two recipients (validated before emission).
        recipient_ids: Vec<UserId>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_group_payload_shape() {
        let cmd = ClientCommand::CreateGroupConversation {
            name: "Squad".into(),
            recipient_ids: vec!["u1".into(), "u2".into()],
        };

        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "create_group_conversation",
                "data": { "name": "Squad", "recipientIds": ["u1", "u2"] }
            })
        );
    }

    #[test]
    fn join_payload_shape() {
        let cmd = ClientCommand::JoinConversation { conversation_id: "c7".into() };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            value,
            json!({ "event": "join_conversation", "data": { "conversationId": "c7" } })
        );
    }

    #[test]
    fn typing_event_parses() {
        let raw = json!({ "event": "user_typing", "data": { "conversationId": "c1" } });
        let event: ServerEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event, ServerEvent::UserTyping { conversation_id: "c1".into() });
    }

    #[test]
    fn unknown_event_is_a_decode_error() {
        let raw = json!({ "event": "presence_update", "data": {} });
        assert!(serde_json::from_value::<ServerEvent>(raw).is_err());
    }
}
