//! Application side-effects and intents.
//!
//! [`AppAction`] instructions are produced by the [`App`](crate::App) state
//! machine for the runtime to execute. Fetch actions resolve back into
//! [`AppEvent`](crate::AppEvent)s; channel actions are translated to wire
//! commands by the [`Bridge`](crate::Bridge).

use courtside_core::model::{ConversationId, UserId};

use crate::Notice;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Shut the application down.
    Quit,

    /// Fetch the conversation listing (REST).
    FetchConversations,

    /// Fetch the user directory (REST).
    FetchDirectory,

    /// Fetch a conversation's message history (REST).
    FetchMessages {
        /// Conversation to load.
        conversation_id: ConversationId,
    },

    /// Join a conversation's push room over the channel.
    JoinConversation {
        /// Conversation to join.
        conversation_id: ConversationId,
    },

    /// Send a message over the channel.
    SendMessage {
        /// Target conversation.
        conversation_id: ConversationId,
        /// Trimmed, non-empty body.
        content: String,
    },

    /// Emit a typing-start notice.
    NotifyTypingStarted {
        /// Conversation being typed in.
        conversation_id: ConversationId,
    },

    /// Emit a typing-stop notice.
    NotifyTypingStopped {
        /// Conversation the notice applies to.
        conversation_id: ConversationId,
    },

    /// Ask the server to create a 1:1 conversation.
    CreateConversation {
        /// The other participant.
        recipient_id: UserId,
    },

    /// Ask the server to create a named group conversation.
    CreateGroupConversation {
        /// Validated non-empty name.
        name: String,
        /// Validated list of at least two recipients.
        recipient_ids: Vec<UserId>,
    },

    /// Surface a notification to the user.
    Notify(Notice),
}
