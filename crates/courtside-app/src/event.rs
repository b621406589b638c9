//! Application input events.
//!
//! [`AppEvent`] is the complete set of inputs that drive the
//! [`App`](crate::App) state machine. Events originate from three
//! independent asynchronous sources: resolved REST fetches, pushes from the
//! realtime channel (translated by the [`Bridge`](crate::Bridge)), and the
//! periodic tick that services typing windows.
//!
//! Generic over `I` (instant type) so the same machine runs on real and
//! virtual time.

use courtside_channel::ChannelState;
use courtside_core::model::{Conversation, ConversationId, CurrentUser, Message, User};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent<I> {
    /// The authenticated profile was loaded; the session is usable.
    SessionEstablished {
        /// The current user.
        user: CurrentUser,
    },

    /// The realtime channel changed lifecycle state.
    ChannelStateChanged(ChannelState),

    /// The conversation listing resolved.
    ConversationsLoaded(Vec<Conversation>),

    /// The conversation listing failed.
    ConversationsFailed {
        /// User-facing description.
        message: String,
    },

    /// The user directory resolved.
    DirectoryLoaded(Vec<User>),

    /// A conversation's message history resolved.
    ///
    /// Discarded if the conversation is no longer active by the time the
    /// response arrives (stale in-flight responses are never applied).
    MessagesLoaded {
        /// Conversation the history belongs to.
        conversation_id: ConversationId,
        /// Messages, oldest first.
        messages: Vec<Message>,
    },

    /// A message history fetch failed.
    MessagesFailed {
        /// Conversation the fetch was for.
        conversation_id: ConversationId,
        /// User-facing description.
        message: String,
    },

    /// A message push arrived over the channel.
    MessageReceived(Message),

    /// A peer typing notice arrived over the channel.
    TypingReceived {
        /// Conversation being typed in.
        conversation_id: ConversationId,
        /// Arrival time, for the idle-window expiry.
        now: I,
    },

    /// The server pushed a `conversation_created` event.
    ConversationCreated(Conversation),

    /// The server reported a domain error over the channel.
    ChannelError {
        /// User-facing description.
        message: String,
    },

    /// Periodic tick for typing-window housekeeping.
    Tick {
        /// Current time from the environment.
        now: I,
    },
}
