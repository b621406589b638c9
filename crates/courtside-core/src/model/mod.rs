//! Domain model shared by the REST client, the realtime channel, and the
//! view-model.
//!
//! Identifiers are server-issued opaque strings; the client never generates
//! them. All model mutation helpers here are pure (no I/O, no clock), which
//! is what makes the view-model testable in simulation.

mod conversation;
mod message;
mod user;

pub use conversation::{Conversation, LOADING_PLACEHOLDER, upsert};
pub use message::Message;
pub use user::{CurrentUser, Participant, User, UserType};

/// Server-issued user identifier.
pub type UserId = String;

/// Server-issued conversation identifier.
pub type ConversationId = String;

/// Server-issued message identifier.
pub type MessageId = String;
