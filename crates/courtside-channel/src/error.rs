//! Channel error types.

use courtside_core::ClientError;
use thiserror::Error;

/// Errors from channel acquisition and use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The server rejected the credentials presented at connection time.
    /// Terminal for the attempt; the session token is cleared as a side
    /// effect and the caller must re-authenticate.
    #[error("channel authentication rejected: {reason}")]
    Auth {
        /// Why the handshake was rejected.
        reason: String,
    },

    /// The transport could not be established (or its bounded retry budget
    /// ran out).
    #[error("channel connect failed: {0}")]
    Connect(String),

    /// The channel was torn down while the operation was in flight.
    #[error("channel closed")]
    Closed,
}

impl ChannelError {
    /// True if the error means the current token is unusable.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<ChannelError> for ClientError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Auth { reason } => Self::Auth { reason },
            ChannelError::Connect(msg) => Self::Transport(msg),
            ChannelError::Closed => Self::Transport("channel closed".to_string()),
        }
    }
}
