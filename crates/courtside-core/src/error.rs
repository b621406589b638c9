//! Error taxonomy for the Courtside client.
//!
//! Strongly-typed errors shared across the REST client, the realtime channel,
//! and the view-model. The taxonomy matters more than the payload: an
//! authentication failure is terminal and must clear the session, a transport
//! failure is retried only by the realtime transport's bounded budget, a
//! validation failure never reaches the network, and a server-reported domain
//! error is surfaced to the user.

use thiserror::Error;

/// Errors that can occur in the client core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Missing, invalid, or expired credentials. Terminal for the current
    /// operation; the session must be cleared and the user re-authenticated.
    #[error("authentication failure: {reason}")]
    Auth {
        /// Why the credentials were rejected.
        reason: String,
    },

    /// Network-level failure (connection refused, dropped transport, HTTP
    /// failure). Recoverable in principle, but never retried silently by
    /// this layer.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Input rejected before any network call was made.
    #[error("validation failure: {0}")]
    Validation(String),

    /// Domain error reported by the server (e.g. an `error` event on the
    /// realtime channel).
    #[error("server error: {0}")]
    Server(String),

    /// Response body could not be decoded into the expected shape.
    #[error("decode failure: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true if this error means the current credentials are no
    /// longer usable.
    ///
    /// Callers must treat an authentication failure as terminal: clear the
    /// session and prompt for re-authentication instead of retrying.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Convenience constructor for authentication failures.
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth { reason: reason.into() }
    }
}
