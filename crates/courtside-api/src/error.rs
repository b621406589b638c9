//! REST client errors.

use courtside_core::ClientError;
use thiserror::Error;

/// Errors from the REST resource client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable credentials: either no token was present (the request was
    /// never issued) or the server rejected the token (the session has been
    /// cleared). The caller must re-authenticate.
    #[error("not authenticated")]
    Unauthorized,

    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Self::auth("rest credentials rejected or missing"),
            ApiError::Http(msg) => Self::Transport(msg),
            ApiError::Status { status, message } => {
                Self::Server(format!("status {status}: {message}"))
            }
            ApiError::Decode(msg) => Self::Decode(msg),
        }
    }
}
