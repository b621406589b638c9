//! Observable application state types.
//!
//! The conversation list, the active message log, and the loading flags are
//! owned exclusively by the [`App`](crate::App) view-model; the presentation
//! layer reads them through accessors and dispatches intents back down. The
//! types here are the small pieces that surface to the user directly.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// A completed operation.
    Success,
    /// A failure the user should see.
    Error,
}

/// A user-facing notification (the toast of the web client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}
