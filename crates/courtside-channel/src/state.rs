//! Channel connection lifecycle.
//!
//! ```text
//! ┌────────┐ acquire() ┌───────────┐ handshake ok ┌───────────┐
//! │ Absent │──────────>│ Acquiring │─────────────>│ Connected │
//! └────────┘           └───────────┘              └───────────┘
//!     ▲                     │                          │
//!     │  no token /         │                          │ transport drop
//!     │  auth failure       │                          ▼
//!     └─────────────────────┘                   ┌──────────────┐
//!     ▲                        retry budget     │ Disconnected │
//!     └─────────────────────── exhausted ───────└──────────────┘
//!                                                      │ auto-reconnect
//!                                                      └──> Acquiring
//! ```

/// Lifecycle state of the realtime channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No connection and no attempt in flight (initial, after teardown, or
    /// after an authentication failure).
    #[default]
    Absent,
    /// A connection attempt is in flight. Concurrent acquisition requests
    /// attach to this attempt instead of opening a second socket.
    Acquiring,
    /// Handshake succeeded; the channel is live.
    Connected,
    /// The transport dropped; the underlying client is retrying within its
    /// bounded attempt budget.
    Disconnected,
}

impl ChannelState {
    /// True while the channel can carry traffic.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// True while an attempt (initial or reconnect) may still produce a
    /// live channel without a new `acquire()` call.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Acquiring | Self::Disconnected)
    }
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Absent => "absent",
            Self::Acquiring => "acquiring",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        };
        f.write_str(label)
    }
}
