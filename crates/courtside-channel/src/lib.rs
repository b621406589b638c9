//! Realtime channel for Courtside
//!
//! Provides at most one live bidirectional connection to the messaging
//! backend, authenticated by the current session token, with automatic
//! recovery inside a bounded retry budget.
//!
//! # Architecture
//!
//! - [`wire`]: the JSON event/command vocabulary spoken over the channel
//! - [`ChannelState`]: the connection lifecycle (`Absent`, `Acquiring`,
//!   `Connected`, `Disconnected`)
//! - [`ChannelManager`]: token-gated, single-flight acquisition; the only
//!   component allowed to create or destroy the channel
//! - [`Connector`]: the seam between the manager and the actual transport,
//!   so tests can swap in an in-memory connection
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides
//! [`transport::WsConnector`], a WebSocket connector that passes the bearer
//! token at connection time and retries transport drops with fixed backoff.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod handle;
mod manager;
mod state;
pub mod wire;

#[cfg(feature = "transport")]
pub mod transport;

pub use error::ChannelError;
pub use handle::{ChannelHandle, CloseSignal};
pub use manager::{ChannelManager, Connector};
pub use state::ChannelState;
