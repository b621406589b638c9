//! Application layer for Courtside
//!
//! Pure state machines and a generic runtime for the conversation and
//! session views, enabling deterministic simulation testing with the same
//! code that runs in production.
//!
//! # Components
//!
//! - [`App`]: conversation/session view-model state machine (events in,
//!   actions out; no I/O)
//! - [`Bridge`]: translates app intents to wire commands and channel events
//!   back to app events
//! - [`Driver`]: trait for platform-specific I/O (REST fetches, channel
//!   traffic, rendering, time)
//! - [`Runtime`]: generic orchestration loop gated on session availability

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, AppConfig};
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
pub use state::{Notice, NoticeKind};
