//! Deterministic simulation harness for Courtside client testing.
//!
//! In-memory implementations of the environment, the realtime backend, and
//! the [`Driver`](courtside_app::Driver) trait, so end-to-end scenarios run
//! the production orchestration code with virtual time, scripted REST
//! fixtures, and a scripted messaging server.
//!
//! # Components
//!
//! - [`SimEnv`] / [`SimInstant`]: manually advanced virtual clock
//! - [`SimServer`]: scripted realtime backend (echoes sends, answers
//!   creates with `conversation_created`, injectable pushes and errors)
//! - [`SimDriver`]: scripted [`Driver`] implementation
//! - [`fixtures`]: conversation/message/user builders shared by tests

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod fixtures;
mod sim_driver;
mod sim_env;
mod sim_server;

pub use sim_driver::{Observed, ScriptStep, SimDriver, SimDriverError};
pub use sim_env::{SimEnv, SimInstant};
pub use sim_server::{ServerLog, SharedSimServer, SimServer};
