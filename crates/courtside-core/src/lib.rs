//! Core domain types for Courtside
//!
//! Shared foundation for the client crates: the domain model (users,
//! participants, conversations, messages), the authenticated session store,
//! the error taxonomy, and the environment abstraction that keeps protocol
//! logic free of direct clock access.
//!
//! # Components
//!
//! - [`model`]: Conversation/message/user types and the pure helpers the
//!   view-model relies on (display-name resolution, participant enrichment,
//!   list upsert)
//! - [`SessionStore`]: Dependency-injected token state shared by the REST
//!   client and the realtime channel
//! - [`Environment`]: Time abstraction for production and simulation
//! - [`ClientError`]: Error taxonomy with authentication classification

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
mod error;
pub mod model;
mod session;

pub use env::Environment;
pub use error::ClientError;
pub use session::{MemoryTokenStore, SessionStore, TokenStore};
