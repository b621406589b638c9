//! REST resource client for Courtside
//!
//! Typed, thin wrappers around the remote REST service: auth and profile,
//! the post feed with page-based pagination, comments and likes, the follow
//! graph, events, the leaderboard, the user directory, and conversation /
//! message history.
//!
//! Design constraints carried by every endpoint:
//!
//! - Authenticated calls fail fast with [`ApiError::Unauthorized`] when no
//!   session token is present; a stale token is never sent.
//! - A 401-equivalent response clears the session and surfaces as
//!   [`ApiError::Unauthorized`]; the caller redirects to re-authenticate.
//! - No automatic retries: REST failures surface to the caller as
//!   user-visible errors.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod conversations;
mod directory;
mod error;
mod feed;
mod social;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use feed::FeedPager;
pub use types::{
    AuthSession, Comment, Credentials, Event, FeedPage, LeaderboardEntry, Pagination, Post,
    Registration,
};
