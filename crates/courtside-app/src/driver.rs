//! Driver trait for abstracting platform I/O.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait; the generic
//! [`Runtime`](crate::Runtime) handles orchestration, so the same code runs
//! in production and in deterministic simulation.
//!
//! # Implementations
//!
//! - **Headless runner**: REST over HTTP, WebSocket channel, real clock
//! - **Simulation**: scripted fixtures, in-memory channel, virtual clock

use std::{future::Future, ops::Sub, time::Duration};

use courtside_channel::{
    ChannelState,
    wire::{ClientCommand, ServerEvent},
};
use courtside_core::{
    ClientError,
    model::{Conversation, CurrentUser, Message, User},
};

use crate::{App, AppAction, Notice};

/// Abstracts I/O operations for the application runtime.
///
/// REST fetches resolve with [`ClientError`] so the runtime can translate
/// failures into app events; [`Driver::Error`] is reserved for
/// platform-level faults (rendering, event sources) that end the run.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Poll for user intents.
    ///
    /// Implementations interpret their input source (script, stdin, UI)
    /// and call the [`App`] intent methods, returning the produced actions.
    /// Must resolve in bounded time with an empty vec when idle so the
    /// runtime keeps ticking.
    fn poll_event(
        &mut self,
        app: &mut App<Self::Instant>,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Fetch the authenticated user's profile.
    fn fetch_profile(&mut self) -> impl Future<Output = Result<CurrentUser, ClientError>> + Send;

    /// Fetch the conversation listing.
    fn fetch_conversations(
        &mut self,
    ) -> impl Future<Output = Result<Vec<Conversation>, ClientError>> + Send;

    /// Fetch the non-administrative user directory.
    fn fetch_directory(&mut self) -> impl Future<Output = Result<Vec<User>, ClientError>> + Send;

    /// Fetch a conversation's message history.
    fn fetch_messages(
        &mut self,
        conversation_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, ClientError>> + Send;

    /// Acquire the realtime channel.
    ///
    /// Resolves `Ok(false)` when no session token is present (no attempt is
    /// made); `Ok(true)` once a channel is live.
    fn connect_channel(&mut self) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Current channel lifecycle state.
    fn channel_state(&self) -> ChannelState;

    /// Emit a command over the channel.
    fn send_command(
        &mut self,
        command: ClientCommand,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Receive the next inbound channel event.
    ///
    /// Must resolve in bounded time with `None` when nothing is pending so
    /// the runtime keeps ticking.
    fn next_server_event(&mut self) -> impl Future<Output = Option<ServerEvent>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the application state.
    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error>;

    /// Surface a notification to the user.
    fn notify(&mut self, notice: &Notice);

    /// Release the channel and clean up resources.
    fn stop(&mut self);
}
