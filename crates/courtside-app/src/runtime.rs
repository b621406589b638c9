//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`App`]: the view-model state machine
//! - [`Bridge`]: channel translation
//! - [`Driver`]: platform-specific I/O
//!
//! It is also the session-gating glue: without a token nothing starts, and
//! channel acquisition failures surface without crashing the loop.

use courtside_core::SessionStore;

use crate::{App, AppAction, AppConfig, AppEvent, Bridge, Driver, Notice};

/// Generic runtime that orchestrates App, Bridge, and Driver.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App<D::Instant>,
    bridge: Bridge,
    session: SessionStore,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime with default view-model tuning.
    pub fn new(driver: D, session: SessionStore) -> Self {
        Self::with_config(driver, session, AppConfig::default())
    }

    /// Create a runtime with explicit view-model tuning.
    pub fn with_config(driver: D, session: SessionStore, config: AppConfig) -> Self {
        Self { driver, app: App::new(config), bridge: Bridge::new(), session }
    }

    /// Run the main event loop.
    ///
    /// Returns immediately when no session is available: the missing token
    /// is a silent state (the presentation layer redirects to login), not
    /// an error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        if self.session.token().is_none() {
            tracing::info!("no session available, messaging startup skipped");
            return Ok(());
        }

        self.driver.render(&self.app)?;
        if !self.bootstrap().await? {
            self.driver.stop();
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Acquire the channel, load the profile, and kick off the initial
    /// fetches. Returns `false` when the run cannot proceed (stale
    /// credentials).
    ///
    /// The channel comes first so the joins emitted by the initial
    /// auto-select are actually delivered.
    async fn bootstrap(&mut self) -> Result<bool, D::Error> {
        match self.driver.connect_channel().await {
            Ok(true) => {
                let state = self.driver.channel_state();
                let actions = self.app.handle(AppEvent::ChannelStateChanged(state));
                let _ = self.process_actions(actions).await?;
            }
            Ok(false) => {
                tracing::debug!("no session token, realtime channel not acquired");
            }
            Err(err) => {
                // Auth failures have already cleared the session inside the
                // channel manager; either way the run continues read-only.
                self.driver.notify(&Notice::error(format!("Messaging connection failed: {err}")));
            }
        }

        let user = match self.driver.fetch_profile().await {
            Ok(user) => user,
            Err(err) => {
                if err.is_auth_failure() {
                    tracing::warn!(error = %err, "profile fetch rejected, re-authentication required");
                } else {
                    self.driver.notify(&Notice::error(format!("Failed to load profile: {err}")));
                }
                return Ok(false);
            }
        };

        let actions = self.app.handle(AppEvent::SessionEstablished { user });
        if self.process_actions(actions).await? {
            return Ok(false);
        }

        Ok(true)
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if self.process_actions(actions).await? {
            return Ok(true);
        }

        if let Some(event) = self.driver.next_server_event().await {
            let now = self.driver.now();
            let events = self.bridge.handle_server_event(event, now);
            for event in events {
                let actions = self.app.handle(event);
                if self.process_actions(actions).await? {
                    return Ok(true);
                }
            }
        }

        let state = self.driver.channel_state();
        if state != self.app.channel_state() {
            let actions = self.app.handle(AppEvent::ChannelStateChanged(state));
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        let now = self.driver.now();
        let actions = self.app.handle(AppEvent::Tick { now });
        self.process_actions(actions).await
    }

    /// Process actions returned by the App, including those produced by the
    /// events that resolved fetches feed back in.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Notify(notice) => self.driver.notify(&notice),

                    AppAction::FetchConversations => {
                        let event = match self.driver.fetch_conversations().await {
                            Ok(conversations) => AppEvent::ConversationsLoaded(conversations),
                            Err(err) => {
                                AppEvent::ConversationsFailed { message: err.to_string() }
                            }
                        };
                        pending_actions.extend(self.app.handle(event));
                    }
                    AppAction::FetchDirectory => match self.driver.fetch_directory().await {
                        Ok(users) => {
                            pending_actions.extend(self.app.handle(AppEvent::DirectoryLoaded(users)));
                        }
                        Err(err) => {
                            // Enrichment is best-effort; a failed directory
                            // load never blocks messaging.
                            tracing::warn!(error = %err, "directory fetch failed");
                        }
                    },
                    AppAction::FetchMessages { conversation_id } => {
                        let event = match self.driver.fetch_messages(&conversation_id).await {
                            Ok(messages) => {
                                AppEvent::MessagesLoaded { conversation_id, messages }
                            }
                            Err(err) => AppEvent::MessagesFailed {
                                conversation_id,
                                message: err.to_string(),
                            },
                        };
                        pending_actions.extend(self.app.handle(event));
                    }

                    // Protocol operations go through the bridge.
                    AppAction::JoinConversation { .. }
                    | AppAction::SendMessage { .. }
                    | AppAction::NotifyTypingStarted { .. }
                    | AppAction::NotifyTypingStopped { .. }
                    | AppAction::CreateConversation { .. }
                    | AppAction::CreateGroupConversation { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                        self.flush_outgoing().await;
                    }
                }
            }
        }
        Ok(false)
    }

    /// Send all pending outgoing commands over the channel.
    async fn flush_outgoing(&mut self) {
        for command in self.bridge.take_outgoing() {
            if let Err(err) = self.driver.send_command(command).await {
                tracing::warn!(error = %err, "failed to emit channel command");
            }
        }
    }

    /// Get a reference to the App.
    pub fn app(&self) -> &App<D::Instant> {
        &self.app
    }

    /// Get a mutable reference to the App.
    pub fn app_mut(&mut self) -> &mut App<D::Instant> {
        &mut self.app
    }
}
