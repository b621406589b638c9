//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the production driver but for
//! deterministic testing: REST responses come from fixtures, the channel is
//! an in-memory link to [`SimServer`](crate::SimServer), user intents come
//! from a script, and time comes from [`SimEnv`](crate::SimEnv). It
//! implements [`Driver`] so the same [`courtside_app::Runtime`]
//! orchestration code runs in production and simulation.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use courtside_app::{App, AppAction, Driver, Notice};
use courtside_channel::{ChannelState, wire::{ClientCommand, ServerEvent}};
use courtside_core::{
    ClientError, Environment, SessionStore,
    model::{Conversation, CurrentUser, Message, User},
};

use crate::{SharedSimServer, SimEnv, SimInstant};

/// Error type for the simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One scripted step, applied on each poll cycle.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Select a conversation from the list.
    SelectConversation(String),
    /// Type into the composer.
    Input(String),
    /// Submit the composed message.
    SendMessage,
    /// Open the "new message" dialog.
    OpenDialog,
    /// Pick a recipient for a 1:1 conversation.
    StartConversation(String),
    /// Submit the group-creation form.
    CreateGroup {
        /// Group name as entered.
        name: String,
        /// Selected recipients.
        recipients: Vec<String>,
    },
    /// Advance the virtual clock.
    AdvanceTime(Duration),
    /// Inject an unsolicited server push.
    PushServer(ServerEvent),
}

/// Everything the driver observed, inspectable after the run.
#[derive(Debug, Default)]
pub struct Observed {
    /// Notifications surfaced to the user.
    pub notices: Vec<Notice>,
    /// Render count.
    pub renders: usize,
    /// Commands dropped because no channel was live.
    pub dropped_commands: usize,
}

/// Scripted [`Driver`] implementation.
pub struct SimDriver {
    env: SimEnv,
    server: SharedSimServer,
    session: SessionStore,
    profile: Result<CurrentUser, ClientError>,
    conversations: Vec<Conversation>,
    directory: Vec<User>,
    messages: HashMap<String, Vec<Message>>,
    script: VecDeque<ScriptStep>,
    channel_connected: bool,
    observed: Arc<Mutex<Observed>>,
}

impl SimDriver {
    /// Driver with empty fixtures and no profile.
    pub fn new(session: SessionStore, server: SharedSimServer) -> Self {
        Self {
            env: SimEnv::new(),
            server,
            session,
            profile: Err(ClientError::auth("no profile fixture")),
            conversations: Vec::new(),
            directory: Vec::new(),
            messages: HashMap::new(),
            script: VecDeque::new(),
            channel_connected: false,
            observed: Arc::new(Mutex::new(Observed::default())),
        }
    }

    /// Set the profile fixture.
    #[must_use]
    pub fn with_profile(mut self, user: CurrentUser) -> Self {
        self.profile = Ok(user);
        self
    }

    /// Set the conversation-listing fixture.
    #[must_use]
    pub fn with_conversations(mut self, conversations: Vec<Conversation>) -> Self {
        self.conversations = conversations;
        self
    }

    /// Set the directory fixture.
    #[must_use]
    pub fn with_directory(mut self, directory: Vec<User>) -> Self {
        self.directory = directory;
        self
    }

    /// Set a conversation's history fixture.
    #[must_use]
    pub fn with_messages(mut self, conversation_id: &str, messages: Vec<Message>) -> Self {
        self.messages.insert(conversation_id.to_string(), messages);
        self
    }

    /// Append script steps.
    #[must_use]
    pub fn with_script(mut self, steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        self.script.extend(steps);
        self
    }

    /// The virtual clock.
    pub fn env(&self) -> SimEnv {
        self.env.clone()
    }

    /// Handle for post-run inspection of notices and renders.
    pub fn observed(&self) -> Arc<Mutex<Observed>> {
        Arc::clone(&self.observed)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(
        &mut self,
        app: &mut App<SimInstant>,
    ) -> Result<Vec<AppAction>, SimDriverError> {
        let Some(step) = self.script.pop_front() else {
            // Drain pending pushes before ending the run.
            if self.server.has_pending_pushes() {
                return Ok(vec![]);
            }
            return Ok(vec![AppAction::Quit]);
        };

        let actions = match step {
            ScriptStep::SelectConversation(id) => app.select_conversation(id),
            ScriptStep::Input(text) => app.input_changed(text, self.env.now()),
            ScriptStep::SendMessage => app.send_message(),
            ScriptStep::OpenDialog => app.open_dialog(),
            ScriptStep::StartConversation(recipient) => app.start_conversation(recipient),
            ScriptStep::CreateGroup { name, recipients } => app.create_group(name, recipients),
            ScriptStep::AdvanceTime(duration) => {
                self.env.advance(duration);
                vec![]
            }
            ScriptStep::PushServer(event) => {
                self.server.push(event);
                vec![]
            }
        };
        Ok(actions)
    }

    async fn fetch_profile(&mut self) -> Result<CurrentUser, ClientError> {
        self.profile.clone()
    }

    async fn fetch_conversations(&mut self) -> Result<Vec<Conversation>, ClientError> {
        Ok(self.conversations.clone())
    }

    async fn fetch_directory(&mut self) -> Result<Vec<User>, ClientError> {
        Ok(self.directory.clone())
    }

    async fn fetch_messages(&mut self, conversation_id: &str) -> Result<Vec<Message>, ClientError> {
        Ok(self.messages.get(conversation_id).cloned().unwrap_or_default())
    }

    async fn connect_channel(&mut self) -> Result<bool, ClientError> {
        if self.session.token().is_none() {
            return Ok(false);
        }
        self.channel_connected = true;
        Ok(true)
    }

    fn channel_state(&self) -> ChannelState {
        if self.channel_connected { ChannelState::Connected } else { ChannelState::Absent }
    }

    async fn send_command(&mut self, command: ClientCommand) -> Result<(), ClientError> {
        if !self.channel_connected {
            self.observed.lock().unwrap_or_else(PoisonError::into_inner).dropped_commands += 1;
            return Err(ClientError::Transport("channel not connected".to_string()));
        }
        self.server.handle_command(command);
        Ok(())
    }

    async fn next_server_event(&mut self) -> Option<ServerEvent> {
        if !self.channel_connected {
            return None;
        }
        self.server.pop_push()
    }

    fn now(&self) -> SimInstant {
        self.env.now()
    }

    fn render(&mut self, _app: &App<SimInstant>) -> Result<(), SimDriverError> {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner).renders += 1;
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner).notices.push(notice.clone());
    }

    fn stop(&mut self) {
        self.channel_connected = false;
    }
}
