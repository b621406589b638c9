//! Live driver: REST over HTTP, WebSocket channel, real clock.

use std::{convert::Infallible, time::Duration, time::Instant};

use courtside_api::ApiClient;
use courtside_app::{App, AppAction, Driver, Notice, NoticeKind};
use courtside_channel::{
    ChannelHandle, ChannelManager, ChannelState,
    transport::WsConnector,
    wire::{ClientCommand, ServerEvent},
};
use courtside_core::{ClientError, Environment};
use tokio::sync::broadcast;

use crate::system_env::SystemEnv;

/// Loop cadence: how often the runtime ticks when idle.
const TICK: Duration = Duration::from_millis(200);

/// Production [`Driver`] composing the REST client and the channel manager.
///
/// This runner is a protocol monitor, not a UI: renders and notifications
/// go to the log, and there is no interactive input source.
pub struct LiveDriver {
    api: ApiClient,
    manager: ChannelManager<WsConnector>,
    handle: Option<ChannelHandle>,
    events: Option<broadcast::Receiver<ServerEvent>>,
    env: SystemEnv,
}

impl LiveDriver {
    /// Driver over the given REST client and channel manager.
    pub fn new(api: ApiClient, manager: ChannelManager<WsConnector>) -> Self {
        Self { api, manager, handle: None, events: None, env: SystemEnv }
    }
}

impl Driver for LiveDriver {
    type Error = Infallible;
    type Instant = Instant;

    async fn poll_event(&mut self, _app: &mut App<Instant>) -> Result<Vec<AppAction>, Infallible> {
        // No interactive input source; pace the loop instead.
        self.env.sleep(TICK).await;
        Ok(vec![])
    }

    async fn fetch_profile(&mut self) -> Result<courtside_core::model::CurrentUser, ClientError> {
        self.api.profile().await.map_err(ClientError::from)
    }

    async fn fetch_conversations(
        &mut self,
    ) -> Result<Vec<courtside_core::model::Conversation>, ClientError> {
        self.api.conversations().await.map_err(ClientError::from)
    }

    async fn fetch_directory(&mut self) -> Result<Vec<courtside_core::model::User>, ClientError> {
        self.api.non_admin_users().await.map_err(ClientError::from)
    }

    async fn fetch_messages(
        &mut self,
        conversation_id: &str,
    ) -> Result<Vec<courtside_core::model::Message>, ClientError> {
        self.api.conversation_messages(conversation_id).await.map_err(ClientError::from)
    }

    async fn connect_channel(&mut self) -> Result<bool, ClientError> {
        match self.manager.acquire().await {
            Ok(Some(handle)) => {
                self.events = Some(handle.events());
                self.handle = Some(handle);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => Err(ClientError::from(err)),
        }
    }

    fn channel_state(&self) -> ChannelState {
        self.manager.state()
    }

    async fn send_command(&mut self, command: ClientCommand) -> Result<(), ClientError> {
        match &self.handle {
            Some(handle) => handle.send(command).await.map_err(ClientError::from),
            None => Err(ClientError::Transport("channel not acquired".to_string())),
        }
    }

    async fn next_server_event(&mut self) -> Option<ServerEvent> {
        let events = self.events.as_mut()?;
        match tokio::time::timeout(TICK, events.recv()).await {
            Ok(Ok(event)) => Some(event),
            Ok(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                tracing::warn!(skipped, "channel event subscriber lagged");
                None
            }
            Ok(Err(broadcast::error::RecvError::Closed)) => {
                self.events = None;
                None
            }
            Err(_) => None,
        }
    }

    fn now(&self) -> Instant {
        self.env.now()
    }

    fn render(&mut self, app: &App<Instant>) -> Result<(), Infallible> {
        let active = app
            .active_conversation()
            .map_or_else(|| "none".to_string(), |c| app.conversation_title(c));
        tracing::debug!(
            channel = %app.channel_state(),
            conversations = app.conversations().len(),
            active = %active,
            messages = app.messages().len(),
            peer_typing = app.is_peer_typing(),
            "state"
        );
        if let Some(last) = app.messages().last() {
            tracing::info!(from = %last.sender_name(), content = %last.content, "message");
        }
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Error => tracing::error!(message = %notice.message, "notice"),
            NoticeKind::Info | NoticeKind::Success => {
                tracing::info!(message = %notice.message, "notice");
            }
        }
    }

    fn stop(&mut self) {
        self.events = None;
        self.handle = None;
        self.manager.release();
    }
}
