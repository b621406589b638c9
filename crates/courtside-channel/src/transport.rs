//! WebSocket transport for the realtime channel.
//!
//! Provides [`WsConnector`], the production [`Connector`]: it opens a
//! WebSocket to the messaging backend with the bearer token presented at
//! connection time, then spawns a task that pumps commands out and events
//! in. Transport drops are retried transparently with fixed backoff up to a
//! bounded attempt budget; when the budget runs out the handle closes and
//! the next `acquire()` starts fresh.
//!
//! Protocol logic stays out of this module: frames are JSON-encoded
//! [`wire`](crate::wire) values and nothing here interprets them.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{broadcast, mpsc, watch},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        self, Message,
        client::IntoClientRequest,
        http::{HeaderValue, StatusCode, header},
    },
};

use crate::{
    ChannelError, ChannelHandle, ChannelState, CloseSignal, Connector,
    wire::{ClientCommand, ServerEvent},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Outbound command buffer depth.
const COMMAND_BUFFER: usize = 32;

/// Inbound event fan-out buffer depth per subscriber.
const EVENT_BUFFER: usize = 64;

/// Transport tuning.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bound on a single connection attempt, initial or reconnect.
    pub connect_timeout: Duration,
    /// Reconnect attempts after a transport drop before giving up.
    pub reconnect_attempts: u32,
    /// Fixed delay between reconnect attempts.
    pub reconnect_backoff: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            reconnect_attempts: 5,
            reconnect_backoff: Duration::from_secs(2),
        }
    }
}

/// WebSocket [`Connector`] for production use.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
    config: TransportConfig,
}

impl WsConnector {
    /// Connector for the given `ws://` or `wss://` endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), config: TransportConfig::default() }
    }

    /// Connector with explicit transport tuning.
    pub fn with_config(url: impl Into<String>, config: TransportConfig) -> Self {
        Self { url: url.into(), config }
    }
}

impl Connector for WsConnector {
    async fn connect(&self, token: String) -> Result<ChannelHandle, ChannelError> {
        let socket = open_socket(&self.url, &token, self.config.connect_timeout).await?;

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);
        let (state_tx, state_rx) = watch::channel(ChannelState::Connected);
        let (handle, close) = ChannelHandle::create(commands_tx, events_tx.clone(), state_rx);

        tokio::spawn(run_connection(
            self.url.clone(),
            token,
            self.config.clone(),
            socket,
            commands_rx,
            events_tx,
            state_tx,
            close,
        ));

        Ok(handle)
    }
}

/// Open a socket with the bearer token in the handshake.
async fn open_socket(
    url: &str,
    token: &str,
    connect_timeout: Duration,
) -> Result<WsStream, ChannelError> {
    let mut request = url
        .into_client_request()
        .map_err(|err| ChannelError::Connect(format!("invalid channel url: {err}")))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|err| ChannelError::Connect(format!("invalid token header: {err}")))?;
    request.headers_mut().insert(header::AUTHORIZATION, bearer);

    let handshake = tokio::time::timeout(connect_timeout, connect_async(request))
        .await
        .map_err(|_| ChannelError::Connect(format!("handshake timed out after {connect_timeout:?}")))?;

    match handshake {
        Ok((socket, _response)) => Ok(socket),
        Err(err) => Err(classify_handshake_error(err)),
    }
}

/// Split authentication rejections from plain transport failures.
///
/// Authentication failures are terminal: the manager clears the session and
/// the caller re-authenticates instead of retrying.
fn classify_handshake_error(err: tungstenite::Error) -> ChannelError {
    match err {
        tungstenite::Error::Http(response)
            if response.status() == StatusCode::UNAUTHORIZED
                || response.status() == StatusCode::FORBIDDEN =>
        {
            ChannelError::Auth { reason: format!("handshake rejected with {}", response.status()) }
        }
        other => ChannelError::Connect(other.to_string()),
    }
}

enum PumpEnd {
    /// The handle was closed locally.
    Closed,
    /// Every handle clone was dropped.
    Abandoned,
    /// The transport failed; eligible for reconnect.
    Dropped(String),
}

#[allow(clippy::too_many_arguments)]
async fn run_connection(
    url: String,
    token: String,
    config: TransportConfig,
    mut socket: WsStream,
    mut commands: mpsc::Receiver<ClientCommand>,
    events: broadcast::Sender<ServerEvent>,
    state: watch::Sender<ChannelState>,
    close: CloseSignal,
) {
    loop {
        match pump(&mut socket, &mut commands, &events, &close).await {
            PumpEnd::Closed | PumpEnd::Abandoned => {
                let _ = socket.close(None).await;
                let _ = state.send(ChannelState::Absent);
                return;
            }
            PumpEnd::Dropped(reason) => {
                tracing::warn!(%reason, "realtime transport dropped");
                let _ = state.send(ChannelState::Disconnected);
                match reconnect(&url, &token, &config, &close).await {
                    Some(next) => {
                        socket = next;
                        let _ = state.send(ChannelState::Connected);
                    }
                    None => {
                        let _ = state.send(ChannelState::Absent);
                        return;
                    }
                }
            }
        }
    }
}

/// Pump commands out and events in until something ends the session.
async fn pump(
    socket: &mut WsStream,
    commands: &mut mpsc::Receiver<ClientCommand>,
    events: &broadcast::Sender<ServerEvent>,
    close: &CloseSignal,
) -> PumpEnd {
    loop {
        tokio::select! {
            () = close.closed() => return PumpEnd::Closed,

            command = commands.recv() => match command {
                None => return PumpEnd::Abandoned,
                Some(command) => {
                    let text = match serde_json::to_string(&command) {
                        Ok(text) => text,
                        Err(err) => {
                            tracing::warn!(error = %err, "dropping unencodable command");
                            continue;
                        }
                    };
                    if let Err(err) = socket.send(Message::Text(text)).await {
                        return PumpEnd::Dropped(err.to_string());
                    }
                }
            },

            inbound = socket.next() => match inbound {
                None => return PumpEnd::Dropped("server closed the stream".to_string()),
                Some(Err(err)) => return PumpEnd::Dropped(err.to_string()),
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(event) => {
                        // No subscribers is fine; events are fire-and-forget.
                        let _ = events.send(event);
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "ignoring unrecognized channel event");
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(err) = socket.send(Message::Pong(payload)).await {
                        return PumpEnd::Dropped(err.to_string());
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    return PumpEnd::Dropped("server closed the connection".to_string());
                }
                Some(Ok(_)) => {}
            },
        }
    }
}

/// Bounded fixed-backoff reconnect. Returns `None` when the budget is
/// exhausted or the handle closed while waiting.
async fn reconnect(
    url: &str,
    token: &str,
    config: &TransportConfig,
    close: &CloseSignal,
) -> Option<WsStream> {
    for attempt in 1..=config.reconnect_attempts {
        tokio::select! {
            () = close.closed() => return None,
            () = tokio::time::sleep(config.reconnect_backoff) => {}
        }
        match open_socket(url, token, config.connect_timeout).await {
            Ok(socket) => {
                tracing::debug!(attempt, "realtime transport reconnected");
                return Some(socket);
            }
            Err(err) => {
                tracing::warn!(attempt, error = %err, "reconnect attempt failed");
            }
        }
    }
    tracing::warn!(budget = config.reconnect_attempts, "reconnect budget exhausted");
    None
}
