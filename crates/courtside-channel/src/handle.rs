//! Handle to a live channel.
//!
//! The handle is the only surface the rest of the client sees: a command
//! sink, an event subscription, and a connection-state subscription. It is
//! cheap to clone; all clones refer to the same underlying connection, which
//! preserves the one-connection-per-process invariant.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::{Notify, broadcast, mpsc, watch};

use crate::{
    ChannelError, ChannelState,
    wire::{ClientCommand, ServerEvent},
};

/// Teardown signal held by the transport side of a connection.
///
/// The handle's `close()` flips this signal; the transport observes it and
/// stops its pumps. Connector implementations create one per connection via
/// [`ChannelHandle::create`].
#[derive(Clone)]
pub struct CloseSignal {
    notify: Arc<Notify>,
    closed: Arc<AtomicBool>,
}

impl CloseSignal {
    /// Completes once the handle has been closed.
    ///
    /// Also completes immediately if the close happened before this call.
    pub async fn closed(&self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.notify.notified().await;
    }

    /// True once the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Clonable handle to the live channel.
pub struct ChannelHandle {
    commands: mpsc::Sender<ClientCommand>,
    events: broadcast::Sender<ServerEvent>,
    state: watch::Receiver<ChannelState>,
    notify: Arc<Notify>,
    closed: Arc<AtomicBool>,
}

impl Clone for ChannelHandle {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            events: self.events.clone(),
            state: self.state.clone(),
            notify: Arc::clone(&self.notify),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl ChannelHandle {
    /// Build a handle and its paired teardown signal.
    ///
    /// `commands` feeds the transport's outbound pump, `events` is the
    /// broadcast the transport publishes inbound events on, and `state`
    /// tracks the connection lifecycle.
    pub fn create(
        commands: mpsc::Sender<ClientCommand>,
        events: broadcast::Sender<ServerEvent>,
        state: watch::Receiver<ChannelState>,
    ) -> (Self, CloseSignal) {
        let notify = Arc::new(Notify::new());
        let closed = Arc::new(AtomicBool::new(false));
        let signal = CloseSignal { notify: Arc::clone(&notify), closed: Arc::clone(&closed) };
        (Self { commands, events, state, notify, closed }, signal)
    }

    /// Emit a command over the channel.
    pub async fn send(&self, command: ClientCommand) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.commands.send(command).await.map_err(|_| ChannelError::Closed)
    }

    /// Subscribe to inbound server events.
    ///
    /// Each subscription sees events from the moment it is created; the
    /// channel never replays history.
    pub fn events(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    /// Subscribe to connection-state changes.
    pub fn state(&self) -> watch::Receiver<ChannelState> {
        self.state.clone()
    }

    /// Current connection state.
    pub fn current_state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Tear the connection down. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_one();
    }

    /// True once the connection is unusable (closed locally, or the
    /// transport side hung up).
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.commands.is_closed()
    }
}

impl std::fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHandle")
            .field("state", &self.current_state())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn handle() -> (ChannelHandle, CloseSignal, mpsc::Receiver<ClientCommand>) {
        let (tx, rx) = mpsc::channel(8);
        let (events, _) = broadcast::channel(8);
        let (_state_tx, state_rx) = watch::channel(ChannelState::Connected);
        let (handle, signal) = ChannelHandle::create(tx, events, state_rx);
        (handle, signal, rx)
    }

    #[tokio::test]
    async fn close_is_idempotent_and_observable() {
        let (h, signal, _rx) = handle();
        assert!(!h.is_closed());

        h.close();
        h.close();
        assert!(h.is_closed());
        assert!(signal.is_closed());
        signal.closed().await;
    }

    #[tokio::test]
    async fn send_after_close_fails_fast() {
        let (h, _signal, _rx) = handle();
        h.close();
        let err = h.send(ClientCommand::Typing { conversation_id: "c1".into() }).await;
        assert_eq!(err, Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn transport_hangup_marks_handle_closed() {
        let (h, _signal, rx) = handle();
        drop(rx);
        assert!(h.is_closed());
    }
}
