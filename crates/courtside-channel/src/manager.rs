//! Token-gated channel acquisition with single-flight deduplication.
//!
//! The manager is the only component allowed to create or destroy the
//! realtime connection. It enforces two invariants:
//!
//! - at most one live connection per process, and
//! - at most one connection attempt in flight; concurrent `acquire()`
//!   callers attach to the pending attempt and all resolve to its outcome.
//!
//! No token means no attempt: `acquire()` resolves to `Ok(None)` without
//! touching the network, and the caller treats the missing session as a
//! silent state. An attempt whose failure is classified as an
//! authentication failure clears the session as a side effect.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use courtside_core::SessionStore;
use tokio::sync::watch;

use crate::{ChannelError, ChannelHandle, ChannelState};

/// Outcome of a channel acquisition.
pub type AcquireResult = Result<Option<ChannelHandle>, ChannelError>;

/// Transport seam for the manager.
///
/// Production uses the WebSocket connector from the `transport` feature;
/// tests use in-memory implementations. The returned future must resolve in
/// bounded time (the transport owns its own timeout).
pub trait Connector: Send + Sync + 'static {
    /// Open a connection authenticated with `token`.
    fn connect(
        &self,
        token: String,
    ) -> impl std::future::Future<Output = Result<ChannelHandle, ChannelError>> + Send;
}

enum Phase {
    Absent,
    Acquiring { outcome: watch::Receiver<Option<AcquireResult>> },
    Connected(ChannelHandle),
}

struct Slot {
    phase: Phase,
    /// Bumped by `release()` and by each new attempt; an attempt only
    /// installs its connection if the generation it started under is still
    /// current, so a teardown during `Acquiring` cannot be resurrected.
    generation: u64,
}

struct ManagerInner<C> {
    connector: C,
    session: SessionStore,
    slot: Mutex<Slot>,
}

impl<C> ManagerInner<C> {
    fn release(&self) {
        let handle = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.generation = slot.generation.wrapping_add(1);
            match std::mem::replace(&mut slot.phase, Phase::Absent) {
                Phase::Connected(handle) => Some(handle),
                Phase::Absent | Phase::Acquiring { .. } => None,
            }
        };
        if let Some(handle) = handle {
            handle.close();
        }
    }
}

/// Channel manager: owns the process-wide realtime connection.
pub struct ChannelManager<C> {
    inner: Arc<ManagerInner<C>>,
}

impl<C> Clone for ChannelManager<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

enum Role {
    Resolved(AcquireResult),
    Follower { generation: u64, outcome: watch::Receiver<Option<AcquireResult>> },
    Leader { token: String, generation: u64, outcome: watch::Sender<Option<AcquireResult>> },
}

impl<C: Connector> ChannelManager<C> {
    /// Create a manager bound to the given session.
    ///
    /// Registers a session-clear observer so a logout or rejected token
    /// tears the live channel down immediately.
    pub fn new(connector: C, session: SessionStore) -> Self {
        let manager = Self {
            inner: Arc::new(ManagerInner {
                connector,
                session: session.clone(),
                slot: Mutex::new(Slot { phase: Phase::Absent, generation: 0 }),
            }),
        };
        let weak: Weak<ManagerInner<C>> = Arc::downgrade(&manager.inner);
        session.on_clear(move || {
            if let Some(inner) = weak.upgrade() {
                inner.release();
            }
        });
        manager
    }

    /// Acquire the live channel.
    ///
    /// Returns the existing handle when one is live, `Ok(None)` when no
    /// token is present (without attempting a connection), and otherwise
    /// the outcome of the single in-flight attempt. Never opens a second
    /// socket while one is `Connected` or `Acquiring`.
    pub async fn acquire(&self) -> AcquireResult {
        let role = {
            let mut slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
            match &slot.phase {
                Phase::Connected(handle) if !handle.is_closed() => {
                    Role::Resolved(Ok(Some(handle.clone())))
                }
                Phase::Acquiring { outcome } => {
                    Role::Follower { generation: slot.generation, outcome: outcome.clone() }
                }
                Phase::Absent | Phase::Connected(_) => match self.inner.session.token() {
                    None => {
                        slot.phase = Phase::Absent;
                        Role::Resolved(Ok(None))
                    }
                    Some(token) => {
                        slot.generation = slot.generation.wrapping_add(1);
                        let (tx, rx) = watch::channel(None);
                        slot.phase = Phase::Acquiring { outcome: rx };
                        Role::Leader { token, generation: slot.generation, outcome: tx }
                    }
                },
            }
        };

        match role {
            Role::Resolved(result) => result,
            Role::Follower { generation, outcome } => self.await_outcome(generation, outcome).await,
            Role::Leader { token, generation, outcome } => {
                self.run_attempt(token, generation, &outcome).await
            }
        }
    }

    /// Forcibly disconnect and return to `Absent`. Idempotent.
    pub fn release(&self) {
        self.inner.release();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChannelState {
        let slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match &slot.phase {
            Phase::Absent => ChannelState::Absent,
            Phase::Acquiring { .. } => ChannelState::Acquiring,
            Phase::Connected(handle) => {
                if handle.is_closed() {
                    ChannelState::Absent
                } else {
                    handle.current_state()
                }
            }
        }
    }

    /// Wait for the in-flight attempt this caller attached to.
    async fn await_outcome(
        &self,
        generation: u64,
        mut rx: watch::Receiver<Option<AcquireResult>>,
    ) -> AcquireResult {
        loop {
            let resolved = rx.borrow_and_update().clone();
            if let Some(result) = resolved {
                return result;
            }
            if rx.changed().await.is_err() {
                // The leader was dropped without resolving. Reset the slot
                // so the next acquire() can start a fresh attempt, unless a
                // newer attempt or a release already superseded this one.
                let mut slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
                if slot.generation == generation {
                    slot.generation = slot.generation.wrapping_add(1);
                    slot.phase = Phase::Absent;
                }
                return Err(ChannelError::Closed);
            }
        }
    }

    async fn run_attempt(
        &self,
        token: String,
        generation: u64,
        outcome: &watch::Sender<Option<AcquireResult>>,
    ) -> AcquireResult {
        let connected = self.inner.connector.connect(token).await;

        let (result, clear_session) = {
            let mut slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation != generation {
                // Released while the attempt was in flight: discard it.
                if let Ok(handle) = &connected {
                    handle.close();
                }
                (Ok(None), false)
            } else {
                match connected {
                    Ok(handle) => {
                        slot.phase = Phase::Connected(handle.clone());
                        (Ok(Some(handle)), false)
                    }
                    Err(err) => {
                        slot.phase = Phase::Absent;
                        let auth = err.is_auth_failure();
                        if auth {
                            tracing::warn!(error = %err, "channel handshake rejected, clearing session");
                        } else {
                            tracing::warn!(error = %err, "channel connect failed");
                        }
                        (Err(err), auth)
                    }
                }
            }
        };

        // Outside the slot lock: clear-observers call back into release().
        if clear_session {
            self.inner.session.clear();
        }
        let _ = outcome.send(Some(result.clone()));
        result
    }
}

impl<C> std::fmt::Debug for ChannelManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let phase = match &slot.phase {
            Phase::Absent => "absent",
            Phase::Acquiring { .. } => "acquiring",
            Phase::Connected(_) => "connected",
        };
        f.debug_struct("ChannelManager").field("phase", &phase).finish()
    }
}
