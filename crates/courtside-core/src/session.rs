//! Authenticated session state.
//!
//! A single process-wide session backs every outbound REST request and every
//! realtime connection attempt. The store is an explicitly owned handle that
//! is cloned into whatever component needs it, never module-level shared
//! state: lifecycle stays visible and tests can construct isolated sessions.
//!
//! Only the login/registration/OAuth-callback success path may set the token,
//! and only logout or the 401 handler may clear it. Everything else reads.
//!
//! Clearing the token fires registered teardown observers exactly once per
//! actual clear (a clear of an already-empty session is a no-op), so a live
//! realtime channel is released when credentials die.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Persistent storage for the session token.
///
/// Models the host's key-value store (a browser's local storage, a token
/// file on disk). Reads and writes are synchronous; implementations log
/// failures and degrade to "no token" rather than surfacing errors, because
/// the absence of a token is a silent state, not a fault.
pub trait TokenStore: Send + Sync + 'static {
    /// Load the persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist the token.
    fn save(&self, token: &str);

    /// Remove the persisted token.
    fn clear(&self);
}

/// In-memory token store.
///
/// Used by tests and by hosts without persistent storage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

type ClearObserver = Arc<dyn Fn() + Send + Sync>;

struct SessionInner {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
    on_clear: Mutex<Vec<ClearObserver>>,
}

/// Shared handle to the authenticated session.
///
/// Cheap to clone; all clones observe the same token. Reads are synchronous
/// and side-effect free.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Create a session backed by the given token store.
    ///
    /// The persisted token (if any) is loaded eagerly so `token()` stays a
    /// synchronous read.
    pub fn new(store: impl TokenStore) -> Self {
        let token = store.load();
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                store: Box::new(store),
                on_clear: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current token. `None` means no session; callers skip authenticated
    /// work rather than treating this as an error.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// True if a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Install the token after a successful login, registration, or OAuth
    /// callback.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.inner.store.save(&token);
        *self.inner.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Clear the session (logout or rejected credentials).
    ///
    /// Idempotent: observers fire only when a token was actually present.
    pub fn clear(&self) {
        let had_token = {
            let mut guard = self.inner.token.write().unwrap_or_else(PoisonError::into_inner);
            guard.take().is_some()
        };
        self.inner.store.clear();
        if !had_token {
            return;
        }
        tracing::debug!("session cleared");
        let observers: Vec<ClearObserver> = {
            let guard = self.inner.on_clear.lock().unwrap_or_else(PoisonError::into_inner);
            guard.clone()
        };
        for observer in observers {
            observer();
        }
    }

    /// Register a teardown observer invoked whenever the session is
    /// actually cleared. The realtime channel manager uses this to release
    /// its connection when credentials die.
    pub fn on_clear(&self, observer: impl Fn() + Send + Sync + 'static) {
        self.inner
            .on_clear
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("authenticated", &self.is_authenticated()).finish()
    }
}
