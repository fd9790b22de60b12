//! Session store: the single writer of [`SessionState`].
//!
//! The UI keeps its state in a reactive signal, services and tests keep it in
//! [`MemorySessionStore`]. Both only implement [`SessionStore::snapshot`] and
//! [`SessionStore::dispatch`]; the named transitions are provided on top.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::state::{AuthAction, SessionState, TokenSet};

/// Owner of a session's state. Every mutation goes through [`dispatch`](Self::dispatch).
pub trait SessionStore {
    /// Copy of the current state.
    fn snapshot(&self) -> SessionState;

    /// Apply one action atomically.
    fn dispatch(&self, action: AuthAction);

    fn set_tokens(&self, id_token: String, access_token: String, refresh_token: String) {
        self.dispatch(AuthAction::SetTokens(TokenSet {
            id_token,
            access_token,
            refresh_token,
        }));
    }

    fn set_auth_code(&self, code: Option<String>) {
        self.dispatch(AuthAction::SetAuthCode(code));
    }

    fn set_authenticated(&self, is_authenticated: bool) {
        self.dispatch(AuthAction::SetAuthenticated(is_authenticated));
    }

    fn exchange_failed(&self, message: String) {
        self.dispatch(AuthAction::ExchangeFailed(message));
    }

    fn clear(&self) {
        self.dispatch(AuthAction::Clear);
    }

    /// Clear the session, but only if it is authenticated.
    fn logout(&self) {
        if self.snapshot().is_authenticated {
            tracing::info!("Logging out");
            self.clear();
        }
    }
}

/// In-memory session store for services and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    dispatches: usize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions applied so far.
    pub fn dispatch_count(&self) -> usize {
        self.lock().dispatches
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The state is replaced wholesale by `apply`, so a poisoned lock still
        // holds a complete value.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    fn dispatch(&self, action: AuthAction) {
        let mut inner = self.lock();
        inner.state.apply(action);
        inner.dispatches += 1;
    }
}
