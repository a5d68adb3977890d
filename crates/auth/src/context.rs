//! Authentication context: the single owner of the in-memory session.
//!
//! DESIGN
//! ======
//! One `AuthContext` is created at startup and handed to every consumer that
//! needs it (clones share state). It only changes through two transitions:
//!
//! - `login(session)`:  Anonymous/Authenticated -> Authenticated
//! - `logout()`:        Authenticated/Anonymous -> Anonymous
//!
//! Consumers never read the session store directly; they read the context or
//! subscribe to its `AuthState` stream. The store is written before memory is
//! updated, so "authenticated iff a token is stored" holds at every point a
//! subscriber can observe.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use pragati_core::{AuthState, Session, SessionError, SessionRejected, UserProfile};

use crate::storage::StorageError;
use crate::store::SessionStore;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid session: {0}")]
    InvalidSession(#[from] SessionError),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

struct Inner {
    store: SessionStore,
    session: Mutex<Option<Session>>,
    state_tx: watch::Sender<AuthState>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle to the authentication state.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

impl AuthContext {
    /// Build the context from whatever the store holds right now.
    ///
    /// Partial or corrupt entries are cleared so a stray token cannot outlive
    /// a session that failed to load.
    pub fn initialize(store: SessionStore) -> Self {
        let session = store.load();

        if session.is_none() && store.stored_token().is_some() {
            tracing::warn!("discarding unreadable persisted session");
            if let Err(err) = store.clear() {
                tracing::error!(error = %err, "failed to clear unreadable session");
            }
        }

        let state = AuthState::from_session(session.as_ref());
        tracing::info!(authenticated = state.is_authenticated(), "auth context initialized");

        let (state_tx, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                store,
                session: Mutex::new(session),
                state_tx,
            }),
        }
    }

    /// Become `Authenticated` with `session`.
    ///
    /// The session is validated first; a rejected session leaves both the
    /// store and the current state untouched.
    pub fn login(&self, session: Session) -> Result<(), AuthError> {
        session.validate()?;

        let mut current = self.inner.session();
        self.inner.store.save(&session)?;

        let state = AuthState::from_session(Some(&session));
        tracing::info!(user = %session.user.email, "signed in");
        *current = Some(session);
        self.inner.state_tx.send_replace(state);
        Ok(())
    }

    /// Become `Anonymous`.
    ///
    /// Memory is reset even if clearing storage fails; the storage error is
    /// still returned to the caller.
    pub fn logout(&self) -> Result<(), AuthError> {
        let mut current = self.inner.session();
        let cleared = self.inner.store.clear();

        if let Some(previous) = current.take() {
            tracing::info!(user = %previous.user.email, "signed out");
        }
        self.inner.state_tx.send_replace(AuthState::Anonymous);

        cleared.map_err(AuthError::from)
    }

    pub fn state(&self) -> AuthState {
        self.inner.state_tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session().is_some()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.session().as_ref().map(|s| s.user.clone())
    }

    /// Bearer token of the current session, for authenticated requests.
    pub fn token(&self) -> Option<String> {
        self.inner.session().as_ref().map(|s| s.token.clone())
    }

    /// Receive every subsequent state change (latest value wins).
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state_tx.subscribe()
    }

    /// Force `logout()` whenever the backend rejects the current credential.
    ///
    /// Must be called from within a tokio runtime. The task ends when the
    /// notification channel closes or every handle to this context is gone.
    pub fn watch_expiry(&self, mut rejections: broadcast::Receiver<SessionRejected>) -> JoinHandle<()> {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            loop {
                let rejected = match rejections.recv().await {
                    Ok(rejected) => rejected,
                    // Skipped notices cannot be matched to a session.
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "missed credential rejection notices");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                let Some(inner) = weak.upgrade() else { break };
                let ctx = AuthContext { inner };

                let applies = ctx
                    .inner
                    .session()
                    .as_ref()
                    .is_some_and(|session| rejected.applies_to(session));

                if applies {
                    tracing::warn!(path = %rejected.path, "credential rejected by server; signing out");
                    if let Err(err) = ctx.logout() {
                        tracing::error!(error = %err, "failed to clear session after rejection");
                    }
                }
            }
        })
    }
}

impl core::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &self.state())
            .finish()
    }
}
