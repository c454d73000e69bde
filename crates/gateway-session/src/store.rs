//! Session snapshot maintenance
//!
//! Subscribes to the chosen client's auth-change notifications and keeps the
//! current user/session in a watch channel for the rest of the UI. The store
//! neither knows nor cares whether the handle wraps the mock or the real
//! client.

use gateway_core::{AuthData, AuthError, AuthEvent, BackendHandle, Session, User};
use std::sync::Arc;
use tokio::sync::watch;

/// What the UI knows about the signed-in user right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Signed-in user, if any
    pub user: Option<User>,
    /// Their session, if any
    pub session: Option<Session>,
    /// True until the initial session read has resolved
    pub loading: bool,
}

impl SessionState {
    fn resolving() -> Self {
        Self {
            user: None,
            session: None,
            loading: true,
        }
    }

    fn from_session(session: Option<Session>) -> Self {
        Self {
            user: session.as_ref().map(|s| s.user.clone()),
            session,
            loading: false,
        }
    }

    /// Whether a user is signed in
    #[inline]
    #[must_use]
    pub fn signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Maintains the current session for UI consumers.
pub struct AuthSessionStore {
    handle: BackendHandle,
    state_tx: watch::Sender<SessionState>,
    subscription: gateway_core::AuthSubscription,
}

impl AuthSessionStore {
    /// Subscribe to `handle`'s auth changes and prime the snapshot from the
    /// current session. A store attached after sign-in converges through the
    /// client's late-subscriber replay as well.
    #[must_use]
    pub fn attach(handle: BackendHandle) -> Self {
        let (state_tx, _) = watch::channel(SessionState::resolving());

        let listener_tx = state_tx.clone();
        let subscription = handle.auth().on_auth_state_change(Arc::new(move |event, session| {
            tracing::debug!(event = %event, "session store observed auth change");
            let state = match event {
                AuthEvent::SignedIn => SessionState::from_session(session),
                AuthEvent::SignedOut => SessionState::from_session(None),
            };
            let _ = listener_tx.send(state);
        }));

        // Initial resolve: the session read is direct state, so loading
        // clears before any deferred notification lands.
        let _ = state_tx.send(SessionState::from_session(handle.auth().get_session()));

        Self {
            handle,
            state_tx,
            subscription,
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Watch receiver for UI subscriptions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// The handle this store observes
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &BackendHandle {
        &self.handle
    }

    /// Sign in and publish the new state without waiting for the deferred
    /// notification.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthData, AuthError> {
        let data = self.handle.auth().sign_in_with_password(email, password).await?;
        let _ = self
            .state_tx
            .send(SessionState::from_session(Some(data.session.clone())));
        Ok(data)
    }

    /// Create an account, sign it in, and publish the new state.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthData, AuthError> {
        let data = self.handle.auth().sign_up(email, password).await?;
        let _ = self
            .state_tx
            .send(SessionState::from_session(Some(data.session.clone())));
        Ok(data)
    }

    /// Sign out and publish the cleared state.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.handle.auth().sign_out().await?;
        let _ = self.state_tx.send(SessionState::from_session(None));
        Ok(())
    }

    /// Stop observing auth changes. Idempotent; the snapshot freezes at its
    /// last value.
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}

impl Drop for AuthSessionStore {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl std::fmt::Debug for AuthSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionStore")
            .field("state", &self.current())
            .finish()
    }
}
