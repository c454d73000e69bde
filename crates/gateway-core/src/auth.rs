//! Auth capability trait and listener plumbing
//!
//! Both the real-client adapter and the mock client implement [`AuthBackend`].
//! Listener notifications are asynchronous by contract: an implementation must
//! never invoke a listener synchronously inside the call that triggered the
//! change. A caller that signs in and immediately reads `get_session` sees the
//! new session; its listener fires on a later turn of the executor.

use crate::error::AuthError;
use crate::types::{AuthData, AuthEvent, Session, User};
use parking_lot::Mutex;
use std::sync::Arc;

/// Callback invoked on auth state changes.
pub type AuthListener = Arc<dyn Fn(AuthEvent, Option<Session>) + Send + Sync>;

/// Auth capability shared by real and mock clients.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Sign in with email/password. On success replaces any existing session
    /// and schedules a deferred `SIGNED_IN` notification.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthData, AuthError>;

    /// Create an account and sign it in. Schedules a deferred `SIGNED_IN`
    /// notification.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthData, AuthError>;

    /// Destroy the current session and schedule a deferred `SIGNED_OUT`
    /// notification. Signing out with no session is a no-op.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Current session, if any. Direct synchronous state read; no side effects.
    fn get_session(&self) -> Option<Session>;

    /// Currently signed-in user, if any.
    async fn get_user(&self) -> Result<Option<User>, AuthError>;

    /// Request a password-reset email for `email`.
    async fn reset_password_for_email(&self, email: &str) -> Result<(), AuthError>;

    /// Register `listener` for auth state changes. If a session already
    /// exists it is replayed to the new listener on a later executor turn, so
    /// late subscribers observe current state. The returned subscription
    /// removes the listener when unsubscribed.
    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription;
}

/// Handle returned by [`AuthBackend::on_auth_state_change`].
///
/// `unsubscribe` is idempotent: the removal closure runs at most once, and
/// further calls are no-ops.
pub struct AuthSubscription {
    remove: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl AuthSubscription {
    /// Wrap a removal closure
    #[must_use]
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Mutex::new(Some(Box::new(remove))),
        }
    }

    /// A subscription that does nothing when unsubscribed
    #[must_use]
    pub fn noop() -> Self {
        Self {
            remove: Mutex::new(None),
        }
    }

    /// Remove the listener from the registry. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(remove) = self.remove.lock().take() {
            remove();
        }
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("active", &self.remove.lock().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unsubscribe_runs_removal_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = AuthSubscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.unsubscribe();
        sub.unsubscribe();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn noop_subscription_is_safe() {
        let sub = AuthSubscription::noop();
        sub.unsubscribe();
        sub.unsubscribe();
    }
}
