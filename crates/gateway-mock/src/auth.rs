//! Mock auth capability
//!
//! Single-session emulation of the real auth surface (one browser tab, one
//! user). Credential rules are deterministic: any non-empty email/password
//! pair signs in, an email containing `admin` maps to the seeded admin
//! identity, everything else maps to the seeded demo user. `sign_up` accepts
//! the given email and synthesizes a fresh id.
//!
//! State changes are observable through `get_session` as soon as the
//! triggering call resolves; listener notifications arrive strictly later,
//! via the deferred queue in [`gateway_core::notify`].

use crate::latency::LatencyProfile;
use crate::seed::{demo_admin, demo_user};
use gateway_core::{
    AuthBackend, AuthData, AuthError, AuthEvent, AuthListener, AuthNotifier, AuthSubscription,
    Session, User,
};
use parking_lot::Mutex;
use uuid::Uuid;

const MOCK_ACCESS_TOKEN: &str = "mock-access-token";
const MOCK_REFRESH_TOKEN: &str = "mock-refresh-token";

/// Mock implementation of the auth capability.
pub struct MockAuth {
    session: Mutex<Option<Session>>,
    notifier: AuthNotifier,
    latency: LatencyProfile,
}

impl MockAuth {
    /// Create with the given latency profile. Must run inside a tokio
    /// runtime (the notifier spawns its dispatcher task).
    #[must_use]
    pub fn new(latency: LatencyProfile) -> Self {
        Self {
            session: Mutex::new(None),
            notifier: AuthNotifier::new(),
            latency,
        }
    }

    fn install_session(&self, user: User) -> Session {
        let session = Session::new(MOCK_ACCESS_TOKEN, MOCK_REFRESH_TOKEN, user);
        *self.session.lock() = Some(session.clone());
        self.notifier.broadcast(AuthEvent::SignedIn, Some(session.clone()));
        session
    }
}

#[async_trait::async_trait]
impl AuthBackend for MockAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthData, AuthError> {
        self.latency.simulate().await;
        tracing::debug!(email, "mock sign-in");

        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "email and password are required".to_string(),
            ));
        }

        let user = if email.contains("admin") {
            demo_admin()
        } else {
            demo_user()
        };
        let session = self.install_session(user.clone());
        Ok(AuthData { user, session })
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthData, AuthError> {
        self.latency.simulate().await;
        tracing::debug!(email, "mock sign-up");

        let user = User::new(format!("user-{}", Uuid::new_v4()), email);
        let session = self.install_session(user.clone());
        Ok(AuthData { user, session })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.latency.simulate().await;
        tracing::debug!("mock sign-out");

        if self.session.lock().take().is_some() {
            self.notifier.broadcast(AuthEvent::SignedOut, None);
        }
        Ok(())
    }

    fn get_session(&self) -> Option<Session> {
        self.session.lock().clone()
    }

    async fn get_user(&self) -> Result<Option<User>, AuthError> {
        self.latency.simulate().await;
        Ok(self.session.lock().as_ref().map(|s| s.user.clone()))
    }

    async fn reset_password_for_email(&self, email: &str) -> Result<(), AuthError> {
        self.latency.simulate().await;
        tracing::debug!(email, "mock password reset requested");
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.notifier.subscribe(listener, self.get_session())
    }
}

impl std::fmt::Debug for MockAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuth")
            .field("signed_in", &self.session.lock().is_some())
            .field("listeners", &self.notifier.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{DEMO_ADMIN_ID, DEMO_USER_EMAIL, DEMO_USER_ID};
    use pretty_assertions::assert_eq;

    fn auth() -> MockAuth {
        MockAuth::new(LatencyProfile::ZERO)
    }

    #[tokio::test]
    async fn sign_in_creates_session_for_demo_user() {
        let auth = auth();
        let data = auth.sign_in_with_password(DEMO_USER_EMAIL, "demo").await.unwrap();
        assert_eq!(data.user.id, DEMO_USER_ID);
        assert_eq!(data.user.email, DEMO_USER_EMAIL);
        assert_eq!(auth.get_session().unwrap().user.id, DEMO_USER_ID);
    }

    #[tokio::test]
    async fn admin_email_routes_to_admin_identity() {
        let auth = auth();
        let data = auth.sign_in_with_password("admin@example.com", "x").await.unwrap();
        assert_eq!(data.user.id, DEMO_ADMIN_ID);
    }

    #[tokio::test]
    async fn empty_credentials_fail_with_message() {
        let auth = auth();
        let err = auth.sign_in_with_password("", "").await.unwrap_err();
        assert!(!err.message().is_empty());
        assert!(auth.get_session().is_none());
    }

    #[tokio::test]
    async fn sign_up_synthesizes_fresh_id() {
        let auth = auth();
        let first = auth.sign_up("new@example.com", "pw").await.unwrap();
        let second = auth.sign_up("new@example.com", "pw").await.unwrap();
        assert_eq!(first.user.email, "new@example.com");
        assert_ne!(first.user.id, second.user.id);
    }

    #[tokio::test]
    async fn sign_in_replaces_existing_session() {
        let auth = auth();
        auth.sign_in_with_password("demo@example.com", "demo").await.unwrap();
        auth.sign_in_with_password("admin@example.com", "demo").await.unwrap();
        assert_eq!(auth.get_session().unwrap().user.id, DEMO_ADMIN_ID);
    }

    #[tokio::test]
    async fn sign_out_clears_session() {
        let auth = auth();
        auth.sign_in_with_password("demo@example.com", "demo").await.unwrap();
        auth.sign_out().await.unwrap();
        assert!(auth.get_session().is_none());
        assert_eq!(auth.get_user().await.unwrap(), None);
    }
}
