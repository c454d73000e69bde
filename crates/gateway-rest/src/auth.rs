//! Auth capability over the backend's REST surface
//!
//! Mirrors the mock's session model: one cached session per client instance,
//! `get_session` as a synchronous local read, deferred listener
//! notifications. The network is only consulted for the operations that
//! actually need it.

use crate::client::{check, RestCore};
use crate::wire::{WireSession, WireUser};
use gateway_core::{
    AuthBackend, AuthData, AuthError, AuthEvent, AuthListener, AuthSubscription, Session, User,
};
use serde_json::json;
use std::sync::Arc;

/// Real auth capability.
pub struct RestAuth {
    core: Arc<RestCore>,
}

impl RestAuth {
    pub(crate) fn new(core: Arc<RestCore>) -> Self {
        Self { core }
    }

    fn install_session(&self, session: Session) {
        *self.core.session.lock() = Some(session.clone());
        self.core
            .notifier
            .broadcast(AuthEvent::SignedIn, Some(session));
    }

    async fn session_request(&self, url: String, body: serde_json::Value) -> Result<AuthData, AuthError> {
        let response = self
            .core
            .http
            .post(url)
            .header("apikey", self.core.anon_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        let status = response.status();
        let response = match check(response).await {
            Ok(response) => response,
            Err(message) if status.as_u16() == 400 || status.as_u16() == 401 => {
                return Err(AuthError::InvalidCredentials(message));
            }
            Err(message) => return Err(AuthError::Backend(message)),
        };

        let wire: WireSession = response
            .json()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        let session = wire.into_session();
        let user = session.user.clone();
        self.install_session(session.clone());
        Ok(AuthData { user, session })
    }
}

#[async_trait::async_trait]
impl AuthBackend for RestAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthData, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "email and password are required".to_string(),
            ));
        }
        tracing::debug!(email, "password sign-in");
        self.session_request(
            format!("{}?grant_type=password", self.core.auth_url("token")),
            json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthData, AuthError> {
        tracing::debug!(email, "sign-up");
        self.session_request(
            self.core.auth_url("signup"),
            json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.core.session.lock().clone() else {
            return Ok(());
        };

        let result = self
            .core
            .http
            .post(self.core.auth_url("logout"))
            .header("apikey", self.core.anon_key())
            .bearer_auth(&session.access_token)
            .send()
            .await;
        // The local session is gone either way; a failed revocation only
        // shortens the token's server-side life.
        if let Err(e) = result {
            tracing::warn!(error = %e, "sign-out request failed, clearing local session anyway");
        }

        *self.core.session.lock() = None;
        self.core.notifier.broadcast(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn get_session(&self) -> Option<Session> {
        self.core.session.lock().clone()
    }

    async fn get_user(&self) -> Result<Option<User>, AuthError> {
        let Some(session) = self.core.session.lock().clone() else {
            return Ok(None);
        };

        let response = self
            .core
            .http
            .get(self.core.auth_url("user"))
            .header("apikey", self.core.anon_key())
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        let response = check(response).await.map_err(AuthError::Backend)?;
        let wire: WireUser = response
            .json()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        Ok(Some(wire.into()))
    }

    async fn reset_password_for_email(&self, email: &str) -> Result<(), AuthError> {
        tracing::debug!(email, "password reset requested");
        let response = self
            .core
            .http
            .post(self.core.auth_url("recover"))
            .header("apikey", self.core.anon_key())
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        check(response).await.map_err(AuthError::Backend)?;
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.core.notifier.subscribe(listener, self.get_session())
    }
}

impl std::fmt::Debug for RestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestAuth")
            .field("signed_in", &self.core.session.lock().is_some())
            .finish()
    }
}
