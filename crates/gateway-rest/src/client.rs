//! Shared REST plumbing and handle assembly

use gateway_core::{AuthNotifier, BackendHandle, ClientKind, GatewayError, Session};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::RestAuth;
use crate::tables::RestTables;

/// Connection state shared by the auth and table capabilities.
pub(crate) struct RestCore {
    pub(crate) http: reqwest::Client,
    base: String,
    anon_key: String,
    pub(crate) session: Mutex<Option<Session>>,
    pub(crate) notifier: AuthNotifier,
}

impl RestCore {
    fn new(url: &str, anon_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: Mutex::new(None),
            notifier: AuthNotifier::new(),
        }
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base)
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base)
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Bearer token: the live session's access token, the anon key otherwise
    pub(crate) fn bearer(&self) -> String {
        self.session
            .lock()
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.clone())
    }
}

/// Render a JSON value into a `column=eq.value` query parameter.
pub(crate) fn render_filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a response body, turning non-success statuses into an error message.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("{status}: {body}"))
}

/// Construct a real [`BackendHandle`] over the backend's REST surface.
///
/// Fails fast with a configuration error when handed empty or placeholder
/// credentials; behind the client factory this is unreachable, since the
/// factory checks credentials before selecting the real path.
pub fn rest_backend_handle(url: &str, anon_key: &str) -> Result<BackendHandle, GatewayError> {
    if gateway_config::is_placeholder_url(url) {
        return Err(GatewayError::Configuration(format!(
            "backend URL is missing or a placeholder: {url:?}"
        )));
    }
    if gateway_config::is_placeholder_key(anon_key) {
        return Err(GatewayError::Configuration(
            "backend anon key is missing or a placeholder".to_string(),
        ));
    }

    tracing::info!(url, "constructing real backend client");
    let core = Arc::new(RestCore::new(url, anon_key));
    Ok(BackendHandle::new(
        ClientKind::Real,
        Arc::new(RestAuth::new(Arc::clone(&core))),
        Arc::new(RestTables::new(core)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // RestCore construction spawns the notification dispatcher, so these run
    // inside a runtime.
    #[tokio::test]
    async fn url_building_strips_trailing_slash() {
        let core = RestCore::new("https://db.prod.internal/", "key");
        assert_eq!(core.auth_url("token"), "https://db.prod.internal/auth/v1/token");
        assert_eq!(core.table_url("profiles"), "https://db.prod.internal/rest/v1/profiles");
    }

    #[tokio::test]
    async fn bearer_prefers_session_token() {
        let core = RestCore::new("https://db.prod.internal", "anon");
        assert_eq!(core.bearer(), "anon");

        *core.session.lock() = Some(Session::new(
            "live-token",
            "refresh",
            gateway_core::User::new("u1", "a@b.c"),
        ));
        assert_eq!(core.bearer(), "live-token");
    }

    #[test]
    fn filter_values_render_unquoted_strings() {
        assert_eq!(render_filter_value(&json!("Acme")), "Acme");
        assert_eq!(render_filter_value(&json!(5)), "5");
        assert_eq!(render_filter_value(&json!(true)), "true");
    }

    #[test]
    fn placeholder_credentials_are_rejected() {
        assert!(rest_backend_handle("", "real-key").is_err());
        assert!(rest_backend_handle("https://your-project.backend.example", "real-key").is_err());
        assert!(rest_backend_handle("https://db.prod.internal", "").is_err());
    }

    #[tokio::test]
    async fn valid_credentials_build_a_real_handle() {
        let handle = rest_backend_handle("https://db.prod.internal", "real-key").unwrap();
        assert_eq!(handle.kind(), ClientKind::Real);
    }
}
