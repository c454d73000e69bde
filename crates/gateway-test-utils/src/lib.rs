//! Testing utilities for the gateway workspace
//!
//! Shared fixtures: environment maps, policy setups, and a stub real client
//! for exercising the factory's real path without a network.

#![allow(missing_docs)]

use gateway_config::BackendConfig;
use gateway_core::{
    AuthBackend, AuthData, AuthError, AuthListener, AuthSubscription, BackendHandle, ClientKind,
    EqFilter, QueryError, Row, SelectQuery, Session, TableBackend, User,
};
use gateway_policy::{DemoPolicy, DemoSettings};
use std::collections::HashMap;
use std::sync::Arc;

/// Build an env lookup closure over literal pairs, for
/// `BackendConfig::resolve_from`.
pub fn env_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

/// Config with usable credentials and the demo flag off.
pub fn valid_backend_config() -> BackendConfig {
    BackendConfig {
        url: Some("https://db.prod.internal".to_string()),
        anon_key: Some("real-key-material".to_string()),
        explicit_demo_flag: false,
    }
}

/// Config with nothing set, the auto-fallback case.
pub fn unconfigured_backend_config() -> BackendConfig {
    BackendConfig::default()
}

/// Fresh settings store with the override preset.
pub fn settings_with_override(value: Option<bool>) -> Arc<DemoSettings> {
    let settings = Arc::new(DemoSettings::new());
    settings.set_override(value);
    settings
}

/// Policy over valid credentials and an unset override.
pub fn production_policy() -> DemoPolicy {
    DemoPolicy::new(valid_backend_config(), Arc::new(DemoSettings::new()))
}

/// Stand-in for the real client: satisfies both capability traits without
/// any network. Auth operations fail, table reads are empty.
#[derive(Debug, Default)]
pub struct StubRealClient;

#[async_trait::async_trait]
impl AuthBackend for StubRealClient {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<AuthData, AuthError> {
        Err(AuthError::Backend("stub real client has no network".to_string()))
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<AuthData, AuthError> {
        Err(AuthError::Backend("stub real client has no network".to_string()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn get_session(&self) -> Option<Session> {
        None
    }

    async fn get_user(&self) -> Result<Option<User>, AuthError> {
        Ok(None)
    }

    async fn reset_password_for_email(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }

    fn on_auth_state_change(&self, _listener: AuthListener) -> AuthSubscription {
        AuthSubscription::noop()
    }
}

#[async_trait::async_trait]
impl TableBackend for StubRealClient {
    async fn select(&self, _table: &str, _query: SelectQuery) -> Result<Vec<Row>, QueryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _table: &str, rows: Vec<Row>) -> Result<Vec<Row>, QueryError> {
        Ok(rows)
    }

    async fn update(&self, _table: &str, _patch: Row, _filters: Vec<EqFilter>) -> Result<Vec<Row>, QueryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _table: &str, _filters: Vec<EqFilter>) -> Result<(), QueryError> {
        Ok(())
    }

    async fn upsert(&self, _table: &str, rows: Vec<Row>, _key: &str) -> Result<Vec<Row>, QueryError> {
        Ok(rows)
    }
}

/// A `Real`-kind handle backed by the stub.
pub fn stub_real_handle() -> BackendHandle {
    let auth: Arc<dyn AuthBackend> = Arc::new(StubRealClient);
    let tables: Arc<dyn TableBackend> = Arc::new(StubRealClient);
    BackendHandle::new(ClientKind::Real, auth, tables)
}
