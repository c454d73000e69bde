//! Client construction and caching
//!
//! The factory evaluates the demo policy once, on the first `get_client`
//! call, and caches whichever client it built. Later calls return the cached
//! instance without re-evaluating policy: flipping the admin override does
//! not swap the live client out from under in-flight subscriptions. Applying
//! a runtime toggle takes an explicit `reset_client` followed by the next
//! `get_client`.

use gateway_config::BackendConfig;
use gateway_core::{BackendHandle, GatewayError};
use gateway_mock::{mock_backend_handle, MockClientConfig};
use gateway_policy::{DemoPolicy, DemoSettings, DemoStatus};
use gateway_rest::rest_backend_handle;
use parking_lot::RwLock;
use std::sync::Arc;

/// Builds the real client from resolved configuration. Injected so tests can
/// exercise the real path without a network.
pub type RealClientBuilder =
    Box<dyn Fn(&BackendConfig) -> Result<BackendHandle, GatewayError> + Send + Sync>;

fn default_real_builder() -> RealClientBuilder {
    Box::new(|config| {
        rest_backend_handle(
            config.url.as_deref().unwrap_or_default(),
            config.anon_key.as_deref().unwrap_or_default(),
        )
    })
}

/// Singleton accessor for the application's backend client.
pub struct ClientFactory {
    policy: DemoPolicy,
    mock_config: MockClientConfig,
    real_builder: RealClientBuilder,
    cached: RwLock<Option<Arc<BackendHandle>>>,
}

impl ClientFactory {
    /// Factory over `config` and the shared settings store
    #[must_use]
    pub fn new(config: BackendConfig, settings: Arc<DemoSettings>) -> Self {
        Self::with_policy(DemoPolicy::new(config, settings))
    }

    /// Factory over an already-built policy
    #[must_use]
    pub fn with_policy(policy: DemoPolicy) -> Self {
        Self {
            policy,
            mock_config: MockClientConfig::new(),
            real_builder: default_real_builder(),
            cached: RwLock::new(None),
        }
    }

    /// Convenience: resolve the environment and use a fresh settings store
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_policy(DemoPolicy::from_env())
    }

    /// Replace the mock construction options
    #[must_use]
    pub fn with_mock_config(mut self, mock_config: MockClientConfig) -> Self {
        self.mock_config = mock_config;
        self
    }

    /// Replace the real-client builder
    #[must_use]
    pub fn with_real_builder(mut self, builder: RealClientBuilder) -> Self {
        self.real_builder = builder;
        self
    }

    /// The policy driving client selection
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &DemoPolicy {
        &self.policy
    }

    /// Current demo-mode verdict, for banner display. Unlike the cached
    /// client, this is recomputed on every call.
    #[must_use]
    pub fn demo_status(&self) -> DemoStatus {
        self.policy.status()
    }

    /// The cached client, constructing it on first call.
    ///
    /// # Errors
    /// `GatewayError::Configuration` when the real path is selected but the
    /// credentials are absent or placeholders. A deployment error, not a
    /// recoverable runtime condition.
    pub fn get_client(&self) -> Result<Arc<BackendHandle>, GatewayError> {
        if let Some(handle) = self.cached.read().clone() {
            return Ok(handle);
        }

        let mut slot = self.cached.write();
        if let Some(handle) = slot.clone() {
            return Ok(handle);
        }

        let status = self.policy.status();
        let handle = if status.active {
            tracing::info!(reason = %status.reason, "selecting mock backend client");
            Arc::new(mock_backend_handle(self.mock_config.clone()))
        } else {
            let config = self.policy.config();
            if !config.credentials_valid() {
                return Err(GatewayError::Configuration(
                    "real backend selected but credentials are missing or placeholders; \
                     set the backend URL and key, or enable demo mode"
                        .to_string(),
                ));
            }
            tracing::info!("selecting real backend client");
            Arc::new((self.real_builder)(config)?)
        };

        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// Drop the cached client. The next `get_client` re-runs policy
    /// resolution. Live handles held elsewhere keep working against the old
    /// client until their owners re-fetch.
    pub fn reset_client(&self) {
        let had_client = self.cached.write().take().is_some();
        if had_client {
            tracing::info!("client cache reset; next access re-resolves demo policy");
        }
    }
}

impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("cached", &self.cached.read().is_some())
            .finish()
    }
}
