//! Mock client assembly

use crate::auth::MockAuth;
use crate::latency::LatencyProfile;
use crate::store::MockStore;
use crate::tables::MockTables;
use gateway_core::{BackendHandle, ClientKind};
use std::sync::Arc;

/// Construction options for the mock client.
#[derive(Debug, Clone, Default)]
pub struct MockClientConfig {
    /// Simulated round-trip latency
    pub latency: LatencyProfile,
    /// Store to serve from; a freshly seeded one when absent
    pub store: Option<Arc<MockStore>>,
}

impl MockClientConfig {
    /// Defaults: seeded store, realistic latency
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero latency. Test profile.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency: LatencyProfile::ZERO,
            store: None,
        }
    }

    /// Serve from a specific store
    #[must_use]
    pub fn with_store(mut self, store: Arc<MockStore>) -> Self {
        self.store = Some(store);
        self
    }
}

/// Build a mock [`BackendHandle`]. Must run inside a tokio runtime.
#[must_use]
pub fn mock_backend_handle(config: MockClientConfig) -> BackendHandle {
    tracing::warn!("demo mode: constructing in-memory mock backend client");
    let store = config
        .store
        .unwrap_or_else(|| Arc::new(MockStore::seeded()));
    let auth = Arc::new(MockAuth::new(config.latency));
    let tables = Arc::new(MockTables::new(store, config.latency));
    BackendHandle::new(ClientKind::Mock, auth, tables)
}
