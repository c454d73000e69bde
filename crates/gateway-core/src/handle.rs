//! The one concrete client type consumers hold
//!
//! A [`BackendHandle`] pairs the auth and table capabilities behind their
//! trait seams and remembers which concrete client it wraps. UI code keeps a
//! handle and never learns whether it is talking to the mock or the real
//! backend.

use crate::auth::AuthBackend;
use crate::query::TableRef;
use crate::table::TableBackend;
use crate::types::ClientKind;
use std::sync::Arc;

/// Client handle: auth plus tables, mock or real.
#[derive(Clone)]
pub struct BackendHandle {
    kind: ClientKind,
    auth: Arc<dyn AuthBackend>,
    tables: Arc<dyn TableBackend>,
}

impl BackendHandle {
    /// Assemble a handle from its two capabilities
    #[must_use]
    pub fn new(kind: ClientKind, auth: Arc<dyn AuthBackend>, tables: Arc<dyn TableBackend>) -> Self {
        Self { kind, auth, tables }
    }

    /// Which concrete client this wraps. Drives the demo-mode banner.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    /// The auth capability
    #[inline]
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthBackend> {
        &self.auth
    }

    /// Start a query against `table`
    #[inline]
    #[must_use]
    pub fn from(&self, table: &str) -> TableRef {
        TableRef::new(Arc::clone(&self.tables), table)
    }
}

impl std::fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandle").field("kind", &self.kind).finish()
    }
}
