//! Mock table capability
//!
//! Thin async shim between the [`TableBackend`] seam and the synchronous
//! store: simulate one round trip, log the operation, apply it.

use crate::latency::LatencyProfile;
use crate::store::MockStore;
use gateway_core::{EqFilter, QueryError, Row, SelectQuery, TableBackend};
use std::sync::Arc;

/// Mock implementation of the table capability.
#[derive(Debug)]
pub struct MockTables {
    store: Arc<MockStore>,
    latency: LatencyProfile,
}

impl MockTables {
    /// Serve queries from `store` with the given latency profile
    #[inline]
    #[must_use]
    pub fn new(store: Arc<MockStore>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    /// The underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }
}

#[async_trait::async_trait]
impl TableBackend for MockTables {
    async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Row>, QueryError> {
        self.latency.simulate().await;
        let rows = self.store.select(table, &query);
        tracing::debug!(table, filters = query.filters.len(), rows = rows.len(), "mock select");
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, QueryError> {
        self.latency.simulate().await;
        tracing::debug!(table, rows = rows.len(), "mock insert");
        Ok(self.store.insert(table, rows))
    }

    async fn update(&self, table: &str, patch: Row, filters: Vec<EqFilter>) -> Result<Vec<Row>, QueryError> {
        self.latency.simulate().await;
        let updated = self.store.update(table, &patch, &filters);
        tracing::debug!(table, updated = updated.len(), "mock update");
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: Vec<EqFilter>) -> Result<(), QueryError> {
        self.latency.simulate().await;
        let removed = self.store.delete(table, &filters);
        tracing::debug!(table, removed, "mock delete");
        Ok(())
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>, key: &str) -> Result<Vec<Row>, QueryError> {
        self.latency.simulate().await;
        tracing::debug!(table, rows = rows.len(), key, "mock upsert");
        Ok(self.store.upsert(table, rows, key))
    }
}
