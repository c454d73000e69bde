//! Table capability over the backend's REST surface
//!
//! Translates the shared query primitives into the backend's row API:
//! equality filters become `column=eq.value` parameters, projections become
//! `select=...`, and writes ask for `return=representation` so they echo the
//! stored rows like the mock does.

use crate::client::{check, render_filter_value, RestCore};
use gateway_core::{EqFilter, QueryError, Row, SelectQuery, TableBackend};
use std::sync::Arc;

/// Real table capability.
pub struct RestTables {
    core: Arc<RestCore>,
}

impl RestTables {
    pub(crate) fn new(core: Arc<RestCore>) -> Self {
        Self { core }
    }

    fn filter_params(filters: &[EqFilter]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", render_filter_value(&f.value))))
            .collect()
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.core
            .http
            .request(method, self.core.table_url(table))
            .header("apikey", self.core.anon_key())
            .bearer_auth(self.core.bearer())
    }

    async fn rows_response(response: reqwest::Response) -> Result<Vec<Row>, QueryError> {
        let response = check(response).await.map_err(QueryError::Backend)?;
        response
            .json()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))
    }
}

#[async_trait::async_trait]
impl TableBackend for RestTables {
    async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Row>, QueryError> {
        let mut params = Self::filter_params(&query.filters);
        if let Some(columns) = &query.columns {
            params.push(("select".to_string(), columns.join(",")));
        }
        tracing::debug!(table, filters = query.filters.len(), "select");

        let response = self
            .request(reqwest::Method::GET, table)
            .query(&params)
            .send()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))?;
        Self::rows_response(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, QueryError> {
        tracing::debug!(table, rows = rows.len(), "insert");
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))?;
        Self::rows_response(response).await
    }

    async fn update(&self, table: &str, patch: Row, filters: Vec<EqFilter>) -> Result<Vec<Row>, QueryError> {
        tracing::debug!(table, filters = filters.len(), "update");
        let response = self
            .request(reqwest::Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&Self::filter_params(&filters))
            .json(&patch)
            .send()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))?;
        Self::rows_response(response).await
    }

    async fn delete(&self, table: &str, filters: Vec<EqFilter>) -> Result<(), QueryError> {
        tracing::debug!(table, filters = filters.len(), "delete");
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&Self::filter_params(&filters))
            .send()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))?;
        check(response).await.map_err(QueryError::Backend)?;
        Ok(())
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>, key: &str) -> Result<Vec<Row>, QueryError> {
        tracing::debug!(table, rows = rows.len(), key, "upsert");
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .query(&[("on_conflict", key)])
            .json(&rows)
            .send()
            .await
            .map_err(|e| QueryError::Backend(e.to_string()))?;
        Self::rows_response(response).await
    }
}

impl std::fmt::Debug for RestTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTables").finish()
    }
}
