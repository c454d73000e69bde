//! Chainable query builders
//!
//! The consumer-facing surface: `handle.from("organizations").select()
//! .eq("name", "Acme").single().await`. Builders collect filters and
//! projections, then route through the [`TableBackend`] seam, so the same
//! calling code runs against the mock and the real adapter.
//!
//! A select builder can also be awaited directly, which returns all matching
//! rows.

use crate::error::QueryError;
use crate::table::{EqFilter, SelectQuery, TableBackend};
use crate::types::Row;
use serde_json::Value;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

type BoxedResult<T> = Pin<Box<dyn Future<Output = Result<T, QueryError>> + Send>>;

/// One or more rows handed to insert/upsert.
#[derive(Debug, Clone)]
pub struct Rows(pub Vec<Row>);

impl From<Row> for Rows {
    fn from(row: Row) -> Self {
        Self(vec![row])
    }
}

impl From<Vec<Row>> for Rows {
    fn from(rows: Vec<Row>) -> Self {
        Self(rows)
    }
}

/// Entry point for queries against one named table.
#[derive(Clone)]
pub struct TableRef {
    backend: Arc<dyn TableBackend>,
    table: String,
}

impl TableRef {
    /// Bind `table` on `backend`
    #[inline]
    #[must_use]
    pub fn new(backend: Arc<dyn TableBackend>, table: impl Into<String>) -> Self {
        Self {
            backend,
            table: table.into(),
        }
    }

    /// Table this reference points at
    #[inline]
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Start a read returning all columns. Narrow with
    /// [`SelectBuilder::columns`].
    #[must_use]
    pub fn select(&self) -> SelectBuilder {
        SelectBuilder {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            query: SelectQuery::all_columns(),
        }
    }

    /// Append one row or several; resolves to the stored rows.
    #[must_use]
    pub fn insert(&self, rows: impl Into<Rows>) -> InsertBuilder {
        InsertBuilder {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            rows: rows.into().0,
        }
    }

    /// Patch matching rows; add filters with [`UpdateBuilder::eq`].
    #[must_use]
    pub fn update(&self, patch: Row) -> UpdateBuilder {
        UpdateBuilder {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            patch,
            filters: Vec::new(),
        }
    }

    /// Remove matching rows; add filters with [`DeleteBuilder::eq`].
    #[must_use]
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            filters: Vec::new(),
        }
    }

    /// Insert-or-replace keyed on `id`; change the key with
    /// [`UpsertBuilder::on_conflict`].
    #[must_use]
    pub fn upsert(&self, rows: impl Into<Rows>) -> UpsertBuilder {
        UpsertBuilder {
            backend: Arc::clone(&self.backend),
            table: self.table.clone(),
            rows: rows.into().0,
            key: "id".to_string(),
        }
    }
}

impl std::fmt::Debug for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRef").field("table", &self.table).finish()
    }
}

/// Read builder. Terminal forms: `.await` (all rows), [`Self::single`],
/// [`Self::maybe_single`].
pub struct SelectBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    query: SelectQuery,
}

impl SelectBuilder {
    /// Project to a `"id,email"`-style column list
    #[must_use]
    pub fn columns(mut self, spec: &str) -> Self {
        self.query = self.query.with_columns(spec);
        self
    }

    /// Keep only rows whose `column` equals `value`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.query = self.query.with_filter(EqFilter::new(column, value));
        self
    }

    /// All matching rows, table insertion order preserved
    pub async fn all(self) -> Result<Vec<Row>, QueryError> {
        self.backend.select(&self.table, self.query).await
    }

    /// Exactly one matching row; errors on zero or several
    pub async fn single(self) -> Result<Row, QueryError> {
        let table = self.table.clone();
        let mut rows = self.all().await?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            0 => Err(QueryError::NotFound { table }),
            count => Err(QueryError::MultipleRows { table, count }),
        }
    }

    /// One matching row or `None`; still errors on several
    pub async fn maybe_single(self) -> Result<Option<Row>, QueryError> {
        let table = self.table.clone();
        let mut rows = self.all().await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(rows.remove(0))),
            count => Err(QueryError::MultipleRows { table, count }),
        }
    }
}

impl IntoFuture for SelectBuilder {
    type Output = Result<Vec<Row>, QueryError>;
    type IntoFuture = BoxedResult<Vec<Row>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.all())
    }
}

/// Insert builder; awaiting echoes the stored rows.
pub struct InsertBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    rows: Vec<Row>,
}

impl InsertBuilder {
    /// Run the insert
    pub async fn execute(self) -> Result<Vec<Row>, QueryError> {
        self.backend.insert(&self.table, self.rows).await
    }
}

impl IntoFuture for InsertBuilder {
    type Output = Result<Vec<Row>, QueryError>;
    type IntoFuture = BoxedResult<Vec<Row>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

/// Update builder; awaiting echoes the patched rows.
pub struct UpdateBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    patch: Row,
    filters: Vec<EqFilter>,
}

impl UpdateBuilder {
    /// Patch only rows whose `column` equals `value`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(EqFilter::new(column, value));
        self
    }

    /// Run the update
    pub async fn execute(self) -> Result<Vec<Row>, QueryError> {
        self.backend.update(&self.table, self.patch, self.filters).await
    }
}

impl IntoFuture for UpdateBuilder {
    type Output = Result<Vec<Row>, QueryError>;
    type IntoFuture = BoxedResult<Vec<Row>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

/// Delete builder.
pub struct DeleteBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    filters: Vec<EqFilter>,
}

impl DeleteBuilder {
    /// Remove only rows whose `column` equals `value`
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(EqFilter::new(column, value));
        self
    }

    /// Run the delete
    pub async fn execute(self) -> Result<(), QueryError> {
        self.backend.delete(&self.table, self.filters).await
    }
}

impl IntoFuture for DeleteBuilder {
    type Output = Result<(), QueryError>;
    type IntoFuture = BoxedResult<()>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

/// Upsert builder; awaiting echoes the stored rows.
pub struct UpsertBuilder {
    backend: Arc<dyn TableBackend>,
    table: String,
    rows: Vec<Row>,
    key: String,
}

impl UpsertBuilder {
    /// Key column used to detect an existing row
    #[must_use]
    pub fn on_conflict(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Run the upsert
    pub async fn execute(self) -> Result<Vec<Row>, QueryError> {
        self.backend.upsert(&self.table, self.rows, &self.key).await
    }
}

impl IntoFuture for UpsertBuilder {
    type Output = Result<Vec<Row>, QueryError>;
    type IntoFuture = BoxedResult<Vec<Row>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
