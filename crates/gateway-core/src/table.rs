//! Table capability trait and query primitives
//!
//! The table surface is split in two: [`TableBackend`] is the narrow seam a
//! client implements (mock or REST), and the chainable builders in
//! [`crate::query`] translate consumer calls into these primitives. Filter and
//! projection semantics live here so both implementations agree on them.

use crate::error::QueryError;
use crate::types::Row;
use serde_json::Value;

/// Equality filter over one column.
#[derive(Debug, Clone, PartialEq)]
pub struct EqFilter {
    /// Column name
    pub column: String,
    /// Value rows must carry in `column` to match
    pub value: Value,
}

impl EqFilter {
    /// Create an equality filter
    #[inline]
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies this filter
    #[inline]
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// A filtered, projected read over one table.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    /// Columns to return; `None` means all
    pub columns: Option<Vec<String>>,
    /// Equality filters, all of which must match
    pub filters: Vec<EqFilter>,
}

impl SelectQuery {
    /// Select all columns, no filters
    #[inline]
    #[must_use]
    pub fn all_columns() -> Self {
        Self::default()
    }

    /// Parse a `"id,email"`-style projection. `"*"` selects everything.
    #[must_use]
    pub fn with_columns(mut self, spec: &str) -> Self {
        let spec = spec.trim();
        if spec.is_empty() || spec == "*" {
            self.columns = None;
        } else {
            self.columns = Some(spec.split(',').map(|c| c.trim().to_string()).collect());
        }
        self
    }

    /// Add an equality filter
    #[must_use]
    pub fn with_filter(mut self, filter: EqFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Whether `row` satisfies every filter
    #[inline]
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Apply the column projection to `row`
    #[must_use]
    pub fn project(&self, row: &Row) -> Row {
        match &self.columns {
            None => row.clone(),
            Some(columns) => columns
                .iter()
                .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                .collect(),
        }
    }
}

/// Table capability shared by real and mock clients.
///
/// Rows travel as flat JSON objects. All operations model a network call and
/// may suspend; none of them panic on bad input.
#[async_trait::async_trait]
pub trait TableBackend: Send + Sync {
    /// Filtered, projected read. Row order is table insertion order.
    async fn select(&self, table: &str, query: SelectQuery) -> Result<Vec<Row>, QueryError>;

    /// Append rows and echo them back as stored (ids and timestamps filled
    /// in). No dedup, no referential checks.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, QueryError>;

    /// Merge `patch` into every row matching `filters`; echoes the updated
    /// rows. With no filters, every row in the table is patched.
    async fn update(&self, table: &str, patch: Row, filters: Vec<EqFilter>) -> Result<Vec<Row>, QueryError>;

    /// Remove every row matching `filters`.
    async fn delete(&self, table: &str, filters: Vec<EqFilter>) -> Result<(), QueryError>;

    /// Replace rows sharing `key` with the incoming ones, appending those
    /// with no existing counterpart.
    async fn upsert(&self, table: &str, rows: Vec<Row>, key: &str) -> Result<Vec<Row>, QueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::row_from;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn eq_filter_matches_exact_value() {
        let row = row_from(&[("name", json!("Acme")), ("seats", json!(5))]);
        assert!(EqFilter::new("name", "Acme").matches(&row));
        assert!(EqFilter::new("seats", 5).matches(&row));
        assert!(!EqFilter::new("name", "Globex").matches(&row));
        assert!(!EqFilter::new("missing", "x").matches(&row));
    }

    #[test]
    fn column_spec_parsing() {
        assert_eq!(SelectQuery::all_columns().with_columns("*").columns, None);
        assert_eq!(SelectQuery::all_columns().with_columns("").columns, None);
        assert_eq!(
            SelectQuery::all_columns().with_columns("id, email").columns,
            Some(vec!["id".to_string(), "email".to_string()])
        );
    }

    #[test]
    fn projection_keeps_only_named_columns() {
        let row = row_from(&[("id", json!("u1")), ("email", json!("a@b.c")), ("role", json!("owner"))]);
        let query = SelectQuery::all_columns().with_columns("id,email");
        let projected = query.project(&row);
        assert_eq!(projected.len(), 2);
        assert!(projected.contains_key("id"));
        assert!(!projected.contains_key("role"));
    }

    #[test]
    fn projection_skips_absent_columns() {
        let row = row_from(&[("id", json!("u1"))]);
        let query = SelectQuery::all_columns().with_columns("id,missing");
        let projected = query.project(&row);
        assert_eq!(projected.len(), 1);
    }

    #[test]
    fn query_matches_requires_all_filters() {
        let row = row_from(&[("a", json!(1)), ("b", json!(2))]);
        let query = SelectQuery::all_columns()
            .with_filter(EqFilter::new("a", 1))
            .with_filter(EqFilter::new("b", 2));
        assert!(query.matches(&row));

        let query = query.with_filter(EqFilter::new("b", 3));
        assert!(!query.matches(&row));
    }
}
