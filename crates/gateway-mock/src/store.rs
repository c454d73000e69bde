//! In-memory mock data store
//!
//! A named collection of tables, each an ordered sequence of JSON rows
//! (insertion order is iteration order). The store owns all table contents;
//! only the mock client's own operations mutate them. Reads of an unknown
//! table see an empty table; writes create it.
//!
//! There is no referential-integrity enforcement between tables. The store is
//! memory-only and resets when recreated.

use crate::seed::seed_tables;
use chrono::Utc;
use gateway_core::{EqFilter, Row, SelectQuery};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::json;
use uuid::Uuid;

/// The mock backend's table contents.
#[derive(Debug)]
pub struct MockStore {
    tables: Mutex<IndexMap<String, Vec<Row>>>,
}

impl MockStore {
    /// Store seeded with the demo records
    #[must_use]
    pub fn seeded() -> Self {
        let mut tables = IndexMap::new();
        for (name, rows) in seed_tables() {
            tables.insert(name.to_string(), rows);
        }
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Store with no tables at all. Test fixture.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tables: Mutex::new(IndexMap::new()),
        }
    }

    /// Names of the tables currently present, in creation order
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        self.tables.lock().keys().cloned().collect()
    }

    /// Row count of `table`; zero for unknown tables
    #[must_use]
    pub fn len(&self, table: &str) -> usize {
        self.tables.lock().get(table).map_or(0, Vec::len)
    }

    /// Whether `table` has no rows
    #[must_use]
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    /// Filtered, projected read preserving insertion order
    #[must_use]
    pub fn select(&self, table: &str, query: &SelectQuery) -> Vec<Row> {
        let tables = self.tables.lock();
        let Some(rows) = tables.get(table) else {
            return Vec::new();
        };
        rows.iter()
            .filter(|row| query.matches(row))
            .map(|row| query.project(row))
            .collect()
    }

    /// Append `rows`, filling in a generated `id` and timestamps where
    /// absent. Returns the rows as stored.
    pub fn insert(&self, table: &str, rows: Vec<Row>) -> Vec<Row> {
        let mut tables = self.tables.lock();
        let slot = tables.entry(table.to_string()).or_default();
        let stored: Vec<Row> = rows.into_iter().map(complete_row).collect();
        slot.extend(stored.iter().cloned());
        stored
    }

    /// Merge `patch` into every row matching `filters`, refreshing
    /// `updated_at`. Returns the rows after mutation.
    pub fn update(&self, table: &str, patch: &Row, filters: &[EqFilter]) -> Vec<Row> {
        let mut tables = self.tables.lock();
        let Some(rows) = tables.get_mut(table) else {
            return Vec::new();
        };
        let now = Utc::now().to_rfc3339();
        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if filters.iter().all(|f| f.matches(row)) {
                for (key, value) in patch {
                    row.insert(key.clone(), value.clone());
                }
                if row.contains_key("updated_at") {
                    row.insert("updated_at".to_string(), json!(now));
                }
                updated.push(row.clone());
            }
        }
        updated
    }

    /// Remove every row matching `filters`. Returns how many were removed.
    pub fn delete(&self, table: &str, filters: &[EqFilter]) -> usize {
        let mut tables = self.tables.lock();
        let Some(rows) = tables.get_mut(table) else {
            return 0;
        };
        let before = rows.len();
        rows.retain(|row| !filters.iter().all(|f| f.matches(row)));
        before - rows.len()
    }

    /// Replace rows sharing `key` with the incoming ones, appending rows with
    /// no existing counterpart. Returns the rows as stored.
    pub fn upsert(&self, table: &str, rows: Vec<Row>, key: &str) -> Vec<Row> {
        let mut tables = self.tables.lock();
        let slot = tables.entry(table.to_string()).or_default();
        let mut stored = Vec::new();
        for incoming in rows {
            let incoming = complete_row(incoming);
            let position = incoming.get(key).and_then(|value| {
                slot.iter().position(|row| row.get(key) == Some(value))
            });
            match position {
                Some(idx) => slot[idx] = incoming.clone(),
                None => slot.push(incoming.clone()),
            }
            stored.push(incoming);
        }
        stored
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Fill in `id`, `created_at` and `updated_at` when the caller left them out.
fn complete_row(mut row: Row) -> Row {
    if !row.contains_key("id") {
        row.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    }
    let now = Utc::now().to_rfc3339();
    for stamp in ["created_at", "updated_at"] {
        if !row.contains_key(stamp) {
            row.insert(stamp.to_string(), json!(now));
        }
    }
    row
}
