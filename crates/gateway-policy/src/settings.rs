//! Runtime demo-mode settings
//!
//! The admin override lives in an explicit, injected store rather than module
//! state, so the policy engine can be exercised in isolation and tests never
//! leak overrides into each other. One store is created at application start
//! and shared by whoever needs the override; it is never persisted, so a
//! restart reverts to environment-derived behavior.

use parking_lot::RwLock;

/// Process-wide demo-mode settings. Cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct DemoSettings {
    /// Admin override: `None` = unset, `Some(v)` = forced to `v`
    override_cell: RwLock<Option<bool>>,
}

impl DemoSettings {
    /// Create a store with the override unset
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current override state
    #[inline]
    #[must_use]
    pub fn override_state(&self) -> Option<bool> {
        *self.override_cell.read()
    }

    /// Set or clear the admin override. Only the admin-gated UI control calls
    /// this; the next `status()` computation reflects it immediately.
    pub fn set_override(&self, value: Option<bool>) {
        let previous = {
            let mut cell = self.override_cell.write();
            std::mem::replace(&mut *cell, value)
        };
        if previous != value {
            tracing::info!(?previous, current = ?value, "demo-mode admin override changed");
        }
    }

    /// Clear the override back to unset
    #[inline]
    pub fn clear_override(&self) {
        self.set_override(None);
    }
}
