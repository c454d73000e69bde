//! Demo-mode decision engine
//!
//! Applies the three precedence tiers, first match wins:
//! 1. Admin override (runtime, either direction)
//! 2. Explicit environment flag (deploy-time switch)
//! 3. Credential auto-fallback (never boot to a blank screen unconfigured)
//!
//! The verdict is recomputed on every call from the injected settings store
//! plus the captured environment config; it is never persisted.

use crate::settings::DemoSettings;
use gateway_config::BackendConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why demo mode is (or is not) active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoReason {
    /// Forced on by the runtime admin toggle
    AdminToggle,
    /// Enabled by the deploy-time environment flag
    EnvVariable,
    /// Enabled because credentials are missing or placeholders
    AutoFallback,
    /// Demo mode is off
    Disabled,
}

impl DemoReason {
    /// Stable string form for logs and display
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminToggle => "admin_toggle",
            Self::EnvVariable => "env_variable",
            Self::AutoFallback => "auto_fallback",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for DemoReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demo-mode verdict. `active == false` exactly when `reason == Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoStatus {
    /// Whether the app should run against the simulated backend
    pub active: bool,
    /// Which tier decided
    pub reason: DemoReason,
}

impl DemoStatus {
    /// Active with the given (non-`Disabled`) reason
    #[inline]
    #[must_use]
    pub fn active(reason: DemoReason) -> Self {
        debug_assert!(reason != DemoReason::Disabled);
        Self { active: true, reason }
    }

    /// Demo mode off
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            active: false,
            reason: DemoReason::Disabled,
        }
    }
}

/// The policy engine: injected settings plus resolved environment config.
#[derive(Debug, Clone)]
pub struct DemoPolicy {
    config: BackendConfig,
    settings: Arc<DemoSettings>,
}

impl DemoPolicy {
    /// Build a policy over `config` and the shared settings store
    #[inline]
    #[must_use]
    pub fn new(config: BackendConfig, settings: Arc<DemoSettings>) -> Self {
        Self { config, settings }
    }

    /// Convenience: resolve the environment and use a fresh settings store
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(BackendConfig::resolve(), Arc::new(DemoSettings::new()))
    }

    /// The captured environment config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The shared settings store
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Arc<DemoSettings> {
        &self.settings
    }

    /// Compute the current verdict. Strict precedence, first match wins.
    #[must_use]
    pub fn status(&self) -> DemoStatus {
        // Tier 1: runtime admin override, either direction
        if let Some(forced) = self.settings.override_state() {
            return if forced {
                tracing::warn!("demo mode: forced on by admin override");
                DemoStatus::active(DemoReason::AdminToggle)
            } else {
                tracing::info!("demo mode: forced off by admin override");
                DemoStatus::disabled()
            };
        }

        // Tier 2: explicit deploy-time flag
        if self.config.explicit_demo_flag {
            tracing::warn!("demo mode: enabled via environment flag");
            return DemoStatus::active(DemoReason::EnvVariable);
        }

        // Tier 3: credential auto-fallback
        if !self.config.credentials_valid() {
            tracing::warn!(
                has_url = self.config.url_valid(),
                has_key = self.config.key_valid(),
                "demo mode: auto-enabled, backend credentials missing or placeholders"
            );
            return DemoStatus::active(DemoReason::AutoFallback);
        }

        tracing::info!("production mode: using real backend client");
        DemoStatus::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_config() -> BackendConfig {
        BackendConfig {
            url: Some("https://db.prod.internal".to_string()),
            anon_key: Some("real-key-material".to_string()),
            explicit_demo_flag: false,
        }
    }

    #[test]
    fn admin_override_wins_over_everything() {
        let mut config = valid_config();
        config.explicit_demo_flag = true;
        let policy = DemoPolicy::new(config, Arc::new(DemoSettings::new()));

        policy.settings().set_override(Some(false));
        assert_eq!(policy.status(), DemoStatus::disabled());

        policy.settings().set_override(Some(true));
        assert_eq!(policy.status(), DemoStatus::active(DemoReason::AdminToggle));
    }

    #[test]
    fn env_flag_beats_credential_fallback() {
        let config = BackendConfig {
            url: None,
            anon_key: None,
            explicit_demo_flag: true,
        };
        let policy = DemoPolicy::new(config, Arc::new(DemoSettings::new()));
        assert_eq!(policy.status(), DemoStatus::active(DemoReason::EnvVariable));
    }

    #[test]
    fn missing_credentials_fall_back() {
        let config = BackendConfig::default();
        let policy = DemoPolicy::new(config, Arc::new(DemoSettings::new()));
        assert_eq!(policy.status(), DemoStatus::active(DemoReason::AutoFallback));
    }

    #[test]
    fn placeholder_credentials_fall_back() {
        let config = BackendConfig {
            url: Some("https://your-project.backend.example".to_string()),
            anon_key: Some("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.c2FtcGxl".to_string()),
            explicit_demo_flag: false,
        };
        let policy = DemoPolicy::new(config, Arc::new(DemoSettings::new()));
        assert_eq!(policy.status(), DemoStatus::active(DemoReason::AutoFallback));
    }

    #[test]
    fn valid_credentials_disable_demo_mode() {
        let policy = DemoPolicy::new(valid_config(), Arc::new(DemoSettings::new()));
        assert_eq!(policy.status(), DemoStatus::disabled());
    }

    #[test]
    fn status_reflects_override_changes_immediately() {
        let policy = DemoPolicy::new(valid_config(), Arc::new(DemoSettings::new()));
        assert!(!policy.status().active);

        policy.settings().set_override(Some(true));
        assert!(policy.status().active);

        policy.settings().clear_override();
        assert!(!policy.status().active);
    }
}
