//! Gateway Config - environment configuration resolver
//!
//! Reads the three deployment inputs (backend URL, anon key, explicit demo
//! flag) and decides whether the credentials are usable. A URL or key that is
//! empty or matches a known placeholder pattern counts as absent, so sample
//! values checked into an env template are never mistaken for real
//! credentials.
//!
//! Resolution is a pure function of a key/value lookup; nothing here has side
//! effects or network access.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Environment variable carrying the backend base URL.
pub const ENV_BACKEND_URL: &str = "GATEWAY_BACKEND_URL";
/// Environment variable carrying the anon API key.
pub const ENV_BACKEND_KEY: &str = "GATEWAY_BACKEND_KEY";
/// Environment variable force-enabling demo mode (`"true"` or `"1"`).
pub const ENV_DEMO_MODE: &str = "GATEWAY_DEMO_MODE";

/// Ellipsis token left behind by truncated sample values.
const ELLIPSIS: &str = "...";

/// Host fragments that only appear in sample URLs.
const PLACEHOLDER_HOSTS: [&str; 2] = ["your-project.", "example.com"];

/// Anon-key sample that ships in the env template. Any key starting with this
/// prefix is the checked-in placeholder, not a real credential.
const PLACEHOLDER_KEY_PREFIX: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.c2FtcGxl";

/// Raw configuration as resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL, unset if the variable is absent
    pub url: Option<String>,
    /// Anon API key, unset if the variable is absent
    pub anon_key: Option<String>,
    /// Whether demo mode was explicitly requested at deploy time
    pub explicit_demo_flag: bool,
}

impl BackendConfig {
    /// Resolve from the process environment
    #[must_use]
    pub fn resolve() -> Self {
        Self::resolve_from(|key| std::env::var(key).ok())
    }

    /// Resolve from any key/value lookup. Test seam; the lookup sees the
    /// exact variable names this module documents.
    pub fn resolve_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup(ENV_BACKEND_URL),
            anon_key: lookup(ENV_BACKEND_KEY),
            explicit_demo_flag: lookup(ENV_DEMO_MODE).is_some_and(|v| flag_is_true(&v)),
        }
    }

    /// Whether the URL is present and not a placeholder
    #[inline]
    #[must_use]
    pub fn url_valid(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !is_placeholder_url(u))
    }

    /// Whether the anon key is present and not a placeholder
    #[inline]
    #[must_use]
    pub fn key_valid(&self) -> bool {
        self.anon_key.as_deref().is_some_and(|k| !is_placeholder_key(k))
    }

    /// Whether both credentials are usable for a real client
    #[inline]
    #[must_use]
    pub fn credentials_valid(&self) -> bool {
        self.url_valid() && self.key_valid()
    }
}

/// `"true"` and `"1"` enable the flag; anything else does not.
#[inline]
#[must_use]
pub fn flag_is_true(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Whether `url` is empty or a known sample value.
#[must_use]
pub fn is_placeholder_url(url: &str) -> bool {
    let url = url.trim();
    url.is_empty()
        || url.contains(ELLIPSIS)
        || PLACEHOLDER_HOSTS.iter().any(|host| url.contains(host))
}

/// Whether `key` is empty or a known sample value.
#[must_use]
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key.contains(ELLIPSIS) || key.starts_with(PLACEHOLDER_KEY_PREFIX)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
