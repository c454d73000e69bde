//! Core types for the backend-client contract
//!
//! Defines the fundamental types shared by the real and mock clients:
//! - Users and sessions
//! - Auth change events
//! - Platform and organization roles
//! - Table rows

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identity record as returned by the auth capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id
    pub id: String,
    /// Sign-in email
    pub email: String,
    /// Display name, when the profile carries one
    pub display_name: Option<String>,
}

impl User {
    /// Create a user record
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Active auth session. At most one per client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Token type, always `bearer`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    /// The signed-in user
    pub user: User,
}

impl Session {
    /// Create a session for `user` with the given token pair
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            user,
        }
    }
}

/// Sign-in / sign-up response payload: the user plus their new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthData {
    /// The authenticated user
    pub user: User,
    /// The session created for this user
    pub session: Session,
}

/// Auth state change events delivered to registered listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthEvent {
    /// A session was created
    SignedIn,
    /// The session was destroyed
    SignedOut,
}

impl AuthEvent {
    /// Wire/display name of the event
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
        }
    }
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which concrete client a handle wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    /// In-memory simulation
    Mock,
    /// Real backend over HTTP
    Real,
}

/// System-wide role, distinct from any organization-scoped role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    /// Full platform administration
    PlatformAdmin,
    /// Platform engineering access
    PlatformDeveloper,
    /// Support tooling access
    PlatformSupport,
}

impl PlatformRole {
    /// Stable string form used in the `system_roles` table
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlatformAdmin => "platform_admin",
            Self::PlatformDeveloper => "platform_developer",
            Self::PlatformSupport => "platform_support",
        }
    }
}

impl FromStr for PlatformRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(Self::PlatformAdmin),
            "platform_developer" => Ok(Self::PlatformDeveloper),
            "platform_support" => Ok(Self::PlatformSupport),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role held within a single organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Created the organization; full control
    Owner,
    /// Administrative access
    Admin,
    /// Regular member
    Member,
    /// Read-only access
    Viewer,
}

impl OrgRole {
    /// Stable string form used in the `organization_members` table
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for OrgRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Parse error for role strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// A table row: a flat JSON object, the shape the generated client returns.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Read a string field out of a row.
#[inline]
#[must_use]
pub fn row_str<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(serde_json::Value::as_str)
}

/// Build a row from `(key, value)` pairs. Test and seed helper.
#[must_use]
pub fn row_from(pairs: &[(&str, serde_json::Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}
