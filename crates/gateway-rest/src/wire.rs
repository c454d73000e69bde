//! Wire shapes of the backend's auth endpoints
//!
//! The REST surface is an external contract; these structs only name the
//! fields this adapter reads and convert them into the shared contract types.

use gateway_core::{Session, User};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: Option<WireMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: WireUser,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        let mut user = User::new(wire.id, wire.email);
        if let Some(name) = wire.user_metadata.and_then(|m| m.full_name) {
            user = user.with_display_name(name);
        }
        user
    }
}

impl WireSession {
    pub(crate) fn into_session(self) -> Session {
        let expires_in = self.expires_in;
        let mut session = Session::new(self.access_token, self.refresh_token, self.user.into());
        if let Some(expires_in) = expires_in {
            session.expires_in = expires_in;
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_payload_converts() {
        let raw = serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "token_type": "bearer",
            "expires_in": 7200,
            "user": {
                "id": "u-1",
                "email": "a@b.c",
                "user_metadata": { "full_name": "Ada" }
            }
        });
        let wire: WireSession = serde_json::from_value(raw).unwrap();
        let session = wire.into_session();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_in, 7200);
        assert_eq!(session.user.display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn metadata_is_optional() {
        let raw = serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "user": { "id": "u-1", "email": "a@b.c" }
        });
        let wire: WireSession = serde_json::from_value(raw).unwrap();
        let session = wire.into_session();
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.display_name, None);
    }
}
