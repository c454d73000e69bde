//! Seeded demo records
//!
//! The identities and rows a fresh mock store starts with. Ids are stable
//! strings so demo flows (and tests) can reference them directly.

use chrono::Utc;
use gateway_core::{row_from, Row, User};
use serde_json::json;

/// Id of the seeded regular demo user.
pub const DEMO_USER_ID: &str = "demo-user-123";
/// Email of the seeded regular demo user.
pub const DEMO_USER_EMAIL: &str = "demo@example.com";
/// Id of the seeded platform-admin user.
pub const DEMO_ADMIN_ID: &str = "demo-admin-456";
/// Email of the seeded platform-admin user.
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";
/// Id of the seeded organization.
pub const DEMO_ORG_ID: &str = "demo-org-456";

/// The seeded regular user identity.
#[must_use]
pub fn demo_user() -> User {
    User::new(DEMO_USER_ID, DEMO_USER_EMAIL).with_display_name("Demo User")
}

/// The seeded admin identity.
#[must_use]
pub fn demo_admin() -> User {
    User::new(DEMO_ADMIN_ID, DEMO_ADMIN_EMAIL).with_display_name("Demo Admin")
}

fn profile_row(user: &User) -> Row {
    let now = Utc::now().to_rfc3339();
    row_from(&[
        ("id", json!(user.id)),
        ("email", json!(user.email)),
        ("full_name", json!(user.display_name)),
        ("avatar_url", json!(null)),
        ("created_at", json!(now)),
        ("updated_at", json!(now)),
    ])
}

/// Table names and rows seeded at store construction, in iteration order.
#[must_use]
pub fn seed_tables() -> Vec<(&'static str, Vec<Row>)> {
    let now = Utc::now().to_rfc3339();
    vec![
        ("profiles", vec![profile_row(&demo_user()), profile_row(&demo_admin())]),
        (
            "organizations",
            vec![row_from(&[
                ("id", json!(DEMO_ORG_ID)),
                ("name", json!("Demo Organization")),
                ("slug", json!("demo-org")),
                ("owner_id", json!(DEMO_USER_ID)),
                ("created_at", json!(now)),
                ("updated_at", json!(now)),
            ])],
        ),
        (
            "organization_members",
            vec![
                row_from(&[
                    ("id", json!("demo-member-789")),
                    ("organization_id", json!(DEMO_ORG_ID)),
                    ("user_id", json!(DEMO_USER_ID)),
                    ("role", json!("owner")),
                    ("created_at", json!(now)),
                ]),
                row_from(&[
                    ("id", json!("demo-member-790")),
                    ("organization_id", json!(DEMO_ORG_ID)),
                    ("user_id", json!(DEMO_ADMIN_ID)),
                    ("role", json!("admin")),
                    ("created_at", json!(now)),
                ]),
            ],
        ),
        (
            "system_roles",
            vec![row_from(&[
                ("user_id", json!(DEMO_ADMIN_ID)),
                ("role", json!("platform_admin")),
                ("created_at", json!(now)),
            ])],
        ),
        (
            "system_settings",
            vec![
                row_from(&[
                    ("key", json!("demo_mode_enabled")),
                    ("value", json!({ "enabled": true })),
                    ("updated_at", json!(now)),
                ]),
                row_from(&[
                    ("key", json!("maintenance_mode")),
                    ("value", json!({ "enabled": false, "message": "" })),
                    ("updated_at", json!(now)),
                ]),
            ],
        ),
        ("organization_invitations", vec![]),
        ("audit_logs", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::row_str;

    #[test]
    fn seed_covers_all_tables() {
        let tables = seed_tables();
        let names: Vec<&str> = tables.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "profiles",
                "organizations",
                "organization_members",
                "system_roles",
                "system_settings",
                "organization_invitations",
                "audit_logs",
            ]
        );
    }

    #[test]
    fn admin_holds_platform_admin_role() {
        let tables = seed_tables();
        let roles = &tables.iter().find(|(name, _)| *name == "system_roles").unwrap().1;
        assert_eq!(roles.len(), 1);
        assert_eq!(row_str(&roles[0], "user_id"), Some(DEMO_ADMIN_ID));
        assert_eq!(row_str(&roles[0], "role"), Some("platform_admin"));
    }

    #[test]
    fn both_identities_have_profiles() {
        let tables = seed_tables();
        let profiles = &tables.iter().find(|(name, _)| *name == "profiles").unwrap().1;
        let ids: Vec<&str> = profiles.iter().filter_map(|row| row_str(row, "id")).collect();
        assert_eq!(ids, vec![DEMO_USER_ID, DEMO_ADMIN_ID]);
    }
}
