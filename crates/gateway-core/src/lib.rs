//! Gateway Core - shared backend-client contract
//!
//! The capability surface both the real-client adapter and the mock client
//! implement:
//! - Auth: sign-in/sign-up/sign-out, session reads, change listeners
//! - Tables: chainable select/insert/update/delete/upsert builders
//! - Shared error taxonomy with structural parity across implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_core::BackendHandle;
//!
//! # async fn example(handle: BackendHandle) -> Result<(), Box<dyn std::error::Error>> {
//! let auth = handle.auth();
//! auth.sign_in_with_password("demo@example.com", "demo").await?;
//!
//! let org = handle
//!     .from("organizations")
//!     .select()
//!     .eq("slug", "demo-org")
//!     .single()
//!     .await?;
//!
//! println!("org: {:?}", org.get("name"));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod auth;
pub mod error;
pub mod handle;
pub mod notify;
pub mod query;
pub mod table;
pub mod types;

// Re-exports for convenience
pub use auth::{AuthBackend, AuthListener, AuthSubscription};
pub use error::{AuthError, GatewayError, QueryError};
pub use handle::BackendHandle;
pub use notify::AuthNotifier;
pub use query::{
    DeleteBuilder, InsertBuilder, Rows, SelectBuilder, TableRef, UpdateBuilder, UpsertBuilder,
};
pub use table::{EqFilter, SelectQuery, TableBackend};
pub use types::{
    row_from, row_str, AuthData, AuthEvent, ClientKind, OrgRole, PlatformRole, Row, Session,
    UnknownRole, User,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the client contract
    pub use crate::{
        AuthBackend, AuthData, AuthError, AuthEvent, BackendHandle, ClientKind, GatewayError,
        QueryError, Row, Session, TableBackend, User,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
