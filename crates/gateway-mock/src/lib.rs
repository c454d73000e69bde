//! Gateway Mock - in-memory simulation of the backend client
//!
//! A drop-in replacement for the real client, used when demo mode is active:
//! - Seeded relational-ish store with filtered reads and mutating writes
//! - Single-session auth emulation with deterministic credential rules
//! - Simulated network latency so loading states are exercised
//! - Deferred auth-change notifications with a strict ordering contract
//!
//! The store is memory-only and resets when recreated; nothing survives a
//! process restart.
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_mock::{mock_backend_handle, MockClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = mock_backend_handle(MockClientConfig::new());
//! handle.auth().sign_in_with_password("demo@example.com", "demo").await?;
//!
//! let orgs = handle.from("organizations").select().await?;
//! println!("{} organizations seeded", orgs.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod latency;
pub mod seed;
pub mod store;
pub mod tables;

// Re-exports for convenience
pub use auth::MockAuth;
pub use client::{mock_backend_handle, MockClientConfig};
pub use latency::LatencyProfile;
pub use seed::{
    demo_admin, demo_user, DEMO_ADMIN_EMAIL, DEMO_ADMIN_ID, DEMO_ORG_ID, DEMO_USER_EMAIL,
    DEMO_USER_ID,
};
pub use store::MockStore;
pub use tables::MockTables;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
