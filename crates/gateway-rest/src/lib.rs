//! Gateway REST - real-client adapter
//!
//! Implements the shared auth and table capability traits over the backend's
//! REST surface, so the factory can hand out a real client and a mock client
//! behind the same [`gateway_core::BackendHandle`] type. The wire protocol
//! itself is the backend's contract; this crate only satisfies it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod client;
pub mod tables;
mod wire;

pub use auth::RestAuth;
pub use client::rest_backend_handle;
pub use tables::RestTables;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
