//! Gateway Session - current-user state for the UI
//!
//! Consumes whichever client the factory selected and maintains the signed-in
//! user/session snapshot the rest of the interface renders from.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod store;

pub use store::{AuthSessionStore, SessionState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
