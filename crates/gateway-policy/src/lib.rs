//! Gateway Policy - demo-mode decision engine
//!
//! Decides whether the application runs against the real backend or the
//! in-memory simulation:
//! - Injected [`DemoSettings`] store for the runtime admin override
//! - Three precedence tiers: override, environment flag, credential fallback
//! - A [`DemoStatus`] verdict recomputed on every query

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod policy;
pub mod settings;

pub use policy::{DemoPolicy, DemoReason, DemoStatus};
pub use settings::DemoSettings;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
