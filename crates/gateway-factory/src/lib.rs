//! Gateway Factory - client selection and caching
//!
//! Evaluates the demo policy and hands out either the in-memory mock client
//! or the real REST adapter behind one handle type:
//! - First `get_client` resolves policy and caches the result
//! - Later calls return the cached instance, policy untouched
//! - `reset_client` forces re-resolution on the next access
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_factory::ClientFactory;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ClientFactory::from_env();
//! let client = factory.get_client()?;
//! println!("running against {:?}", client.kind());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod factory;

pub use factory::{ClientFactory, RealClientBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
