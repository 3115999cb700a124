//! Generic actor framework backing the catalog and identity stores.
//!
//! # Main Components
//!
//! - [`Entity`] - trait a stored resource type implements
//! - [`ResourceActor`] - generic actor owning a collection of entities
//! - [`ResourceClient`] - typed handle for talking to an actor
//! - [`FrameworkError`] - transport- and store-level errors
//!
//! # Testing
//!
//! See the [`mock`] module for testing clients without spawning full actors.

pub mod core;
pub mod mock;

pub use self::core::*;
