//! Type-safe client handles for the three actors.

pub mod actor_client;
pub mod catalog_client;
pub mod commerce_client;
pub mod identity_client;

pub use actor_client::*;
pub use catalog_client::*;
pub use commerce_client::*;
pub use identity_client::*;
