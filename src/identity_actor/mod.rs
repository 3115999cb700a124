//! The identity store: accounts, group membership and staff status.

pub mod entity;

pub use entity::{AccountAction, AccountFilter};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::IdentityClient;
use crate::domain::UserAccount;
use crate::framework::ResourceActor;

/// Creates a new identity actor and its client.
pub fn new() -> (ResourceActor<UserAccount>, IdentityClient) {
    let counter = Arc::new(AtomicU64::new(1));
    let next_id = move || counter.fetch_add(1, Ordering::SeqCst);

    let (actor, generic_client) = ResourceActor::new(32, next_id);
    (actor, IdentityClient::new(generic_client))
}
