//! The menu catalog: a [`ResourceActor`] over [`MenuItem`] entities.

pub mod entity;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::clients::CatalogClient;
use crate::domain::MenuItem;
use crate::framework::ResourceActor;

/// Creates a new catalog actor and its client.
pub fn new() -> (ResourceActor<MenuItem>, CatalogClient) {
    let counter = Arc::new(AtomicU64::new(1));
    let next_id = move || counter.fetch_add(1, Ordering::SeqCst);

    let (actor, generic_client) = ResourceActor::new(32, next_id);
    (actor, CatalogClient::new(generic_client))
}
