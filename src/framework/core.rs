//! Generic building blocks for the actor-backed stores.
//!
//! ## Key Types
//!
//! - [`Entity`]: the trait a stored resource type must implement.
//! - [`ResourceActor`]: the generic actor owning a collection of entities.
//! - [`ResourceClient`]: the typed handle for talking to a [`ResourceActor`].
//! - [`FrameworkError`]: transport- and store-level errors.
//!
//! Each actor processes its mailbox sequentially, so every request observes
//! and mutates the store without interleaving. That sequential loop is the
//! transaction boundary the rest of the crate relies on; no locks are needed.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Contract a resource type satisfies to be managed by [`ResourceActor`].
///
/// Associated types keep every operation payload specific to its entity: you
/// cannot send a menu-item create payload to the identity actor.
///
/// Beyond CRUD, entities expose a human `Key` (menu item title, username)
/// that the actor keeps unique and answers lookups by, and a `Filter` used
/// for listing.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Unique identifier, assigned by the actor on create.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug;

    /// Human lookup key. Unique across the store.
    type Key: Eq + Clone + Send + Sync + Debug;

    /// Listing filter.
    type Filter: Send + Sync + Debug;

    /// Payload for creating a new instance.
    type CreateParams: Send + Sync + Debug;

    /// Payload for updating an existing instance.
    type UpdateParams: Send + Sync + Debug;

    /// Resource-specific operation (e.g. group membership changes).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Construct and validate the full entity from an assigned id and the
    /// create payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// The entity's assigned id.
    fn id(&self) -> Self::Id;

    /// The entity's current human key.
    fn key(&self) -> Self::Key;

    /// Whether the entity is part of a filtered listing.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Apply an update payload. Key-uniqueness of the result is checked by
    /// the actor before the change is committed.
    fn apply_update(&mut self, update: Self::UpdateParams) -> Result<(), String>;

    /// Handle a custom action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors raised by the actor plumbing or the store itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Invalid(String),
}

/// One-shot response channel carried inside every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Messages understood by a [`ResourceActor`].
#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Lookup by human key (title, username).
    Find {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    /// Filtered listing, sorted by id.
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// The generic actor owning a keyed collection of entities.
///
/// The "server" half: it owns the store and the receiving end of the channel.
/// State is mutated only from inside the message loop.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    fn key_taken(&self, key: &T::Key, excluding: Option<&T::Id>) -> bool {
        self.store
            .iter()
            .any(|(id, item)| Some(id) != excluding && item.key() == *key)
    }

    /// Runs the actor's event loop until every client handle is dropped.
    pub async fn run(mut self) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    let result = match T::from_create_params(id.clone(), params) {
                        Ok(item) if self.key_taken(&item.key(), None) => {
                            warn!(entity_type, %id, "Create rejected: duplicate key");
                            Err(FrameworkError::Duplicate(format!(
                                "{entity_type} with this key already exists"
                            )))
                        }
                        Ok(item) => {
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            Ok(item)
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            Err(FrameworkError::Invalid(e))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Find { key, respond_to } => {
                    let item = self.store.values().find(|item| item.key() == key).cloned();
                    debug!(entity_type, ?key, found = item.is_some(), "Find");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let mut items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    // HashMap iteration order is arbitrary; present listings by id.
                    items.sort_by_key(|item| item.id());
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = match self.store.get(&id) {
                        None => {
                            warn!(entity_type, %id, "Not found");
                            Err(FrameworkError::NotFound(id.to_string()))
                        }
                        Some(item) => {
                            // Apply to a copy so a rejected update leaves the
                            // stored entity untouched.
                            let mut updated = item.clone();
                            match updated.apply_update(update) {
                                Err(e) => {
                                    warn!(entity_type, %id, error = %e, "Update failed");
                                    Err(FrameworkError::Invalid(e))
                                }
                                Ok(()) if self.key_taken(&updated.key(), Some(&id)) => {
                                    warn!(entity_type, %id, "Update rejected: duplicate key");
                                    Err(FrameworkError::Duplicate(format!(
                                        "{entity_type} with this key already exists"
                                    )))
                                }
                                Ok(()) => {
                                    self.store.insert(id.clone(), updated.clone());
                                    info!(entity_type, %id, "Updated");
                                    Ok(updated)
                                }
                            }
                        }
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = match self.store.remove(&id) {
                        Some(_) => {
                            info!(entity_type, %id, size = self.store.len(), "Deleted");
                            Ok(())
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            Err(FrameworkError::NotFound(id.to_string()))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            let result =
                                item.handle_action(action).map_err(FrameworkError::Invalid);
                            match &result {
                                Ok(_) => info!(entity_type, %id, "Action ok"),
                                Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                            }
                            result
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            Err(FrameworkError::NotFound(id.to_string()))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

/// A type-safe client handle for a [`ResourceActor`].
#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn find(&self, key: T::Key) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Find { key, respond_to })
            .await
    }

    pub async fn list(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
