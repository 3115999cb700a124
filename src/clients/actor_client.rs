use async_trait::async_trait;

use crate::framework::{Entity, FrameworkError, ResourceClient};

/// Shared plumbing for resource-specific clients.
///
/// Provides default `get`/`delete` implementations so each client only spells
/// out its domain-specific calls.
#[async_trait]
pub trait ActorClient<T: Entity>: Send + Sync {
    /// The error type this client surfaces.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors into the client's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
