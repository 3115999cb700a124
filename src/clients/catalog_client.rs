use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::domain::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use crate::error::ApiError;
use crate::framework::{FrameworkError, ResourceClient};

/// Client for the menu catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<MenuItem>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItem, ApiError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ApiError::from)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MenuItem>, ApiError> {
        debug!("Sending request");
        self.inner.list(()).await.map_err(ApiError::from)
    }

    /// Lookup by title, the catalog's unique human key.
    #[instrument(skip(self))]
    pub async fn find_by_title(&self, title: &str) -> Result<Option<MenuItem>, ApiError> {
        debug!("Sending request");
        self.inner
            .find(title.to_owned())
            .await
            .map_err(ApiError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, ApiError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(ApiError::from)
    }
}

#[async_trait]
impl ActorClient<MenuItem> for CatalogClient {
    type Error = ApiError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ApiError {
        ApiError::from(e)
    }
}
