use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::domain::{Group, UserAccount, UserCreate, UserId};
use crate::error::ApiError;
use crate::framework::{FrameworkError, ResourceClient};
use crate::identity_actor::{AccountAction, AccountFilter};

/// Client for the identity actor.
#[derive(Clone)]
pub struct IdentityClient {
    inner: ResourceClient<UserAccount>,
}

impl IdentityClient {
    pub fn new(inner: ResourceClient<UserAccount>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_account(&self, params: UserCreate) -> Result<UserAccount, ApiError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ApiError::from)
    }

    /// Lookup by username, the identity store's unique human key.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, ApiError> {
        debug!("Sending request");
        self.inner
            .find(username.to_owned())
            .await
            .map_err(ApiError::from)
    }

    /// All accounts currently in `group`.
    #[instrument(skip(self))]
    pub async fn members_of(&self, group: Group) -> Result<Vec<UserAccount>, ApiError> {
        debug!("Sending request");
        self.inner
            .list(AccountFilter::InGroup(group))
            .await
            .map_err(ApiError::from)
    }

    /// Adds the account to `group`. Returns whether membership changed.
    #[instrument(skip(self))]
    pub async fn join_group(&self, id: UserId, group: Group) -> Result<bool, ApiError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, AccountAction::Join(group))
            .await
            .map_err(ApiError::from)
    }

    /// Removes the account from `group`. Removing a non-member is a no-op.
    #[instrument(skip(self))]
    pub async fn leave_group(&self, id: UserId, group: Group) -> Result<bool, ApiError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, AccountAction::Leave(group))
            .await
            .map_err(ApiError::from)
    }
}

#[async_trait]
impl ActorClient<UserAccount> for IdentityClient {
    type Error = ApiError;

    fn inner(&self) -> &ResourceClient<UserAccount> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ApiError {
        ApiError::from(e)
    }
}
