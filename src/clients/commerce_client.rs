use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::commerce_actor::CommerceRequest;
use crate::domain::{CartLine, MenuItem, Order, OrderId, OrderScope, OrderUpdate, UserId};
use crate::error::ApiError;

/// Client for the commerce actor (carts and orders).
///
/// Unlike the catalog and identity clients this does not wrap a generic
/// [`ResourceClient`](crate::framework::ResourceClient): the commerce actor
/// speaks its own request set so that checkout and cart merges are single
/// messages, and therefore single transactions.
#[derive(Clone)]
pub struct CommerceClient {
    sender: mpsc::Sender<CommerceRequest>,
}

impl CommerceClient {
    pub fn new(sender: mpsc::Sender<CommerceRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, ApiError>>) -> CommerceRequest,
    ) -> Result<T, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ApiError::Internal("commerce actor closed".into()))?;
        response
            .await
            .map_err(|_| ApiError::Internal("commerce actor dropped response channel".into()))?
    }

    #[instrument(skip(self))]
    pub async fn list_cart(&self, user: UserId) -> Result<Vec<CartLine>, ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::CartList { user, respond_to })
            .await
    }

    #[instrument(skip(self, item))]
    pub async fn add_to_cart(
        &self,
        user: UserId,
        item: MenuItem,
        quantity: u32,
    ) -> Result<CartLine, ApiError> {
        debug!(?item, "Sending request");
        self.request(|respond_to| CommerceRequest::CartAdd {
            user,
            item,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, user: UserId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::CartClear { user, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, user: UserId) -> Result<Order, ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::PlaceOrder { user, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::OrderList { scope, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, scope: OrderScope, id: OrderId) -> Result<Order, ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::OrderGet {
            scope,
            id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        scope: OrderScope,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::OrderUpdate {
            scope,
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, scope: OrderScope, id: OrderId) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request(|respond_to| CommerceRequest::OrderDelete {
            scope,
            id,
            respond_to,
        })
        .await
    }
}
