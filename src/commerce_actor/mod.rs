//! The commerce actor: per-user carts and the cart-to-order workflow.
//!
//! Carts and orders share one actor on purpose. Checkout must atomically
//! snapshot the cart into an order and drain it, and a cart merge must be an
//! atomic read-modify-write; placing both stores behind a single sequential
//! mailbox makes every request a transaction. A checkout is additionally
//! built as an explicit unit of work: the order, its lines and its total are
//! constructed in memory and committed together with the cart drain, so a
//! rejected request leaves both stores untouched.
//!
//! Role gating and payload validation happen in the API layer before a
//! message is sent here; this actor only enforces the data rules (non-empty
//! cart, visibility scope) that depend on its own state.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::clients::CommerceClient;
use crate::domain::{
    CartLine, MenuItem, Order, OrderId, OrderLine, OrderScope, OrderStatus, OrderUpdate, UserId,
};
use crate::error::ApiError;

/// One-shot response channel carried inside every commerce request.
pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

/// Messages understood by the [`CommerceActor`].
#[derive(Debug)]
pub enum CommerceRequest {
    CartList {
        user: UserId,
        respond_to: Responder<Vec<CartLine>>,
    },
    /// Add `quantity` of `item` to the user's cart, merging into an existing
    /// line for the same item.
    CartAdd {
        user: UserId,
        item: MenuItem,
        quantity: u32,
        respond_to: Responder<CartLine>,
    },
    CartClear {
        user: UserId,
        respond_to: Responder<()>,
    },
    /// Checkout: convert the user's cart into an order.
    PlaceOrder {
        user: UserId,
        respond_to: Responder<Order>,
    },
    OrderList {
        scope: OrderScope,
        respond_to: Responder<Vec<Order>>,
    },
    OrderGet {
        scope: OrderScope,
        id: OrderId,
        respond_to: Responder<Order>,
    },
    OrderUpdate {
        scope: OrderScope,
        id: OrderId,
        update: OrderUpdate,
        respond_to: Responder<Order>,
    },
    OrderDelete {
        scope: OrderScope,
        id: OrderId,
        respond_to: Responder<()>,
    },
}

/// Owns every cart line and every placed order.
pub struct CommerceActor {
    receiver: mpsc::Receiver<CommerceRequest>,
    carts: HashMap<UserId, Vec<CartLine>>,
    orders: HashMap<OrderId, Order>,
    next_order_id: OrderId,
}

/// Creates a new commerce actor and its client.
pub fn new() -> (CommerceActor, CommerceClient) {
    let (sender, receiver) = mpsc::channel(32);
    let actor = CommerceActor {
        receiver,
        carts: HashMap::new(),
        orders: HashMap::new(),
        next_order_id: 1,
    };
    (actor, CommerceClient::new(sender))
}

impl CommerceActor {
    /// Runs the actor's event loop until every client handle is dropped.
    pub async fn run(mut self) {
        info!("Commerce actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CommerceRequest::CartList { user, respond_to } => {
                    let lines = self.carts.get(&user).cloned().unwrap_or_default();
                    debug!(user, count = lines.len(), "CartList");
                    let _ = respond_to.send(Ok(lines));
                }
                CommerceRequest::CartAdd {
                    user,
                    item,
                    quantity,
                    respond_to,
                } => {
                    debug!(user, item = %item.title, quantity, "CartAdd");
                    let result = self.cart_add(user, &item, quantity);
                    if let Err(e) = &result {
                        warn!(user, error = %e, "Cart add rejected");
                    }
                    let _ = respond_to.send(result);
                }
                CommerceRequest::CartClear { user, respond_to } => {
                    let removed = self.carts.remove(&user).map_or(0, |lines| lines.len());
                    debug!(user, removed, "CartClear");
                    let _ = respond_to.send(Ok(()));
                }
                CommerceRequest::PlaceOrder { user, respond_to } => {
                    let result = self.place_order(user);
                    match &result {
                        Ok(order) => {
                            info!(user, order = order.id, total = %order.total, "Order placed")
                        }
                        Err(e) => warn!(user, error = %e, "Checkout rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                CommerceRequest::OrderList { scope, respond_to } => {
                    let mut orders: Vec<Order> = self
                        .orders
                        .values()
                        .filter(|order| scope.admits(order))
                        .cloned()
                        .collect();
                    orders.sort_by_key(|order| order.id);
                    debug!(?scope, count = orders.len(), "OrderList");
                    let _ = respond_to.send(Ok(orders));
                }
                CommerceRequest::OrderGet {
                    scope,
                    id,
                    respond_to,
                } => {
                    debug!(?scope, id, "OrderGet");
                    let _ = respond_to.send(self.visible_order(scope, id).cloned());
                }
                CommerceRequest::OrderUpdate {
                    scope,
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(?scope, id, ?update, "OrderUpdate");
                    let result = self.update_order(scope, id, update);
                    if let Err(e) = &result {
                        warn!(id, error = %e, "Order update failed");
                    }
                    let _ = respond_to.send(result);
                }
                CommerceRequest::OrderDelete {
                    scope,
                    id,
                    respond_to,
                } => {
                    debug!(?scope, id, "OrderDelete");
                    let visible = self
                        .orders
                        .get(&id)
                        .map_or(false, |order| scope.admits(order));
                    let result = if visible {
                        self.orders.remove(&id);
                        info!(id, "Order deleted");
                        Ok(())
                    } else {
                        Err(not_found(id))
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(
            carts = self.carts.len(),
            orders = self.orders.len(),
            "Commerce actor shutdown"
        );
    }

    /// Adds to the user's cart, merging on an existing line for the same
    /// item. The merge extends the line at its frozen unit price; the current
    /// catalog price only matters for a brand-new line. An addition the line
    /// cannot represent is rejected without touching the cart.
    fn cart_add(
        &mut self,
        user: UserId,
        item: &MenuItem,
        quantity: u32,
    ) -> Result<CartLine, ApiError> {
        let lines = self.carts.entry(user).or_default();
        match lines.iter_mut().find(|line| line.menu_item == item.id) {
            Some(line) => {
                line.merge(quantity).map_err(ApiError::InvalidInput)?;
                Ok(line.clone())
            }
            None => {
                let line = CartLine::open(item, quantity).map_err(ApiError::InvalidInput)?;
                lines.push(line.clone());
                Ok(line)
            }
        }
    }

    /// The checkout transaction: snapshot the cart into a new order, compute
    /// the total, commit the order and drain the cart in one step.
    fn place_order(&mut self, user: UserId) -> Result<Order, ApiError> {
        let lines = match self.carts.get(&user) {
            Some(lines) if !lines.is_empty() => lines,
            _ => return Err(ApiError::InvalidInput("Cart is empty".into())),
        };

        // Build the full order in memory before touching either store.
        let items: Vec<OrderLine> = lines.iter().map(OrderLine::from).collect();
        let total: Decimal = items.iter().map(|line| line.price).sum();
        let order = Order {
            id: self.next_order_id,
            user,
            delivery_crew: None,
            status: OrderStatus::Pending,
            total,
            date: Utc::now(),
            items,
        };

        // Commit.
        self.next_order_id += 1;
        self.orders.insert(order.id, order.clone());
        self.carts.remove(&user);
        Ok(order)
    }

    fn update_order(
        &mut self,
        scope: OrderScope,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, ApiError> {
        let order = match self.orders.get_mut(&id) {
            Some(order) if scope.admits(order) => order,
            _ => return Err(not_found(id)),
        };

        match update {
            OrderUpdate::Manager {
                status,
                delivery_crew,
            } => {
                if let Some(status) = status {
                    order.status = status;
                }
                if let Some(crew) = delivery_crew {
                    order.delivery_crew = Some(crew);
                }
            }
            OrderUpdate::Crew { status } => {
                order.status = status;
            }
        }
        Ok(order.clone())
    }

    fn visible_order(&self, scope: OrderScope, id: OrderId) -> Result<&Order, ApiError> {
        match self.orders.get(&id) {
            Some(order) if scope.admits(order) => Ok(order),
            // Out-of-scope reads as not-found so existence does not leak.
            _ => Err(not_found(id)),
        }
    }
}

fn not_found(id: OrderId) -> ApiError {
    ApiError::NotFound(format!("Order {id} not found"))
}
