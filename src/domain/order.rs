use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CartLine, MenuItemId, UserId};

/// Identifier for a placed order.
pub type OrderId = u64;

/// Fulfillment status of an order. Serialized by numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderStatus {
    Pending,
    Delivered,
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> u8 {
        match status {
            OrderStatus::Pending => 0,
            OrderStatus::Delivered => 1,
        }
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderStatus::Pending),
            1 => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status code: {other}")),
        }
    }
}

/// Immutable snapshot of a [`CartLine`] copied into an order at checkout.
///
/// Decouples historical orders from future catalog price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item: MenuItemId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub price: Decimal,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            menu_item: line.menu_item,
            title: line.title.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            price: line.price,
        }
    }
}

/// A placed order.
///
/// `user`, `date`, `items` and `total` are fixed at checkout; only `status`
/// and `delivery_crew` mutate afterwards, through role-gated update commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub delivery_crew: Option<UserId>,
    pub status: OrderStatus,
    /// Sum of line prices, computed once inside the checkout transaction.
    pub total: Decimal,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

/// Raw order-update payload as submitted by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    /// Username of the crew member to assign (Manager only).
    pub delivery_crew: Option<String>,
}

/// Role-specific update command, validated before any write reaches the
/// order store.
#[derive(Debug, Clone)]
pub enum OrderUpdate {
    /// Managers may change any mutable field; the crew member has already
    /// been resolved to an existing Delivery Crew account.
    Manager {
        status: Option<OrderStatus>,
        delivery_crew: Option<UserId>,
    },
    /// Delivery Crew may only set the status.
    Crew { status: OrderStatus },
}

/// The slice of the order store a caller is allowed to see.
///
/// Orders outside the scope read as not-found, never as forbidden, so their
/// existence does not leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Managers see every order.
    All,
    /// Delivery Crew see orders assigned to them.
    AssignedTo(UserId),
    /// Customers see their own orders.
    OwnedBy(UserId),
}

impl OrderScope {
    pub fn admits(&self, order: &Order) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::AssignedTo(crew) => order.delivery_crew == Some(*crew),
            OrderScope::OwnedBy(user) => order.user == *user,
        }
    }
}
