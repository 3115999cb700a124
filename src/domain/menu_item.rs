use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier for a catalog entry.
pub type MenuItemId = u64;

/// A dish on the Little Lemon menu.
///
/// The `title` is the human key: cart additions reference menu items by title,
/// and the catalog actor enforces its uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    /// Currency amount with two decimal places.
    pub price: Decimal,
    pub category: String,
    pub featured: bool,
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub featured: bool,
}

/// Partial update for a menu item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}
