use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{MenuItem, MenuItemId};

/// One pending line in a user's cart: a quantity of a single menu item.
///
/// `unit_price` is a snapshot of the catalog price taken at first insertion.
/// Merging more of the same item extends the line at that frozen price, so a
/// later catalog price change never affects an existing cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item: MenuItemId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Always `quantity * unit_price` at the moment of last mutation.
    pub price: Decimal,
}

impl CartLine {
    /// Opens a new line for `quantity` of `item` at the item's current price.
    pub fn open(item: &MenuItem, quantity: u32) -> Result<Self, String> {
        let unit_price = item.price;
        let price = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or("Cart line price is too large")?;
        Ok(Self {
            menu_item: item.id,
            title: item.title.clone(),
            quantity,
            unit_price,
            price,
        })
    }

    /// Adds `quantity` more units at the line's frozen `unit_price`.
    ///
    /// A line whose quantity or price would no longer be representable is
    /// left untouched and the addition is rejected.
    pub fn merge(&mut self, quantity: u32) -> Result<(), String> {
        let merged_quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or("Cart line quantity is too large")?;
        let merged_price = self
            .unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(|extension| self.price.checked_add(extension))
            .ok_or("Cart line price is too large")?;

        self.quantity = merged_quantity;
        self.price = merged_price;
        Ok(())
    }
}
