//! [`Entity`] implementation for [`MenuItem`], making the catalog a
//! [`ResourceActor`](crate::framework::ResourceActor)-managed store.

use rust_decimal::Decimal;

use crate::domain::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use crate::framework::Entity;

fn validate(title: &str, price: Decimal) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("title must not be empty".into());
    }
    if price < Decimal::ZERO {
        return Err("price must not be negative".into());
    }
    Ok(())
}

impl Entity for MenuItem {
    type Id = MenuItemId;
    type Key = String;
    type Filter = ();
    type CreateParams = MenuItemCreate;
    type UpdateParams = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, String> {
        validate(&params.title, params.price)?;
        Ok(Self {
            id,
            title: params.title,
            price: params.price,
            category: params.category,
            featured: params.featured,
        })
    }

    fn id(&self) -> MenuItemId {
        self.id
    }

    /// Menu items are looked up by title, the unique human key.
    fn key(&self) -> String {
        self.title.clone()
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn apply_update(&mut self, update: MenuItemUpdate) -> Result<(), String> {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        validate(&self.title, self.price)
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
