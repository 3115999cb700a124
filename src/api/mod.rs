//! The endpoint surface of the ordering service.
//!
//! [`LittleLemonApi`] methods map 1:1 to the HTTP surface the service sits
//! behind; transport wiring itself lives outside this crate. Every method
//! follows the same shape: authenticate the principal, resolve its single
//! [`Role`], consult the access policy, validate input, then dispatch to the
//! owning actor. Errors carry their HTTP status via
//! [`ApiError::status`](crate::error::ApiError::status).
//!
//! | Method | Endpoint |
//! |---|---|
//! | [`me`](LittleLemonApi::me) | `GET /users/users/me` |
//! | [`list_menu_items`](LittleLemonApi::list_menu_items) | `GET /menu-items` |
//! | [`create_menu_item`](LittleLemonApi::create_menu_item) | `POST /menu-items` |
//! | [`get_menu_item`](LittleLemonApi::get_menu_item) | `GET /menu-items/{id}` |
//! | [`update_menu_item`](LittleLemonApi::update_menu_item) | `PUT/PATCH /menu-items/{id}` |
//! | [`delete_menu_item`](LittleLemonApi::delete_menu_item) | `DELETE /menu-items/{id}` |
//! | [`list_group_members`](LittleLemonApi::list_group_members) | `GET /groups/{group}/users` |
//! | [`add_group_member`](LittleLemonApi::add_group_member) | `POST /groups/{group}/users` |
//! | [`get_group_member`](LittleLemonApi::get_group_member) | `GET /groups/{group}/users/{id}` |
//! | [`remove_group_member`](LittleLemonApi::remove_group_member) | `DELETE /groups/{group}/users/{id}` |
//! | [`list_cart`](LittleLemonApi::list_cart) | `GET /cart/menu-items` |
//! | [`add_to_cart`](LittleLemonApi::add_to_cart) | `POST /cart/menu-items` |
//! | [`clear_cart`](LittleLemonApi::clear_cart) | `DELETE /cart/menu-items` |
//! | [`list_orders`](LittleLemonApi::list_orders) | `GET /orders` |
//! | [`place_order`](LittleLemonApi::place_order) | `POST /orders` |
//! | [`get_order`](LittleLemonApi::get_order) | `GET /orders/{id}` |
//! | [`update_order`](LittleLemonApi::update_order) | `PUT/PATCH /orders/{id}` |
//! | [`delete_order`](LittleLemonApi::delete_order) | `DELETE /orders/{id}` |

use tracing::instrument;

use crate::access::{check, normalize_group, Permission, Role};
use crate::clients::{ActorClient, CatalogClient, CommerceClient, IdentityClient};
use crate::domain::{
    CartLine, Group, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, Order, OrderId,
    OrderPatch, OrderUpdate, UserAccount, UserId,
};
use crate::error::ApiError;

/// The role-gated ordering API.
#[derive(Clone)]
pub struct LittleLemonApi {
    catalog: CatalogClient,
    identity: IdentityClient,
    commerce: CommerceClient,
}

impl LittleLemonApi {
    pub fn new(
        catalog: CatalogClient,
        identity: IdentityClient,
        commerce: CommerceClient,
    ) -> Self {
        Self {
            catalog,
            identity,
            commerce,
        }
    }

    /// Resolves the caller to an account and its role. Unknown principals
    /// read as unauthenticated.
    async fn authenticate(&self, principal: UserId) -> Result<(UserAccount, Role), ApiError> {
        let account = self
            .identity
            .get(principal)
            .await?
            .ok_or(ApiError::NotAuthenticated)?;
        let role = Role::of(&account);
        Ok((account, role))
    }

    // --- Identity ---

    /// `GET /users/users/me`: the caller's own account.
    #[instrument(skip(self))]
    pub async fn me(&self, principal: UserId) -> Result<UserAccount, ApiError> {
        let (account, _) = self.authenticate(principal).await?;
        Ok(account)
    }

    // --- Menu catalog ---

    /// `GET /menu-items`: the full menu.
    #[instrument(skip(self))]
    pub async fn list_menu_items(&self, principal: UserId) -> Result<Vec<MenuItem>, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::BrowseMenu)?;
        self.catalog.list().await
    }

    /// `POST /menu-items` (Manager).
    #[instrument(skip(self, params))]
    pub async fn create_menu_item(
        &self,
        principal: UserId,
        params: MenuItemCreate,
    ) -> Result<MenuItem, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::EditMenu)?;
        // A rejected menu item body answers 403 on this endpoint; the
        // contract predates this implementation and is preserved as is.
        self.catalog.create_item(params).await.map_err(|e| match e {
            ApiError::InvalidInput(msg) => ApiError::PermissionDenied(msg),
            other => other,
        })
    }

    /// `GET /menu-items/{id}`.
    #[instrument(skip(self))]
    pub async fn get_menu_item(
        &self,
        principal: UserId,
        id: MenuItemId,
    ) -> Result<MenuItem, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::BrowseMenu)?;
        self.catalog
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Menu item {id} not found")))
    }

    /// `PUT/PATCH /menu-items/{id}` (Manager).
    #[instrument(skip(self, update))]
    pub async fn update_menu_item(
        &self,
        principal: UserId,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::EditMenu)?;
        self.catalog.update_item(id, update).await
    }

    /// `DELETE /menu-items/{id}` (Manager).
    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, principal: UserId, id: MenuItemId) -> Result<(), ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::EditMenu)?;
        self.catalog.delete(id).await
    }

    // --- Group administration (Manager only) ---

    /// `GET /groups/{group}/users` (Manager).
    #[instrument(skip(self))]
    pub async fn list_group_members(
        &self,
        principal: UserId,
        group_name: &str,
    ) -> Result<Vec<UserAccount>, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::AdministerGroups)?;
        let group = known_group(group_name)?;
        self.identity.members_of(group).await
    }

    /// `POST /groups/{group}/users` (Manager): add `username` to the group.
    #[instrument(skip(self))]
    pub async fn add_group_member(
        &self,
        principal: UserId,
        group_name: &str,
        username: &str,
    ) -> Result<(), ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::AdministerGroups)?;
        let group = known_group(group_name)?;
        let user = self
            .identity
            .find_by_username(username)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {username} not found")))?;
        // Joining Manager also grants staff status, inside the identity actor.
        self.identity.join_group(user.id, group).await?;
        Ok(())
    }

    /// `GET /groups/{group}/users/{id}` (Manager).
    ///
    /// Fetches the user by id without checking membership of the named
    /// group, mirroring the reference behavior.
    #[instrument(skip(self))]
    pub async fn get_group_member(
        &self,
        principal: UserId,
        _group_name: &str,
        member: UserId,
    ) -> Result<UserAccount, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::AdministerGroups)?;
        self.identity
            .get(member)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {member} not found")))
    }

    /// `DELETE /groups/{group}/users/{id}` (Manager).
    ///
    /// Removing a user who is not in the group succeeds as a no-op.
    #[instrument(skip(self))]
    pub async fn remove_group_member(
        &self,
        principal: UserId,
        group_name: &str,
        member: UserId,
    ) -> Result<(), ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::AdministerGroups)?;
        let group = known_group(group_name)?;
        let user = self
            .identity
            .get(member)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {member} not found")))?;
        self.identity.leave_group(user.id, group).await?;
        Ok(())
    }

    // --- Cart (Customer only) ---

    /// `GET /cart/menu-items`: the caller's cart.
    #[instrument(skip(self))]
    pub async fn list_cart(&self, principal: UserId) -> Result<Vec<CartLine>, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::UseCart)?;
        self.commerce.list_cart(principal).await
    }

    /// `POST /cart/menu-items`: add `quantity` of the item named `title` to
    /// the caller's cart, merging with an existing line for the same item.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        principal: UserId,
        title: &str,
        quantity: i64,
    ) -> Result<CartLine, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::UseCart)?;
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                ApiError::InvalidInput("Quantity must be a positive integer".into())
            })?;
        let item = self
            .catalog
            .find_by_title(title)
            .await?
            .ok_or_else(|| ApiError::InvalidInput("MenuItem not found".into()))?;
        self.commerce.add_to_cart(principal, item, quantity).await
    }

    /// `DELETE /cart/menu-items`: clear the caller's cart. Idempotent.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, principal: UserId) -> Result<(), ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::UseCart)?;
        self.commerce.clear_cart(principal).await
    }

    // --- Orders ---

    /// `GET /orders`: orders within the caller's visibility scope.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, principal: UserId) -> Result<Vec<Order>, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::BrowseOrders)?;
        self.commerce.list_orders(role.order_scope(principal)).await
    }

    /// `POST /orders`: checkout. Converts the caller's cart into an order in
    /// one transaction; the cart is drained if and only if the order was
    /// created.
    #[instrument(skip(self))]
    pub async fn place_order(&self, principal: UserId) -> Result<Order, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::PlaceOrder)?;
        self.commerce.place_order(principal).await
    }

    /// `GET /orders/{id}`: a single order, if visible to the caller.
    #[instrument(skip(self))]
    pub async fn get_order(&self, principal: UserId, id: OrderId) -> Result<Order, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::BrowseOrders)?;
        self.commerce
            .get_order(role.order_scope(principal), id)
            .await
    }

    /// `PUT/PATCH /orders/{id}`.
    ///
    /// The raw payload is turned into a role-specific command before any
    /// write: Managers may set the status and assign a crew member by
    /// username (who must exist and be in the Delivery Crew group);
    /// Delivery Crew must send a status and nothing else takes effect;
    /// Customers are rejected, even for their own orders. An order outside
    /// the caller's scope reads as not-found before any role handling.
    #[instrument(skip(self, patch))]
    pub async fn update_order(
        &self,
        principal: UserId,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<Order, ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        let scope = role.order_scope(principal);
        // Scoped existence check first: 404 wins over 403 here.
        self.commerce.get_order(scope, id).await?;

        let update = match role {
            Role::Manager => {
                let delivery_crew = match patch.delivery_crew {
                    Some(username) => Some(self.resolve_crew_member(&username).await?),
                    None => None,
                };
                OrderUpdate::Manager {
                    status: patch.status,
                    delivery_crew,
                }
            }
            Role::DeliveryCrew => {
                let status = patch.status.ok_or_else(|| {
                    ApiError::PermissionDenied(
                        "You are not allowed to perform this action.".into(),
                    )
                })?;
                OrderUpdate::Crew { status }
            }
            Role::Customer => {
                return Err(ApiError::PermissionDenied(
                    "You are not allowed to perform this action.".into(),
                ))
            }
        };

        self.commerce.update_order(scope, id, update).await
    }

    /// `DELETE /orders/{id}` (Manager).
    #[instrument(skip(self))]
    pub async fn delete_order(&self, principal: UserId, id: OrderId) -> Result<(), ApiError> {
        let (_, role) = self.authenticate(principal).await?;
        check(role, Permission::DeleteOrder)?;
        self.commerce
            .delete_order(role.order_scope(principal), id)
            .await
    }

    /// Resolves a crew assignment username to an existing Delivery Crew
    /// account.
    async fn resolve_crew_member(&self, username: &str) -> Result<UserId, ApiError> {
        let user = self
            .identity
            .find_by_username(username)
            .await?
            .ok_or_else(|| ApiError::InvalidInput("User does not exist.".into()))?;
        if !user.in_group(Group::DeliveryCrew) {
            return Err(ApiError::InvalidInput(
                "This user is not a delivery crew member.".into(),
            ));
        }
        Ok(user.id)
    }
}

fn known_group(group_name: &str) -> Result<Group, ApiError> {
    normalize_group(group_name)
        .ok_or_else(|| ApiError::NotFound(format!("Group {group_name} not found")))
}
