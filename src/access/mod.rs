//! Role resolution and the per-endpoint access policy.
//!
//! Every request resolves its principal to exactly one [`Role`] up front;
//! endpoint handlers then consult the [`check`] table instead of re-querying
//! group membership ad hoc. Manager and Delivery Crew membership take
//! precedence over the default Customer role, in that order.

use crate::domain::{Group, OrderScope, UserAccount, UserId};
use crate::error::ApiError;

/// The single role a principal acts under for authorization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Manager,
    DeliveryCrew,
    Customer,
}

impl Role {
    /// Resolves the role of an account from its group memberships.
    ///
    /// An account in both groups acts as a Manager.
    pub fn of(account: &UserAccount) -> Role {
        if account.in_group(Group::Manager) {
            Role::Manager
        } else if account.in_group(Group::DeliveryCrew) {
            Role::DeliveryCrew
        } else {
            Role::Customer
        }
    }

    /// The slice of the order store this role may see, for a caller with the
    /// given user id.
    pub fn order_scope(self, caller: UserId) -> OrderScope {
        match self {
            Role::Manager => OrderScope::All,
            Role::DeliveryCrew => OrderScope::AssignedTo(caller),
            Role::Customer => OrderScope::OwnedBy(caller),
        }
    }
}

/// Maps an external (URL-facing) group name to the internal group.
///
/// Matching is case-insensitive; unknown names yield `None`, which every
/// caller treats as a not-found lookup rather than an error.
pub fn normalize_group(external: &str) -> Option<Group> {
    let name = external.to_ascii_lowercase();
    match name.as_str() {
        "manager" => Some(Group::Manager),
        "delivery-crew" | "delivery crew" => Some(Group::DeliveryCrew),
        _ => None,
    }
}

/// A right a role may hold, one per gated endpoint family.
///
/// Order updates are not listed here: they are authorized through the
/// role-specific [`OrderUpdate`](crate::domain::OrderUpdate) command variants
/// built by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read the menu. Open to every authenticated principal.
    BrowseMenu,
    /// Create, update or delete menu items.
    EditMenu,
    /// View and change group membership.
    AdministerGroups,
    /// Read, fill or clear one's own cart.
    UseCart,
    /// Convert one's cart into an order.
    PlaceOrder,
    /// List orders (visibility is narrowed separately by [`OrderScope`]).
    BrowseOrders,
    /// Hard-delete an order.
    DeleteOrder,
}

/// The stateless authorization predicate: may `role` exercise `permission`?
///
/// Denials surface as [`ApiError::PermissionDenied`] with the caller-facing
/// message of the endpoint family.
pub fn check(role: Role, permission: Permission) -> Result<(), ApiError> {
    let allowed = match permission {
        Permission::BrowseMenu | Permission::BrowseOrders => true,
        Permission::EditMenu | Permission::AdministerGroups | Permission::DeleteOrder => {
            role == Role::Manager
        }
        // Managers and Delivery Crew have no cart at all, not merely an
        // empty one.
        Permission::UseCart | Permission::PlaceOrder => role == Role::Customer,
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(denial_message(permission).into()))
    }
}

fn denial_message(permission: Permission) -> &'static str {
    match permission {
        Permission::PlaceOrder => "You cannot perform this action.",
        Permission::DeleteOrder => "You do not have permission to delete this order.",
        _ => "You are not allowed to perform this action.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn account(groups: &[Group]) -> UserAccount {
        UserAccount {
            id: 1,
            username: "test".into(),
            email: "test@littlelemon.com".into(),
            groups: groups.iter().copied().collect::<BTreeSet<_>>(),
            is_staff: false,
        }
    }

    #[test]
    fn role_resolution_prefers_manager() {
        assert_eq!(Role::of(&account(&[])), Role::Customer);
        assert_eq!(Role::of(&account(&[Group::DeliveryCrew])), Role::DeliveryCrew);
        assert_eq!(Role::of(&account(&[Group::Manager])), Role::Manager);
        assert_eq!(
            Role::of(&account(&[Group::Manager, Group::DeliveryCrew])),
            Role::Manager
        );
    }

    #[test]
    fn group_names_normalize_case_insensitively() {
        assert_eq!(normalize_group("manager"), Some(Group::Manager));
        assert_eq!(normalize_group("Manager"), Some(Group::Manager));
        assert_eq!(normalize_group("delivery-crew"), Some(Group::DeliveryCrew));
        assert_eq!(normalize_group("Delivery-Crew"), Some(Group::DeliveryCrew));
        assert_eq!(normalize_group("unknown"), None);
        assert_eq!(normalize_group(""), None);
    }

    #[test]
    fn policy_table() {
        for role in [Role::Manager, Role::DeliveryCrew, Role::Customer] {
            assert!(check(role, Permission::BrowseMenu).is_ok());
            assert!(check(role, Permission::BrowseOrders).is_ok());
        }

        assert!(check(Role::Manager, Permission::EditMenu).is_ok());
        assert!(check(Role::Manager, Permission::AdministerGroups).is_ok());
        assert!(check(Role::Manager, Permission::DeleteOrder).is_ok());
        assert!(check(Role::DeliveryCrew, Permission::EditMenu).is_err());
        assert!(check(Role::Customer, Permission::AdministerGroups).is_err());

        // Carts belong to customers only; elevated roles are rejected outright.
        assert!(check(Role::Customer, Permission::UseCart).is_ok());
        assert!(check(Role::Customer, Permission::PlaceOrder).is_ok());
        assert!(check(Role::Manager, Permission::UseCart).is_err());
        assert!(check(Role::DeliveryCrew, Permission::PlaceOrder).is_err());
    }

    #[test]
    fn denial_messages_match_the_endpoint_family() {
        let err = check(Role::DeliveryCrew, Permission::PlaceOrder).unwrap_err();
        assert_eq!(
            err,
            ApiError::PermissionDenied("You cannot perform this action.".into())
        );
        let err = check(Role::Customer, Permission::DeleteOrder).unwrap_err();
        assert_eq!(
            err,
            ApiError::PermissionDenied("You do not have permission to delete this order.".into())
        );
    }
}
