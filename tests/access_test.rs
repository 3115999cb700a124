use little_lemon::domain::{
    Group, MenuItem, MenuItemCreate, OrderPatch, UserCreate, UserId,
};
use little_lemon::error::ApiError;
use little_lemon::lifecycle::LemonSystem;
use rust_decimal::Decimal;

async fn seed_user(system: &LemonSystem, username: &str) -> UserId {
    system
        .identity_client
        .create_account(UserCreate {
            username: username.into(),
            email: format!("{username}@littlelemon.com"),
        })
        .await
        .expect("Failed to create account")
        .id
}

async fn seed_member(system: &LemonSystem, username: &str, group: Group) -> UserId {
    let id = seed_user(system, username).await;
    system
        .identity_client
        .join_group(id, group)
        .await
        .expect("Failed to join group");
    id
}

async fn seed_item(system: &LemonSystem, manager: UserId, title: &str, cents: i64) -> MenuItem {
    system
        .api
        .create_menu_item(
            manager,
            MenuItemCreate {
                title: title.into(),
                price: Decimal::new(cents, 2),
                category: "mains".into(),
                featured: false,
            },
        )
        .await
        .expect("Failed to create menu item")
}

#[tokio::test]
async fn me_returns_the_caller_and_unknown_principals_are_unauthenticated() {
    let system = LemonSystem::new();
    let customer = seed_user(&system, "carla").await;

    let me = system.api.me(customer).await.unwrap();
    assert_eq!(me.username, "carla");
    assert!(!me.is_staff);

    let err = system.api.me(999).await.unwrap_err();
    assert_eq!(err, ApiError::NotAuthenticated);
    assert_eq!(err.status(), 401);

    system.shutdown().await.unwrap();
}

/// An order is visible to its owner, its assigned crew member and any
/// manager; to everyone else it reads as not-found.
#[tokio::test]
async fn order_visibility_is_scoped_by_role_and_ownership() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    let crew_b = seed_member(&system, "dimitri", Group::DeliveryCrew).await;
    let crew_other = seed_member(&system, "darius", Group::DeliveryCrew).await;
    let customer_a = seed_user(&system, "carla").await;
    let customer_c = seed_user(&system, "chris").await;
    seed_item(&system, manager, "Bruschetta", 5_50).await;

    system
        .api
        .add_to_cart(customer_a, "Bruschetta", 1)
        .await
        .unwrap();
    let order = system.api.place_order(customer_a).await.unwrap();
    system
        .api
        .update_order(
            manager,
            order.id,
            OrderPatch {
                status: None,
                delivery_crew: Some("dimitri".into()),
            },
        )
        .await
        .unwrap();

    for viewer in [customer_a, crew_b, manager] {
        assert!(
            system.api.get_order(viewer, order.id).await.is_ok(),
            "viewer {viewer} should see the order"
        );
    }
    for outsider in [customer_c, crew_other] {
        let err = system.api.get_order(outsider, order.id).await.unwrap_err();
        assert_eq!(err.status(), 404, "existence must not leak to {outsider}");
    }

    // Listing follows the same scoping.
    assert_eq!(system.api.list_orders(manager).await.unwrap().len(), 1);
    assert_eq!(system.api.list_orders(crew_b).await.unwrap().len(), 1);
    assert!(system.api.list_orders(crew_other).await.unwrap().is_empty());
    assert!(system.api.list_orders(customer_c).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// External group names normalize case-insensitively; unknown names are
/// not-found.
#[tokio::test]
async fn group_names_are_normalized() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    seed_user(&system, "boris").await;
    seed_user(&system, "dana").await;

    system
        .api
        .add_group_member(manager, "delivery-crew", "boris")
        .await
        .unwrap();
    system
        .api
        .add_group_member(manager, "Delivery-Crew", "dana")
        .await
        .unwrap();

    let members = system
        .api
        .list_group_members(manager, "delivery-crew")
        .await
        .unwrap();
    let usernames: Vec<&str> = members.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(usernames, vec!["boris", "dana"]);

    let err = system
        .api
        .add_group_member(manager, "waiters", "boris")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);
    let err = system
        .api
        .list_group_members(manager, "waiters")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn group_administration_is_manager_only() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    let crew = seed_member(&system, "dimitri", Group::DeliveryCrew).await;
    let customer = seed_user(&system, "carla").await;

    for outsider in [crew, customer] {
        let err = system
            .api
            .list_group_members(outsider, "manager")
            .await
            .unwrap_err();
        assert_eq!(err.status(), 403);
        let err = system
            .api
            .add_group_member(outsider, "manager", "carla")
            .await
            .unwrap_err();
        assert_eq!(err.status(), 403);
    }

    // Unknown target user is a 404 for the manager.
    let err = system
        .api
        .add_group_member(manager, "manager", "ghost")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn joining_the_manager_group_grants_staff_status() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    let promoted = seed_user(&system, "boris").await;

    system
        .api
        .add_group_member(manager, "manager", "boris")
        .await
        .unwrap();

    let account = system
        .api
        .get_group_member(manager, "manager", promoted)
        .await
        .unwrap();
    assert!(account.in_group(Group::Manager));
    assert!(account.is_staff);

    // The promotion is effective: the new manager can edit the menu.
    seed_item(&system, promoted, "Falafel", 7_00).await;

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn removing_a_non_member_is_a_no_op() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    let customer = seed_user(&system, "carla").await;

    // carla is not in the crew; removal still succeeds, twice.
    system
        .api
        .remove_group_member(manager, "delivery-crew", customer)
        .await
        .unwrap();
    system
        .api
        .remove_group_member(manager, "delivery-crew", customer)
        .await
        .unwrap();

    // A removal for an unknown user id is a 404.
    let err = system
        .api
        .remove_group_member(manager, "delivery-crew", 999)
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn menu_writes_are_manager_only() {
    let system = LemonSystem::new();
    let manager = seed_member(&system, "mia", Group::Manager).await;
    let crew = seed_member(&system, "dimitri", Group::DeliveryCrew).await;
    let customer = seed_user(&system, "carla").await;
    let item = seed_item(&system, manager, "Bruschetta", 5_50).await;

    // Everyone authenticated may read.
    for viewer in [manager, crew, customer] {
        assert!(!system.api.list_menu_items(viewer).await.unwrap().is_empty());
        assert!(system.api.get_menu_item(viewer, item.id).await.is_ok());
    }

    for outsider in [crew, customer] {
        let err = system
            .api
            .create_menu_item(
                outsider,
                MenuItemCreate {
                    title: "Intruder Special".into(),
                    price: Decimal::new(1_00, 2),
                    category: "mains".into(),
                    featured: false,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), 403);
        let err = system
            .api
            .delete_menu_item(outsider, item.id)
            .await
            .unwrap_err();
        assert_eq!(err.status(), 403);
    }

    // A malformed body on this endpoint answers 403, per the contract.
    let err = system
        .api
        .create_menu_item(
            manager,
            MenuItemCreate {
                title: "".into(),
                price: Decimal::new(1_00, 2),
                category: "mains".into(),
                featured: false,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), 403);

    let err = system.api.get_menu_item(customer, 999).await.unwrap_err();
    assert_eq!(err.status(), 404);

    system.shutdown().await.unwrap();
}
