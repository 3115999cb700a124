use std::collections::BTreeSet;

use little_lemon::api::LittleLemonApi;
use little_lemon::clients::{CatalogClient, IdentityClient};
use little_lemon::domain::{
    Group, MenuItem, MenuItemCreate, OrderPatch, OrderStatus, UserAccount, UserCreate,
};
use little_lemon::framework::mock::MockClient;
use little_lemon::lifecycle::LemonSystem;
use rust_decimal::Decimal;

/// Full end-to-end flow with all real actors: the restaurant opens, a
/// customer orders, the crew delivers, the manager cleans up.
#[tokio::test]
async fn full_ordering_flow() {
    let system = LemonSystem::new();

    // Provision accounts; registration itself is the identity provider's
    // job, so accounts are seeded through the identity client.
    let manager = system
        .identity_client
        .create_account(UserCreate {
            username: "mia".into(),
            email: "mia@littlelemon.com".into(),
        })
        .await
        .expect("Failed to create manager")
        .id;
    system
        .identity_client
        .join_group(manager, Group::Manager)
        .await
        .expect("Failed to promote manager");

    let customer = system
        .identity_client
        .create_account(UserCreate {
            username: "carla".into(),
            email: "carla@littlelemon.com".into(),
        })
        .await
        .expect("Failed to create customer")
        .id;

    // The manager builds the menu and staffs the crew.
    for (title, cents) in [("Bruschetta", 5_50), ("Grilled Fish", 12_00)] {
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
            .expect("Failed to create menu item");
    }
    let crew = system
        .identity_client
        .create_account(UserCreate {
            username: "dimitri".into(),
            email: "dimitri@littlelemon.com".into(),
        })
        .await
        .expect("Failed to create crew account")
        .id;
    system
        .api
        .add_group_member(manager, "delivery-crew", "dimitri")
        .await
        .expect("Failed to staff the crew");

    // The customer browses, fills the cart and checks out.
    let menu = system.api.list_menu_items(customer).await.unwrap();
    assert_eq!(menu.len(), 2);
    system
        .api
        .add_to_cart(customer, "Bruschetta", 2)
        .await
        .unwrap();
    system
        .api
        .add_to_cart(customer, "Grilled Fish", 1)
        .await
        .unwrap();
    let order = system.api.place_order(customer).await.unwrap();
    assert_eq!(order.total, Decimal::new(23_00, 2));

    // The manager sees the order and assigns the crew member.
    let all_orders = system.api.list_orders(manager).await.unwrap();
    assert_eq!(all_orders.len(), 1);
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

    // The crew member sees the assignment and delivers.
    let assigned = system.api.list_orders(crew).await.unwrap();
    assert_eq!(assigned.len(), 1);
    let delivered = system
        .api
        .update_order(
            crew,
            order.id,
            OrderPatch {
                status: Some(OrderStatus::Delivered),
                delivery_crew: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // The customer sees the delivered order; the manager archives it.
    let mine = system.api.get_order(customer, order.id).await.unwrap();
    assert_eq!(mine.status, OrderStatus::Delivered);
    system.api.delete_order(manager, order.id).await.unwrap();

    system.shutdown().await.unwrap();
}

/// Real commerce actor with mocked catalog and identity dependencies: the
/// checkout path is exercised in isolation against canned lookups.
#[tokio::test]
async fn checkout_with_mocked_dependencies() {
    let customer = UserAccount {
        id: 1,
        username: "carla".into(),
        email: "carla@littlelemon.com".into(),
        groups: BTreeSet::new(),
        is_staff: false,
    };
    let fish = MenuItem {
        id: 7,
        title: "Grilled Fish".into(),
        price: Decimal::new(12_00, 2),
        category: "mains".into(),
        featured: false,
    };

    let mut identity_mock = MockClient::<UserAccount>::new();
    let mut catalog_mock = MockClient::<MenuItem>::new();

    // add_to_cart authenticates and resolves the item; place_order
    // authenticates again.
    identity_mock.expect_get(1).return_ok(Some(customer.clone()));
    catalog_mock
        .expect_find("Grilled Fish".to_string())
        .return_ok(Some(fish.clone()));
    identity_mock.expect_get(1).return_ok(Some(customer.clone()));

    let (commerce_actor, commerce_client) = little_lemon::commerce_actor::new();
    let actor_handle = tokio::spawn(commerce_actor.run());

    let api = LittleLemonApi::new(
        CatalogClient::new(catalog_mock.client()),
        IdentityClient::new(identity_mock.client()),
        commerce_client.clone(),
    );

    let line = api.add_to_cart(1, "Grilled Fish", 3).await.unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(line.unit_price, Decimal::new(12_00, 2));

    let order = api.place_order(1).await.unwrap();
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total, Decimal::new(36_00, 2));

    identity_mock.verify();
    catalog_mock.verify();

    drop(api);
    drop(commerce_client);
    actor_handle.await.unwrap();
}
