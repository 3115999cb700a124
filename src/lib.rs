//! # Little Lemon Ordering Service
//!
//! A role-based ordering backend for the Little Lemon restaurant: menu
//! catalog management, per-user shopping carts, and an order placement and
//! fulfillment workflow, gated by three roles (Manager, Delivery Crew,
//! Customer).
//!
//! The crate is built as an actor system on Tokio. Each store runs in its
//! own task and processes its mailbox sequentially, which gives every
//! request exclusive access to the store's state with no locks. That
//! sequential loop doubles as the transaction boundary: checkout converts a
//! cart into an order (snapshot the lines, compute the total, drain the
//! cart) inside a single message, so it either happens completely or not at
//! all.
//!
//! ## Module Tour
//!
//! ### The Engine ([`framework`])
//! A generic `ResourceActor<T>` over any [`framework::Entity`]: CRUD plus
//! lookup-by-key and filtered listing, written once and reused by the
//! catalog and identity stores. [`framework::mock`] provides an
//! expectation-based `MockClient` for testing against canned actor
//! responses.
//!
//! ### The Stores ([`catalog_actor`], [`identity_actor`], [`commerce_actor`])
//! - **Catalog**: menu items, unique by title.
//! - **Identity**: accounts, group membership (`Manager`, `delivery crew`)
//!   and staff status.
//! - **Commerce**: purpose-built actor owning carts and orders together, so
//!   the cart-to-order conversion is atomic by construction.
//!
//! ### The Gate ([`access`])
//! Each request resolves its principal to exactly one [`access::Role`] and
//! authorization is a table lookup over that role, not scattered membership
//! checks. Group-name normalization and order-visibility scoping live here
//! too.
//!
//! ### The Surface ([`api`])
//! [`api::LittleLemonApi`] exposes one method per endpoint: authenticate,
//! resolve role, check policy, validate, dispatch. Errors are the closed
//! [`error::ApiError`] taxonomy with an HTTP status per variant.
//!
//! ### The Orchestrator ([`lifecycle`])
//! [`lifecycle::LemonSystem`] spawns the actors, wires the clients and the
//! facade, and shuts everything down by dropping channels.
//!
//! ## Running Tests
//!
//! ```bash
//! RUST_LOG=info cargo test
//! ```

pub mod access;
pub mod api;
pub mod catalog_actor;
pub mod clients;
pub mod commerce_actor;
pub mod domain;
pub mod error;
pub mod framework;
pub mod identity_actor;
pub mod lifecycle;
