//! Shared test utilities for the order service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{account, cart, order::OrderForm, product},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Stock given to products created by [`setup_with_cart`].
pub const DEFAULT_TEST_STOCK: i32 = 10;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test account named "Test Customer" with the given email.
pub async fn create_test_account(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::account::Model> {
    account::create_account(db, email, "Test", "Customer").await
}

/// Creates a test product with a custom price and stock.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i32,
) -> Result<entities::product::Model> {
    product::create_product(db, name, price, stock).await
}

/// A checkout form with every field filled in.
#[must_use]
pub fn sample_order_form() -> OrderForm {
    OrderForm {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        phone: "555-0100".to_string(),
        email: "grace@example.com".to_string(),
        address_line_1: "1 Harbor Way".to_string(),
        address_line_2: "Suite 3".to_string(),
        country: "USA".to_string(),
        state: "VA".to_string(),
        city: "Arlington".to_string(),
        order_note: "Leave at the door".to_string(),
    }
}

/// Sets up a database with one account whose cart holds `quantity` units of
/// a single product priced at `price`.
/// Returns (db, account, product) for checkout tests.
pub async fn setup_with_cart(
    price: f64,
    quantity: i32,
) -> Result<(
    DatabaseConnection,
    entities::account::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let account = create_test_account(&db, "customer@example.com").await?;
    let product = create_test_product(&db, "Test Product", price, DEFAULT_TEST_STOCK).await?;
    cart::add_to_cart(&db, account.id, product.id, quantity, &[]).await?;
    Ok((db, account, product))
}
