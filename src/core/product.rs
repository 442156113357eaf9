//! Product business logic - Catalog writes and the stock bookkeeping done at checkout.
//!
//! The catalog itself is managed elsewhere; this module only carries what the
//! order flow needs: creating products and variations, looking products up,
//! and decrementing stock when an order is paid.

use crate::{
    entities::{Product, product, variation},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::Expr};
use tracing::{debug, instrument};

/// Creates a new product, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_product<C>(
    db: &C,
    name: &str,
    price: f64,
    stock: i32,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    let now = chrono::Utc::now().naive_utc();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        stock: Set(stock),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Adds a selectable variation (e.g. `color = "red"`) to a product.
///
/// # Errors
/// Returns an error if:
/// - The category or value is empty or whitespace-only
/// - The product does not exist
/// - The database insert operation fails
pub async fn create_variation<C>(
    db: &C,
    product_id: i64,
    category: &str,
    value: &str,
) -> Result<variation::Model>
where
    C: ConnectionTrait,
{
    if category.trim().is_empty() || value.trim().is_empty() {
        return Err(Error::Config {
            message: "Variation category and value cannot be empty".to_string(),
        });
    }

    get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { product_id })?;

    variation::ActiveModel {
        product_id: Set(product_id),
        category: Set(category.trim().to_string()),
        value: Set(value.trim().to_string()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes `quantity` units from a product's stock.
///
/// The decrement is a single `stock = stock - quantity` statement, so two
/// checkouts of the same product cannot overwrite each other. There is no
/// lower bound: overselling leaves the stock negative.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the product does not exist.
#[instrument(skip(db))]
pub async fn decrement_stock<C>(db: &C, product_id: i64, quantity: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let result = Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).sub(quantity),
        )
        .col_expr(
            product::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { product_id });
    }

    let product = get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { product_id })?;
    debug!("Product {} stock now {}", product.id, product.stock);
    Ok(product)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::Variation;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_product(&db, "   ", 10.0, 1).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_product(&db, "Jacket", -10.0, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -10.0 }
        ));

        let result = create_product(&db, "Jacket", f64::NAN, 1).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(&db, " Denim Jacket ", 59.99, 12).await?;
        assert_eq!(product.name, "Denim Jacket");
        assert_eq!(product.price, 59.99);
        assert_eq!(product.stock, 12);

        let fetched = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(fetched, product);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_variation_requires_product() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_variation(&db, 99, "color", "red").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { product_id: 99 }
        ));

        let product = create_test_product(&db, "Shirt", 20.0, 5).await?;
        let variation = create_variation(&db, product.id, "size", "XL").await?;
        assert_eq!(variation.product_id, product.id);
        assert_eq!(variation.value, "XL");
        assert!(variation.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_variation_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Shirt", 20.0, 5).await?;

        let result = create_variation(&db, product.id, "  ", "red").await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        let result = create_variation(&db, product.id, "color", "").await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        assert_eq!(Variation::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Shirt", 20.0, 5).await?;

        let updated = decrement_stock(&db, product.id, 3).await?;
        assert_eq!(updated.stock, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_stock_can_go_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Shirt", 20.0, 1).await?;

        let updated = decrement_stock(&db, product.id, 4).await?;
        assert_eq!(updated.stock, -3);
        Ok(())
    }

    #[tokio::test]
    async fn test_decrement_stock_unknown_product() -> Result<()> {
        let db = setup_test_db().await?;
        let result = decrement_stock(&db, 7, 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { product_id: 7 }
        ));
        Ok(())
    }
}
