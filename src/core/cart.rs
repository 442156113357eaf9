//! Cart access used by checkout.
//!
//! Carts belong to a separate subsystem; checkout reads a user's items with
//! their products and variations, and empties the cart once an order is paid.

use crate::{
    core::pricing,
    entities::{
        CartItem, CartItemVariation, Product, Variation, cart_item, cart_item_variation, product,
        variation,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One cart item together with what it points at.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// The stored cart item
    pub item: cart_item::Model,
    /// The product being bought
    pub product: product::Model,
    /// Variations selected for this item
    pub variations: Vec<variation::Model>,
}

impl CartLine {
    /// Line value at the product's current price.
    #[must_use]
    pub fn sub_total(&self) -> f64 {
        pricing::line_total(self.product.price, self.item.quantity)
    }
}

/// Puts `quantity` units of a product, with the given variations, into a user's cart.
///
/// Repeated variation ids are stored once. The item and its variation links
/// are written in one transaction, so a rejected add leaves the cart unchanged.
///
/// # Errors
/// Returns an error if:
/// - `quantity` is not positive
/// - The product does not exist
/// - A variation does not exist or belongs to another product
/// - The database insert fails
#[instrument(skip(db))]
pub async fn add_to_cart<C>(
    db: &C,
    user_id: i64,
    product_id: i64,
    quantity: i32,
    variation_ids: &[i64],
) -> Result<cart_item::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let mut variation_ids = variation_ids.to_vec();
    variation_ids.sort_unstable();
    variation_ids.dedup();

    let txn = db.begin().await?;

    Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { product_id })?;

    if !variation_ids.is_empty() {
        let found = Variation::find()
            .filter(variation::Column::Id.is_in(variation_ids.clone()))
            .filter(variation::Column::ProductId.eq(product_id))
            .all(&txn)
            .await?;
        if let Some(&variation_id) = variation_ids
            .iter()
            .find(|&&id| !found.iter().any(|v| v.id == id))
        {
            return Err(Error::InvalidVariation {
                product_id,
                variation_id,
            });
        }
    }

    let item = cart_item::ActiveModel {
        user_id: Set(user_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if !variation_ids.is_empty() {
        let links = variation_ids
            .iter()
            .map(|&variation_id| cart_item_variation::ActiveModel {
                cart_item_id: Set(item.id),
                variation_id: Set(variation_id),
            });
        CartItemVariation::insert_many(links)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    debug!(
        "User {} added {} x product {} to cart",
        user_id, quantity, product_id
    );
    Ok(item)
}

/// Loads a user's cart, oldest item first.
///
/// # Errors
/// Returns `Error::ProductNotFound` if an item references a missing product.
pub async fn get_cart_lines<C>(db: &C, user_id: i64) -> Result<Vec<CartLine>>
where
    C: ConnectionTrait,
{
    let rows = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .order_by_asc(cart_item::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (item, product) in rows {
        let product = product.ok_or(Error::ProductNotFound {
            product_id: item.product_id,
        })?;
        let variations = item
            .find_related(Variation)
            .order_by_asc(variation::Column::Id)
            .all(db)
            .await?;
        lines.push(CartLine {
            item,
            product,
            variations,
        });
    }
    Ok(lines)
}

/// Number of items (not units) in a user's cart.
pub async fn count_cart_items<C>(db: &C, user_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Deletes every item in a user's cart along with its variation links.
///
/// Returns the number of cart items removed.
#[instrument(skip(db))]
pub async fn clear_cart<C>(db: &C, user_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let item_ids: Vec<i64> = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();

    if item_ids.is_empty() {
        return Ok(0);
    }

    CartItemVariation::delete_many()
        .filter(cart_item_variation::Column::CartItemId.is_in(item_ids.clone()))
        .exec(db)
        .await?;
    let deleted = CartItem::delete_many()
        .filter(cart_item::Column::Id.is_in(item_ids))
        .exec(db)
        .await?;

    info!(
        "Cleared {} cart item(s) for user {}",
        deleted.rows_affected, user_id
    );
    Ok(deleted.rows_affected)
}
