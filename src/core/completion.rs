//! Order completion view.
//!
//! Builds the data shown on the "order complete" page: the paid order, its
//! lines with product names and variations, the payment, and a subtotal
//! recomputed from the stored line prices.

use crate::{
    core::pricing,
    entities::{
        Order, OrderProduct, Payment, Product, Variation, order, order_product, payment, variation,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// One purchased line as displayed on the completion page.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedLine {
    /// The stored order line
    #[serde(flatten)]
    pub line: order_product::Model,
    /// Product name at display time
    pub product_name: String,
    /// Variations chosen for this line
    pub variations: Vec<variation::Model>,
    /// `product_price * quantity`
    pub sub_total: f64,
}

/// Everything the completion page displays.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedOrder {
    /// The paid order
    pub order: order::Model,
    /// Its lines, in insertion order
    pub order_products: Vec<CompletedLine>,
    /// The payment looked up by provider transaction id
    pub payment: payment::Model,
    /// Sum of the line subtotals
    pub subtotal: f64,
}

/// Looks up a paid order and its payment for display.
///
/// The order is matched by number among paid orders only; the payment is
/// matched by provider transaction id. An unpaid order is reported the same
/// way as a missing one.
///
/// # Errors
/// Returns `Error::OrderNotFound` or `Error::PaymentNotFound` when either
/// lookup comes back empty, or a database error.
pub async fn get_completed_order<C>(
    db: &C,
    order_number: &str,
    payment_id: &str,
) -> Result<CompletedOrder>
where
    C: ConnectionTrait,
{
    let order = Order::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .filter(order::Column::IsOrdered.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order_number: order_number.to_string(),
        })?;

    let lines = OrderProduct::find()
        .filter(order_product::Column::OrderId.eq(order.id))
        .order_by_asc(order_product::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?;

    let payment = Payment::find()
        .filter(payment::Column::PaymentId.eq(payment_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::PaymentNotFound {
            payment_id: payment_id.to_string(),
        })?;

    let mut order_products = Vec::with_capacity(lines.len());
    for (line, product) in lines {
        let variations = line
            .find_related(Variation)
            .order_by_asc(variation::Column::Id)
            .all(db)
            .await?;
        order_products.push(CompletedLine {
            sub_total: pricing::line_total(line.product_price, line.quantity),
            product_name: product.map(|p| p.name).unwrap_or_default(),
            variations,
            line,
        });
    }
    let subtotal: f64 = order_products.iter().map(|line| line.sub_total).sum();

    Ok(CompletedOrder {
        order,
        order_products,
        payment,
        subtotal,
    })
}
