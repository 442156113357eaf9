//! Payment confirmation - records a captured payment and converts the cart into order lines.
//!
//! The database work runs in one transaction: payment row, order finalization,
//! order lines with their variations, stock decrements, cart deletion. The
//! receipt email goes out after commit, so a mail failure is reported to the
//! caller but leaves the paid order in place.
//!
//! Confirmations are not idempotent. Only unpaid orders match, so replaying a
//! confirmation for an order that is already paid fails with
//! `Error::OrderNotFound` instead of echoing the first response.

use crate::{
    core::{cart, order::get_pending_order, product::decrement_stock},
    entities::{
        OrderProductVariation, account, order, order_product, order_product_variation, payment,
    },
    errors::{Error, Result},
    mail::{Mailer, receipt::order_received_email},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Payment provider confirmation relayed by the storefront's payment page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentConfirmation {
    /// Order number being paid
    #[serde(rename = "orderID")]
    pub order_number: String,
    /// Provider transaction id
    #[serde(rename = "transID")]
    pub transaction_id: String,
    /// Provider or method name
    pub payment_method: String,
    /// Provider status string
    pub status: String,
}

/// JSON answer to a confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentReceipt {
    /// Order number that was paid
    pub order_number: String,
    /// Provider transaction id, echoed back
    #[serde(rename = "transID")]
    pub transaction_id: String,
}

/// Everything written by [`record_payment`].
#[derive(Debug, Clone)]
pub struct PaidOrder {
    /// The finalized order
    pub order: order::Model,
    /// The new payment row
    pub payment: payment::Model,
    /// One line per former cart item
    pub order_products: Vec<order_product::Model>,
}

/// Records a payment for one of the user's unpaid orders and moves the cart into order lines.
///
/// # Errors
/// Returns an error if:
/// - No unpaid order with that number belongs to the user (`Error::OrderNotFound`)
/// - A cart item references a missing product (`Error::ProductNotFound`)
/// - A database operation fails
#[instrument(skip(db, confirmation), fields(order_number = %confirmation.order_number))]
pub async fn record_payment(
    db: &DatabaseConnection,
    user_id: i64,
    confirmation: &PaymentConfirmation,
) -> Result<PaidOrder> {
    let txn = db.begin().await?;

    let pending = get_pending_order(&txn, user_id, &confirmation.order_number)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order_number: confirmation.order_number.clone(),
        })?;

    let now = chrono::Utc::now();
    let payment = payment::ActiveModel {
        user_id: Set(user_id),
        payment_id: Set(confirmation.transaction_id.clone()),
        payment_method: Set(confirmation.payment_method.clone()),
        amount_paid: Set(pending.order_total),
        status: Set(confirmation.status.clone()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut finalized: order::ActiveModel = pending.into();
    finalized.payment_id = Set(Some(payment.id));
    finalized.is_ordered = Set(true);
    finalized.updated_at = Set(now);
    let order = finalized.update(&txn).await?;

    let lines = cart::get_cart_lines(&txn, user_id).await?;
    let mut order_products = Vec::with_capacity(lines.len());
    for line in &lines {
        let order_product = order_product::ActiveModel {
            order_id: Set(order.id),
            payment_id: Set(Some(payment.id)),
            user_id: Set(user_id),
            product_id: Set(line.product.id),
            quantity: Set(line.item.quantity),
            product_price: Set(line.product.price),
            ordered: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !line.variations.is_empty() {
            let links = line
                .variations
                .iter()
                .map(|variation| order_product_variation::ActiveModel {
                    order_product_id: Set(order_product.id),
                    variation_id: Set(variation.id),
                });
            OrderProductVariation::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        decrement_stock(&txn, line.product.id, line.item.quantity).await?;
        order_products.push(order_product);
    }

    cart::clear_cart(&txn, user_id).await?;
    txn.commit().await?;

    info!(
        "Payment {} recorded for order {} ({} line(s))",
        payment.payment_id,
        order.order_number,
        order_products.len()
    );
    Ok(PaidOrder {
        order,
        payment,
        order_products,
    })
}

/// Records the payment, then emails the receipt to the account.
///
/// # Errors
/// Everything [`record_payment`] returns, plus the mailer's error when the
/// receipt cannot be sent. In that case the payment has already been committed.
pub async fn confirm_payment(
    db: &DatabaseConnection,
    mailer: &dyn Mailer,
    mail_from: &str,
    account: &account::Model,
    confirmation: &PaymentConfirmation,
) -> Result<PaymentReceipt> {
    let paid = record_payment(db, account.id, confirmation).await?;

    let email = order_received_email(mail_from, account, &paid.order);
    mailer
        .send(&email)
        .await
        .inspect_err(|e| warn!("Receipt for order {} not sent: {}", paid.order.order_number, e))?;

    Ok(PaymentReceipt {
        order_number: paid.order.order_number,
        transaction_id: paid.payment.payment_id,
    })
}
