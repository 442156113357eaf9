//! Order placement - turns a submitted checkout form and the user's cart into an order.
//!
//! Placement does not touch the cart or the stock; that happens when payment is
//! confirmed. The order is saved twice inside one database transaction: the
//! first insert produces the row id, the second save stores the order number
//! built from today's date and that id.

use crate::{
    core::{
        cart::{self, CartLine},
        pricing::CartTotals,
    },
    entities::{Order, OrderStatus, order},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Contact and shipping details submitted on the checkout page.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderForm {
    /// Contact first name (required)
    pub first_name: String,
    /// Contact last name (required)
    pub last_name: String,
    /// Contact phone (required)
    pub phone: String,
    /// Contact email (required)
    pub email: String,
    /// Shipping address, first line (required)
    pub address_line_1: String,
    /// Shipping address, second line
    pub address_line_2: String,
    /// Shipping country (required)
    pub country: String,
    /// Shipping state or region (required)
    pub state: String,
    /// Shipping city (required)
    pub city: String,
    /// Note for the shop
    pub order_note: String,
}

impl OrderForm {
    /// Checks that every required field is filled in.
    ///
    /// # Errors
    /// Returns `Error::InvalidForm` naming the first blank required field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("address_line_1", &self.address_line_1),
            ("country", &self.country),
            ("state", &self.state),
            ("city", &self.city),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(field, _)) => Err(Error::InvalidForm { field }),
            None => Ok(()),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Builds the public order number: `YYYYMMDD` followed by the order's row id.
#[must_use]
pub fn order_number_for(date: NaiveDate, order_id: i64) -> String {
    format!("{}{order_id}", date.format("%Y%m%d"))
}

/// Result of a successful placement; everything the payment page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    /// The saved, numbered, still unpaid order
    pub order: order::Model,
    /// Cart lines the totals were computed from
    pub cart_items: Vec<CartLine>,
    /// Cart total, tax and grand total
    #[serde(flatten)]
    pub totals: CartTotals,
}

/// Places an order for everything in the user's cart.
///
/// # Arguments
/// * `user_id` - Account placing the order
/// * `form` - Submitted contact and shipping details
/// * `ip` - Client address, if known
/// * `tax_percent` - Tax rate applied to the cart total
///
/// # Errors
/// Returns an error if:
/// - The cart is empty (`Error::EmptyCart`)
/// - A required form field is blank (`Error::InvalidForm`)
/// - A database operation fails
#[instrument(skip(db, form))]
pub async fn place_order(
    db: &DatabaseConnection,
    user_id: i64,
    form: &OrderForm,
    ip: Option<String>,
    tax_percent: f64,
) -> Result<PlacedOrder> {
    let cart_items = cart::get_cart_lines(db, user_id).await?;
    if cart_items.is_empty() {
        return Err(Error::EmptyCart { user_id });
    }

    let totals = CartTotals::from_lines(
        cart_items
            .iter()
            .map(|line| (line.product.price, line.item.quantity)),
        tax_percent,
    );

    form.validate()?;

    let txn = db.begin().await?;

    let now = chrono::Utc::now();
    let saved = order::ActiveModel {
        user_id: Set(user_id),
        payment_id: Set(None),
        order_number: Set(String::new()),
        first_name: Set(form.first_name.trim().to_string()),
        last_name: Set(form.last_name.trim().to_string()),
        phone: Set(form.phone.trim().to_string()),
        email: Set(form.email.trim().to_string()),
        address_line_1: Set(form.address_line_1.trim().to_string()),
        address_line_2: Set(optional(&form.address_line_2)),
        country: Set(form.country.trim().to_string()),
        state: Set(form.state.trim().to_string()),
        city: Set(form.city.trim().to_string()),
        order_note: Set(optional(&form.order_note)),
        order_total: Set(totals.grand_total),
        tax: Set(totals.tax),
        status: Set(OrderStatus::New.as_str().to_string()),
        ip: Set(ip),
        is_ordered: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let order_number = order_number_for(chrono::Local::now().date_naive(), saved.id);
    let mut numbered: order::ActiveModel = saved.into();
    numbered.order_number = Set(order_number);
    let order = numbered.update(&txn).await?;

    txn.commit().await?;

    info!(
        "Placed order {} for user {} (grand total {:.2})",
        order.order_number, user_id, order.order_total
    );
    Ok(PlacedOrder {
        order,
        cart_items,
        totals,
    })
}

/// Finds an unpaid order by number, restricted to its owner.
pub async fn get_pending_order<C>(
    db: &C,
    user_id: i64,
    order_number: &str,
) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .filter(order::Column::IsOrdered.eq(false))
        .filter(order::Column::OrderNumber.eq(order_number))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::cart::add_to_cart;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_order_number_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(order_number_for(date, 17), "2024030517");
    }

    #[test]
    fn test_form_validation_names_first_blank_field() {
        let mut form = sample_order_form();
        assert!(form.validate().is_ok());

        form.address_line_2 = String::new();
        form.order_note = String::new();
        assert!(form.validate().is_ok());

        form.phone = "   ".to_string();
        form.city = String::new();
        assert!(matches!(
            form.validate(),
            Err(Error::InvalidForm { field: "phone" })
        ));
    }

    #[tokio::test]
    async fn test_place_order_computes_totals() -> Result<()> {
        let (db, account, product) = setup_with_cart(25.0, 4).await?;

        let placed = place_order(
            &db,
            account.id,
            &sample_order_form(),
            Some("127.0.0.1".to_string()),
            2.0,
        )
        .await?;

        assert_eq!(placed.totals.total, 100.0);
        assert_eq!(placed.totals.tax, 2.0);
        assert_eq!(placed.totals.grand_total, 102.0);
        assert_eq!(placed.order.order_total, 102.0);
        assert_eq!(placed.order.tax, 2.0);
        assert_eq!(placed.cart_items.len(), 1);
        assert_eq!(placed.cart_items[0].product.id, product.id);
        assert!(!placed.order.is_ordered);
        assert_eq!(placed.order.status, "New");
        assert_eq!(placed.order.ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(placed.order.address_line_2.as_deref(), Some("Suite 3"));
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_assigns_order_number() -> Result<()> {
        let (db, account, _) = setup_with_cart(10.0, 1).await?;

        let placed = place_order(&db, account.id, &sample_order_form(), None, 2.0).await?;

        let expected = order_number_for(chrono::Local::now().date_naive(), placed.order.id);
        assert_eq!(placed.order.order_number, expected);

        let stored = get_pending_order(&db, account.id, &expected).await?.unwrap();
        assert_eq!(stored.id, placed.order.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_leaves_cart_alone() -> Result<()> {
        let (db, account, _) = setup_with_cart(10.0, 1).await?;

        place_order(&db, account.id, &sample_order_form(), None, 2.0).await?;

        assert_eq!(cart::count_cart_items(&db, account.id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_creates_no_order() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_account(&db, "empty@example.com").await?;

        let result = place_order(&db, account.id, &sample_order_form(), None, 2.0).await;

        assert!(matches!(result, Err(Error::EmptyCart { .. })));
        assert_eq!(Order::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_form_creates_no_order() -> Result<()> {
        let (db, account, _) = setup_with_cart(10.0, 1).await?;
        let form = OrderForm {
            email: String::new(),
            ..sample_order_form()
        };

        let result = place_order(&db, account.id, &form, None, 2.0).await;

        assert!(matches!(result, Err(Error::InvalidForm { field: "email" })));
        assert_eq!(Order::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_pending_order_is_owner_scoped() -> Result<()> {
        let (db, account, product) = setup_with_cart(10.0, 1).await?;
        let other = create_test_account(&db, "other@example.com").await?;
        add_to_cart(&db, other.id, product.id, 1, &[]).await?;

        let placed = place_order(&db, account.id, &sample_order_form(), None, 2.0).await?;

        let found = get_pending_order(&db, other.id, &placed.order.order_number).await?;
        assert!(found.is_none());
        Ok(())
    }
}
