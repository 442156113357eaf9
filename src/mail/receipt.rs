//! The "order received" email sent once payment is confirmed.

use super::Email;
use crate::entities::{account, order};

/// Subject line of the receipt.
pub const ORDER_RECEIVED_SUBJECT: &str = "Thank you for your order!";

/// Renders the receipt for a paid order, addressed to the account's email.
#[must_use]
pub fn order_received_email(from: &str, account: &account::Model, order: &order::Model) -> Email {
    let mut address = format!("  {}\n", order.address_line_1);
    if let Some(line_2) = &order.address_line_2 {
        address.push_str(&format!("  {line_2}\n"));
    }

    let body = format!(
        "Hi {first_name},\n\
         \n\
         Thank you for your order. We have received it.\n\
         \n\
         Order number: {number}\n\
         Tax: {tax:.2}\n\
         Order total: {total:.2}\n\
         \n\
         Shipping to:\n  \
         {ship_first} {ship_last}\n\
         {address}  \
         {city}, {state}, {country}\n",
        first_name = account.first_name,
        number = order.order_number,
        tax = order.tax,
        total = order.order_total,
        ship_first = order.first_name,
        ship_last = order.last_name,
        city = order.city,
        state = order.state,
        country = order.country,
    );

    Email {
        from: from.to_string(),
        to: vec![account.email.clone()],
        subject: ORDER_RECEIVED_SUBJECT.to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::place_order;
    use crate::errors::Result;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_receipt_body() -> Result<()> {
        let (db, account, _) = setup_with_cart(25.0, 4).await?;
        let mut placed = place_order(&db, account.id, &sample_order_form(), None, 2.0).await?;

        let email = order_received_email("shop@example.com", &account, &placed.order);
        assert_eq!(email.to, vec![account.email.clone()]);
        assert_eq!(email.subject, ORDER_RECEIVED_SUBJECT);
        assert!(email.body.starts_with("Hi Test,\n\n"));
        assert!(email.body.contains(&format!(
            "Order number: {}\n",
            placed.order.order_number
        )));
        assert!(email.body.contains("Tax: 2.00\nOrder total: 102.00\n"));
        assert!(email.body.ends_with(
            "Shipping to:\n  Grace Hopper\n  1 Harbor Way\n  Suite 3\n  Arlington, VA, USA\n"
        ));

        placed.order.address_line_2 = None;
        let email = order_received_email("shop@example.com", &account, &placed.order);
        assert!(email.body.ends_with("  1 Harbor Way\n  Arlington, VA, USA\n"));
        Ok(())
    }
}
