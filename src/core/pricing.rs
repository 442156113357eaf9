//! Cart and order arithmetic.
//!
//! Amounts are dollars held in `f64`. Tax is rounded to whole cents; the
//! cart total itself is left as the plain sum of `price * quantity`.

use serde::Serialize;

/// Totals shown on the payment page and stored on the order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines
    pub total: f64,
    /// Number of units across all lines
    pub quantity: i64,
    /// Tax charged on `total`
    pub tax: f64,
    /// `total + tax`
    pub grand_total: f64,
}

impl CartTotals {
    /// Computes totals from `(unit_price, quantity)` pairs.
    #[must_use]
    pub fn from_lines<I>(lines: I, tax_percent: f64) -> Self
    where
        I: IntoIterator<Item = (f64, i32)>,
    {
        let (total, quantity) = lines
            .into_iter()
            .fold((0.0, 0_i64), |(total, quantity), (price, qty)| {
                (total + line_total(price, qty), quantity + i64::from(qty))
            });
        let tax = tax_on(total, tax_percent);

        Self {
            total,
            quantity,
            tax,
            grand_total: total + tax,
        }
    }
}

/// `price * quantity` for one line.
#[must_use]
pub fn line_total(price: f64, quantity: i32) -> f64 {
    price * f64::from(quantity)
}

/// Tax owed on `amount` at `percent`, rounded to cents.
#[must_use]
pub fn tax_on(amount: f64, percent: f64) -> f64 {
    round_cents(percent * amount / 100.0)
}

/// Rounds half away from zero to two decimal places.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_hundred_dollar_cart() {
        let totals = CartTotals::from_lines([(25.0, 2), (50.0, 1)], 2.0);
        assert_eq!(totals.total, 100.0);
        assert_eq!(totals.quantity, 3);
        assert_eq!(totals.tax, 2.0);
        assert_eq!(totals.grand_total, 102.0);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = CartTotals::from_lines(std::iter::empty(), 2.0);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.quantity, 0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        // 2% of 10.99 is 0.2198
        assert_eq!(tax_on(10.99, 2.0), 0.22);
        assert_eq!(tax_on(0.24, 2.0), 0.0);
        assert_eq!(tax_on(0.25, 2.0), 0.01);
    }

    #[test]
    fn test_custom_tax_rate() {
        let totals = CartTotals::from_lines([(200.0, 1)], 7.5);
        assert_eq!(totals.tax, 15.0);
        assert_eq!(totals.grand_total, 215.0);
    }
}
