use thiserror::Error;

/// Every failure the order service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or input that has no more specific variant
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Failure reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request carries no valid account id
    #[error("Authentication required")]
    Unauthenticated,

    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty for user {user_id}")]
    EmptyCart { user_id: i64 },

    /// A required checkout field is blank
    #[error("Invalid order form: {field} is required")]
    InvalidForm { field: &'static str },

    /// No matching order, or the order is in the wrong state for the request
    #[error("Order not found: {order_number}")]
    OrderNotFound { order_number: String },

    /// No payment with this provider transaction id
    #[error("Payment not found: {payment_id}")]
    PaymentNotFound { payment_id: String },

    /// Negative or non-finite price
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// Non-positive quantity
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i32 },

    /// Variation that does not exist or belongs to another product
    #[error("Invalid variation {variation_id} for product {product_id}")]
    InvalidVariation { product_id: i64, variation_id: i64 },

    /// No product with this id
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: i64 },

    /// The mail transport rejected a message
    #[error("Mail delivery failed: {message}")]
    Mail { message: String },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
