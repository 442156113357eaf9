//! Route handlers organized by checkout step.

/// Checkout form submission
pub mod checkout;
/// Order completion page
pub mod complete;
/// Payment confirmation
pub mod payments;

use axum::Json;
use serde_json::{Value, json};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
