use crate::{
    core::completion,
    errors::{Error, Result},
    web::{AppState, HOME_PATH},
};
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::debug;

/// Query string of the completion page. Missing values are treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompletionQuery {
    /// Order number to show
    pub order_number: String,
    /// Provider transaction id of the payment
    pub payment_id: String,
}

/// `GET /orders/order_complete`
///
/// Unknown or unpaid orders and unknown payments all redirect home.
pub async fn order_complete(
    State(state): State<AppState>,
    Query(query): Query<CompletionQuery>,
) -> Result<Response> {
    match completion::get_completed_order(&state.database, &query.order_number, &query.payment_id)
        .await
    {
        Ok(view) => Ok(Json(view).into_response()),
        Err(e @ (Error::OrderNotFound { .. } | Error::PaymentNotFound { .. })) => {
            debug!("Completion lookup failed: {}", e);
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(e) => Err(e),
    }
}
