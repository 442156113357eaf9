use crate::{
    core::order::{self, OrderForm},
    errors::{Error, Result},
    web::{AppState, CHECKOUT_PATH, STORE_PATH, extract::CurrentUser},
};
use axum::{
    Form, Json,
    extract::{ConnectInfo, State},
    response::{IntoResponse, Redirect, Response},
};
use std::net::SocketAddr;
use tracing::debug;

/// `POST /orders/place_order`
///
/// Places the order and answers with the payment page data. An empty cart
/// redirects to the store, an incomplete form back to checkout.
pub async fn place_order(
    State(state): State<AppState>,
    CurrentUser(account): CurrentUser,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let ip = connect_info.map(|ConnectInfo(addr)| addr.ip().to_string());

    match order::place_order(
        &state.database,
        account.id,
        &form,
        ip,
        state.settings.checkout.tax_percent,
    )
    .await
    {
        Ok(placed) => Ok(Json(placed).into_response()),
        Err(Error::EmptyCart { .. }) => {
            debug!("User {} checked out an empty cart", account.id);
            Ok(Redirect::to(STORE_PATH).into_response())
        }
        Err(Error::InvalidForm { field }) => {
            debug!("User {} submitted checkout without {}", account.id, field);
            Ok(Redirect::to(CHECKOUT_PATH).into_response())
        }
        Err(e) => Err(e),
    }
}
