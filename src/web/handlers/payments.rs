use crate::{
    core::payment::{self, PaymentConfirmation, PaymentReceipt},
    errors::Result,
    web::{AppState, extract::CurrentUser},
};
use axum::{Json, extract::State};

/// `POST /orders/payments`
pub async fn payments(
    State(state): State<AppState>,
    CurrentUser(account): CurrentUser,
    Json(confirmation): Json<PaymentConfirmation>,
) -> Result<Json<PaymentReceipt>> {
    let receipt = payment::confirm_payment(
        &state.database,
        state.mailer.as_ref(),
        &state.settings.mail.from,
        &account,
        &confirmation,
    )
    .await?;
    Ok(Json(receipt))
}
