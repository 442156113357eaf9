//! Request extractors.

use super::AppState;
use crate::{core::account, entities, errors::Error};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the authenticated account id, set by the upstream auth proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The account making the request.
///
/// Rejects with `Error::Unauthenticated` when the header is missing, is not an
/// integer, or names an account that does not exist.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub entities::account::Model);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or(Error::Unauthenticated)?;

        account::get_account_by_id(&state.database, user_id)
            .await?
            .map(Self)
            .ok_or(Error::Unauthenticated)
    }
}
