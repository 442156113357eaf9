use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

impl Error {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::OrderNotFound { .. }
            | Self::PaymentNotFound { .. }
            | Self::ProductNotFound { .. } => StatusCode::NOT_FOUND,
            Self::EmptyCart { .. }
            | Self::InvalidForm { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidQuantity { .. }
            | Self::InvalidVariation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::Mail { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            debug!("Request rejected: {}", self);
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::OrderNotFound {
                order_number: "1".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidVariation {
                product_id: 1,
                variation_id: 2
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Mail {
                message: "down".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let response = Error::Config {
            message: "secret path".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
