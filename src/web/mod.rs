//! HTTP layer - axum router, shared state, and request handlers.
//!
//! Routes:
//! - `POST /orders/place_order` - form-encoded checkout details, answers with the payment page data
//! - `POST /orders/payments` - JSON payment confirmation, answers with `{order_number, transID}`
//! - `GET /orders/order_complete?order_number=..&payment_id=..` - completed order view
//! - `GET /health` - liveness probe

/// Error to HTTP response mapping
pub mod error;
/// Request extractors (authenticated account)
pub mod extract;
/// Route handlers
pub mod handlers;

use crate::{config::Settings, errors::Result, mail::Mailer};
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Where an empty cart sends the customer.
pub const STORE_PATH: &str = "/store";
/// Where an incomplete checkout form sends the customer.
pub const CHECKOUT_PATH: &str = "/cart/checkout";
/// Where an unknown completion lookup sends the customer.
pub const HOME_PATH: &str = "/";

/// Shared data available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub database: DatabaseConnection,
    /// Transport for receipt emails
    pub mailer: Arc<dyn Mailer>,
    /// Loaded service settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Bundles the pieces every handler needs.
    #[must_use]
    pub fn new(database: DatabaseConnection, mailer: Arc<dyn Mailer>, settings: Settings) -> Self {
        Self {
            database,
            mailer,
            settings: Arc::new(settings),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/orders/place_order", post(handlers::checkout::place_order))
        .route("/orders/payments", post(handlers::payments::payments))
        .route(
            "/orders/order_complete",
            get(handlers::complete::order_complete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router on the configured address until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let bind_address = state.settings.server.bind_address.clone();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
