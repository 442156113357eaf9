#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use storefront_orders::{
    config::{self, database},
    errors::Result,
    mail, web,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG and DATABASE_URL can come from it
    let dotenv_result = dotenv();

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    if dotenv_result.is_err() {
        info!("No .env file loaded; using the process environment.");
    }

    // 3. Load service settings
    let settings = config::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve
    let mailer = mail::mailer_from_settings(&settings.mail);
    web::serve(web::AppState::new(db, mailer, settings)).await
}
