/// Database configuration and connection management
pub mod database;

/// Service settings loaded from the TOML settings file
pub mod settings;

pub use settings::{MailBackend, Settings, load_default_settings, load_settings};
