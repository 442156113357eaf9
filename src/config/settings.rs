//! Service settings loaded from a TOML file.
//!
//! Every section and key is optional; anything left out falls back to the
//! defaults below. The file path comes from `STOREFRONT_CONFIG` and defaults to
//! `./storefront.toml`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration structure representing the entire settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Pricing settings applied at checkout
    pub checkout: CheckoutSettings,
    /// Outbound mail settings
    pub mail: MailSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address the server binds to
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Pricing settings applied at checkout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Tax charged on the cart total, in percent
    pub tax_percent: f64,
}

impl Settings {
    /// Rejects values that parse but cannot be used.
    ///
    /// # Errors
    /// Returns `Error::Config` if the tax rate is negative, NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        let tax_percent = self.checkout.tax_percent;
        if !tax_percent.is_finite() || tax_percent < 0.0 {
            return Err(Error::Config {
                message: format!("checkout.tax_percent must be a non-negative number, got {tax_percent}"),
            });
        }
        Ok(())
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self { tax_percent: 2.0 }
    }
}

/// Which mail transport delivers order receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailBackend {
    /// Log every message
    Console,
    /// Write every message as an `.eml` file into the outbox directory
    File,
    /// Keep messages in memory
    Memory,
}

/// Outbound mail settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Transport used for receipts
    pub backend: MailBackend,
    /// Sender address on every message
    pub from: String,
    /// Directory used by the file backend
    pub outbox_dir: PathBuf,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            backend: MailBackend::Console,
            from: "orders@storefront.local".to_string(),
            outbox_dir: PathBuf::from("outbox"),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value has the wrong type
/// - `checkout.tax_percent` is negative or not finite
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    debug!("Loading settings from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path.display()),
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from `STOREFRONT_CONFIG` (default `storefront.toml`).
///
/// A missing file is not an error: the defaults are used instead.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| "storefront.toml".into());
    if Path::new(&path).exists() {
        load_settings(&path)
    } else {
        info!("No settings file at {}, using defaults", path);
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [server]
            bind_address = "0.0.0.0:9000"

            [checkout]
            tax_percent = 7.5

            [mail]
            backend = "file"
            from = "shop@example.com"
            outbox_dir = "/tmp/outbox"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.checkout.tax_percent, 7.5);
        assert_eq!(settings.mail.backend, MailBackend::File);
        assert_eq!(settings.mail.from, "shop@example.com");
        assert_eq!(settings.mail.outbox_dir, PathBuf::from("/tmp/outbox"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings: Settings = toml::from_str("[checkout]\n").unwrap();
        assert_eq!(settings.checkout.tax_percent, 2.0);
        assert_eq!(settings.server.bind_address, "127.0.0.1:8000");
        assert_eq!(settings.mail.backend, MailBackend::Console);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result: std::result::Result<Settings, _> =
            toml::from_str("[mail]\nbackend = \"pigeon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_tax_rates_are_rejected() {
        for value in ["-1.0", "nan", "inf"] {
            let settings: Settings =
                toml::from_str(&format!("[checkout]\ntax_percent = {value}\n")).unwrap();
            assert!(
                matches!(settings.validate(), Err(Error::Config { .. })),
                "tax_percent = {value} should be rejected"
            );
        }

        let settings: Settings = toml::from_str("[checkout]\ntax_percent = 0.0\n").unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_rejects_negative_tax() {
        let path = std::env::temp_dir().join(format!(
            "storefront-settings-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[checkout]\ntax_percent = -2.0\n").unwrap();

        let result = load_settings(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_settings_missing_file() {
        let result = load_settings("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
