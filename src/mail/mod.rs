//! Outbound mail - the message type, the transport trait, and its backends.

/// Console, file and in-memory transports
pub mod backends;
/// Order receipt rendering
pub mod receipt;

pub use backends::{ConsoleMailer, FileMailer, MemoryMailer, mailer_from_settings};

use crate::errors::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A plain-text email message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    /// Sender address
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl Email {
    /// Renders the message as RFC 5322 text with CRLF line endings.
    ///
    /// Line breaks inside header values are replaced with spaces so a value
    /// can never start a new header.
    #[must_use]
    pub fn to_rfc5322(&self) -> String {
        let date = chrono::Utc::now().to_rfc2822();
        let mut message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {date}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n",
            header_value(&self.from),
            header_value(&self.to.join(", ")),
            header_value(&self.subject),
        );
        for line in self.body.lines() {
            message.push_str(line);
            message.push_str("\r\n");
        }
        message
    }
}

fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Delivers emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    /// Returns `Error::Mail` or `Error::Io` when the transport cannot deliver it.
    async fn send(&self, email: &Email) -> Result<()>;
}
