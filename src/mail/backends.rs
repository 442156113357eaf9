use super::{Email, Mailer};
use crate::config::{MailBackend, settings::MailSettings};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Builds the transport selected in the settings.
#[must_use]
pub fn mailer_from_settings(settings: &MailSettings) -> Arc<dyn Mailer> {
    match settings.backend {
        MailBackend::Console => Arc::new(ConsoleMailer),
        MailBackend::File => Arc::new(FileMailer::new(settings.outbox_dir.clone())),
        MailBackend::Memory => Arc::new(MemoryMailer::new()),
    }
}

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        info!(
            to = %email.to.join(", "),
            subject = %email.subject,
            "Sending email\n{}",
            email.body
        );
        Ok(())
    }
}

/// Drops every message as an `.eml` file into an outbox directory.
#[derive(Debug)]
pub struct FileMailer {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl FileMailer {
    /// Creates a mailer writing into `dir`; the directory is created on first send.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            sequence: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let name = format!(
            "{}-{}-{sequence:04}.eml",
            chrono::Utc::now().format("%Y%m%d-%H%M%S"),
            std::process::id()
        );
        let path = self.dir.join(name);
        tokio::fs::write(&path, email.to_rfc5322()).await?;
        info!("Wrote email '{}' to {}", email.subject, path.display());
        Ok(())
    }
}

/// Keeps messages in memory. Can be told to fail every send.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
    fail: bool,
}

impl MemoryMailer {
    /// A mailer that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that rejects every message.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Messages accepted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        if self.fail {
            return Err(Error::Mail {
                message: format!("refusing to deliver '{}'", email.subject),
            });
        }
        self.sent
            .lock()
            .map_err(|_| Error::Mail {
                message: "mailbox lock poisoned".to_string(),
            })?
            .push(email.clone());
        Ok(())
    }
}
