//! Outbound mail delivery.

use async_trait::async_trait;
use tracing;

use jurist_core::result::AppResult;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Sender address.
    pub from: String,
    /// Recipients; each gets an individual copy.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivers rendered mail.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send one message. Errors are treated as transient by the caller.
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()>;
}

/// Writes each message as a structured log record instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        tracing::info!(
            from = %mail.from,
            to = ?mail.to,
            subject = %mail.subject,
            body_len = mail.body.len(),
            "Mail delivered to log"
        );
        Ok(())
    }
}
