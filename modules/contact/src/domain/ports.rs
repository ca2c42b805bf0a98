use async_trait::async_trait;

use super::model::OutboundEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("message could not be built: {0}")]
    Build(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}
