use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::config::MailConfig;
use crate::domain::model::OutboundEmail;
use crate::domain::ports::{Mailer, MailerError};

/// SMTP submission client (STARTTLS required), pooled and shared by all requests.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// # Errors
    /// Returns `MailerError::Transport` if the relay cannot be set up for `cfg.host`.
    pub fn new(cfg: &MailConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .map_err(|e| MailerError::Transport(e.to_string()))?
            .port(cfg.port);

        if cfg.username.is_empty() {
            tracing::warn!(
                host = %cfg.host,
                "SMTP username not set; sending without authentication"
            );
        } else {
            builder = builder.credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.expose_secret().to_owned(),
            ));
        }

        tracing::info!(host = %cfg.host, port = cfg.port, "SMTP transport configured");
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let message = build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;
        tracing::debug!(code = %response.code(), subject = %email.subject, "SMTP accepted message");
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, MailerError> {
    raw.parse::<Address>().map_err(|e| MailerError::Address {
        address: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// multipart/alternative: plain text first, HTML preferred by capable clients.
fn build_message(email: &OutboundEmail) -> Result<Message, MailerError> {
    let from = Mailbox::new(
        Some(email.from_name.clone()),
        parse_address(&email.from_address)?,
    );
    let to = Mailbox::new(None, parse_address(&email.to)?);

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| MailerError::Build(e.to_string()))
}
