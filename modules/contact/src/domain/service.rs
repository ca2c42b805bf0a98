use std::sync::Arc;

use regex::Regex;

use super::error::ContactError;
use super::model::{ContactMessage, OutboundEmail};
use super::ports::Mailer;
use super::template::{NotificationContent, NotificationTemplate};

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static EMAIL_SHAPE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic")
});

pub const OPERATOR_SUBJECT: &str = "New Contact Form Submission";
pub const AUTO_REPLY_SUBJECT: &str = "Thank You for Contacting NexaForge";

/// Addresses the service sends from and to.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Sender address for both legs
    pub sender_address: String,
    pub operator_mailbox: Option<String>,
}

pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    template: NotificationTemplate,
    config: ServiceConfig,
}

impl ContactService {
    #[must_use]
    pub fn new(
        mailer: Arc<dyn Mailer>,
        template: NotificationTemplate,
        config: ServiceConfig,
    ) -> Self {
        Self {
            mailer,
            template,
            config,
        }
    }

    /// Relay a submission: operator notification first, then the auto-reply.
    ///
    /// The auto-reply is only attempted once the notification went out. No
    /// retries.
    ///
    /// # Errors
    /// `Configuration` when no operator mailbox is set, `InvalidEmail` for a
    /// malformed submitter address, `Template` or `Delivery` otherwise.
    pub async fn submit(&self, msg: &ContactMessage) -> Result<(), ContactError> {
        let Some(operator_mailbox) = self.config.operator_mailbox.as_deref() else {
            tracing::error!("operator mailbox is not configured");
            return Err(ContactError::configuration("operator mailbox is not set"));
        };

        if !EMAIL_SHAPE.is_match(msg.email()) {
            return Err(ContactError::InvalidEmail(msg.email().to_owned()));
        }

        let notification = self.operator_notification(msg, operator_mailbox)?;
        let reply = self.auto_reply(msg)?;

        self.mailer
            .send(&notification)
            .await
            .map_err(|source| ContactError::Delivery {
                leg: "operator notification",
                source,
            })?;
        tracing::debug!("operator notification sent");

        self.mailer
            .send(&reply)
            .await
            .map_err(|source| ContactError::Delivery {
                leg: "auto-reply",
                source,
            })?;

        tracing::info!(to = %msg.email(), "contact emails sent");
        Ok(())
    }

    fn operator_notification(
        &self,
        msg: &ContactMessage,
        operator_mailbox: &str,
    ) -> Result<OutboundEmail, ContactError> {
        let subtext = format!(
            "You have received a new message from {}. Please respond promptly to maintain excellent customer service.",
            msg.email()
        );
        let html = self.template.render(&NotificationContent {
            greeting: "New Message Received,",
            heading: "Contact Form Submission",
            subtext: &subtext,
            message_label: "Customer Message:",
            message: msg.message(),
        })?;

        Ok(OutboundEmail {
            from_name: "Contact Form".to_owned(),
            from_address: self.config.sender_address.clone(),
            to: operator_mailbox.to_owned(),
            subject: OPERATOR_SUBJECT.to_owned(),
            text: format!("New message from {}\n\nMessage:\n{}", msg.email(), msg.message()),
            html,
        })
    }

    fn auto_reply(&self, msg: &ContactMessage) -> Result<OutboundEmail, ContactError> {
        let html = self.template.render(&NotificationContent {
            greeting: "Hello,",
            heading: "Thank You for Contacting NexaForge!",
            subtext: "We've received your message and our team will get back to you within 24 hours. Here's a copy of what you sent us:",
            message_label: "Your Message:",
            message: msg.message(),
        })?;

        Ok(OutboundEmail {
            from_name: "NexaForge".to_owned(),
            from_address: self.config.sender_address.clone(),
            to: msg.email().to_owned(),
            subject: AUTO_REPLY_SUBJECT.to_owned(),
            text: format!(
                "Dear customer,\n\nThank you for reaching out to us! We have received your message and will get back to you within 24 hours.\n\nYour message:\n{}\n\nBest regards,\nThe NexaForge Team",
                msg.message()
            ),
            html,
        })
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
