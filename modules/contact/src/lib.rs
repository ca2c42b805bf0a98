//! Contact form relay.
//!
//! A submission becomes two emails sent one after the other over the same
//! transport: a notification to the operator mailbox and an auto-reply to
//! the submitter.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::{BrandingConfig, MailConfig};
pub use domain::error::ContactError;
pub use domain::model::{ContactMessage, OutboundEmail};
pub use domain::ports::{Mailer, MailerError};
pub use domain::service::ContactService;
pub use domain::template::NotificationTemplate;
pub use infra::smtp::SmtpMailer;
