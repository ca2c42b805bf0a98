use super::ports::MailerError;

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("email and message are required")]
    MissingField,

    #[error("'{0}' is not an email address")]
    InvalidEmail(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("{leg} email could not be delivered: {source}")]
    Delivery {
        leg: &'static str,
        #[source]
        source: MailerError,
    },
}

impl ContactError {
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
