use super::error::ContactError;

/// A validated contact form submission.
///
/// Both fields are present and non-empty and are kept exactly as submitted;
/// the email shape is checked by the service once configuration is known to
/// be complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    email: String,
    message: String,
}

impl ContactMessage {
    /// # Errors
    /// Returns `ContactError::MissingField` if either field is absent or empty.
    pub fn new(email: Option<String>, message: Option<String>) -> Result<Self, ContactError> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (present(email), present(message)) {
            (Some(email), Some(message)) => Ok(Self { email, message }),
            _ => Err(ContactError::MissingField),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One fully rendered email, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}
