use secrecy::SecretString;
use serde::Deserialize;

/// Outbound SMTP submission settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailConfig {
    pub host: String,
    /// Submission port; STARTTLS is always required
    pub port: u16,
    /// Login name, also used as the sender address
    pub username: String,
    pub password: SecretString,
    /// Where operator notifications go. Submissions fail with a
    /// configuration error while this is unset.
    pub operator_mailbox: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_owned(),
            port: 587,
            username: String::new(),
            password: SecretString::from(String::new()),
            operator_mailbox: None,
        }
    }
}

impl MailConfig {
    /// Operator mailbox with blank values treated as unset.
    #[must_use]
    pub fn operator_mailbox(&self) -> Option<&str> {
        self.operator_mailbox
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Links and images embedded in the HTML emails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    pub logo_url: String,
    pub illustration_url: String,
    pub linkedin_url: String,
    pub instagram_url: String,
    pub twitter_url: String,
    pub website_url: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            logo_url: "https://res.cloudinary.com/dlp7goalm/image/upload/v1757086594/nexa_ie1ex5.jpg"
                .to_owned(),
            illustration_url:
                "https://res.cloudinary.com/dlp7goalm/image/upload/v1757093559/emailimg2_ipdvhm.png"
                    .to_owned(),
            linkedin_url: "#".to_owned(),
            instagram_url: "#".to_owned(),
            twitter_url: "#".to_owned(),
            website_url: "https://NexaForge.com".to_owned(),
        }
    }
}
