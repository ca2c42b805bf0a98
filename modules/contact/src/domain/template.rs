use handlebars::Handlebars;
use serde::Serialize;

use super::error::ContactError;
use crate::config::BrandingConfig;

const TEMPLATE_NAME: &str = "notification";

/// Text that differs between the operator notification and the auto-reply.
#[derive(Debug, Clone)]
pub struct NotificationContent<'a> {
    pub greeting: &'a str,
    pub heading: &'a str,
    pub subtext: &'a str,
    pub message_label: &'a str,
    pub message: &'a str,
}

#[derive(Serialize)]
struct RenderContext<'a> {
    logo_url: &'a str,
    illustration_url: &'a str,
    linkedin_url: &'a str,
    instagram_url: &'a str,
    twitter_url: &'a str,
    website_url: &'a str,
    greeting: &'a str,
    heading: &'a str,
    subtext: &'a str,
    message_label: &'a str,
    message_content: &'a str,
    year: i32,
}

/// The single HTML layout both contact emails are rendered from.
///
/// Values are HTML-escaped on render, so submitter text is inert.
pub struct NotificationTemplate {
    registry: Handlebars<'static>,
    branding: BrandingConfig,
}

impl NotificationTemplate {
    /// # Errors
    /// Returns `ContactError::Template` if the bundled template does not compile.
    pub fn new(branding: BrandingConfig) -> Result<Self, ContactError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(
                TEMPLATE_NAME,
                include_str!("../../templates/notification.hbs"),
            )
            .map_err(|e| ContactError::Template(e.to_string()))?;

        Ok(Self { registry, branding })
    }

    /// # Errors
    /// Returns `ContactError::Template` if rendering fails.
    pub fn render(&self, content: &NotificationContent<'_>) -> Result<String, ContactError> {
        let ctx = RenderContext {
            logo_url: &self.branding.logo_url,
            illustration_url: &self.branding.illustration_url,
            linkedin_url: &self.branding.linkedin_url,
            instagram_url: &self.branding.instagram_url,
            twitter_url: &self.branding.twitter_url,
            website_url: &self.branding.website_url,
            greeting: content.greeting,
            heading: content.heading,
            subtext: content.subtext,
            message_label: content.message_label,
            message_content: content.message,
            year: time::OffsetDateTime::now_utc().year(),
        };

        self.registry
            .render(TEMPLATE_NAME, &ctx)
            .map_err(|e| ContactError::Template(e.to_string()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn content<'a>(message: &'a str) -> NotificationContent<'a> {
        NotificationContent {
            greeting: "Hello,",
            heading: "Thank You for Contacting NexaForge!",
            subtext: "We've received your message.",
            message_label: "Your Message:",
            message,
        }
    }

    #[test]
    fn renders_branding_and_content() {
        let branding = BrandingConfig {
            linkedin_url: "https://linkedin.com/company/nexaforge".into(),
            ..Default::default()
        };
        let template = NotificationTemplate::new(branding).unwrap();
        let html = template.render(&content("Need a new site")).unwrap();

        assert!(html.contains("Need a new site"));
        assert!(html.contains("Your Message:"));
        assert!(html.contains("https://linkedin.com/company/nexaforge"));
        assert!(html.contains("nexa_ie1ex5.jpg"));
        assert!(html.contains(&time::OffsetDateTime::now_utc().year().to_string()));
    }

    #[test]
    fn submitter_text_is_escaped() {
        let template = NotificationTemplate::new(BrandingConfig::default()).unwrap();
        let html = template
            .render(&content("<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
