use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    claims::Claims,
    errors::AuthError,
    key_provider::KeyProvider,
    validation::{ValidationConfig, validate_claims},
};

/// Who a verified bearer token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<Claims> for VerifiedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.subject,
            email: claims.email,
            name: claims.name,
        }
    }
}

/// Checks an opaque bearer token with the identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// Verifies provider-issued ID tokens: signature via a [`KeyProvider`],
/// then issuer, audience and time claims via [`ValidationConfig`].
pub struct IdTokenVerifier {
    provider: Arc<dyn KeyProvider>,
    validation: ValidationConfig,
}

impl IdTokenVerifier {
    #[must_use]
    pub fn new(provider: Arc<dyn KeyProvider>, validation: ValidationConfig) -> Self {
        Self {
            provider,
            validation,
        }
    }

    /// Verifier for a single provider project: `iss` must be
    /// `issuer_prefix + project_id` and `aud` must be `project_id`.
    #[must_use]
    pub fn for_project(
        provider: Arc<dyn KeyProvider>,
        issuer_prefix: &str,
        project_id: &str,
        leeway_seconds: i64,
    ) -> Self {
        Self::new(
            provider,
            ValidationConfig {
                allowed_issuers: vec![format!("{issuer_prefix}{project_id}")],
                allowed_audiences: vec![project_id.to_owned()],
                leeway_seconds,
            },
        )
    }
}

#[async_trait]
impl IdentityVerifier for IdTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let (_header, raw) = self.provider.validate_and_decode(token).await?;
        let claims = Claims::from_value(&raw)?;
        validate_claims(&claims, &self.validation)?;

        tracing::debug!(
            provider = self.provider.name(),
            subject = %claims.subject,
            "bearer token verified"
        );
        Ok(claims.into())
    }
}
