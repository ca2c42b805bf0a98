use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    config_error::ConfigError, providers::jwks::JwksKeyProvider, verifier::IdTokenVerifier,
};

pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
pub const DEFAULT_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// Provider project; doubles as the expected `aud`
    pub project_id: String,
    pub jwks_url: String,
    /// `iss` is expected to be this prefix followed by `project_id`
    pub issuer_prefix: String,
    pub leeway_seconds: i64,
    pub refresh_interval_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            jwks_url: DEFAULT_JWKS_URL.to_owned(),
            issuer_prefix: DEFAULT_ISSUER_PREFIX.to_owned(),
            leeway_seconds: 60,
            refresh_interval_secs: 300,
            http_timeout_secs: 10,
        }
    }
}

/// Build the JWKS key provider and the token verifier on top of it.
///
/// The provider is returned separately so the caller can drive
/// [`crate::run_jwks_refresh_task`] with it.
///
/// # Errors
/// Returns `ConfigError` when the project is unset, the JWKS URL does not
/// parse, or the HTTP client cannot be built.
pub fn build_identity_verifier(
    cfg: &IdentityConfig,
) -> Result<(Arc<IdTokenVerifier>, Arc<JwksKeyProvider>), ConfigError> {
    let project_id = cfg.project_id.trim();
    if project_id.is_empty() {
        return Err(ConfigError::MissingProjectId);
    }

    reqwest::Url::parse(&cfg.jwks_url).map_err(|e| ConfigError::InvalidJwksUrl {
        url: cfg.jwks_url.clone(),
        reason: e.to_string(),
    })?;

    let provider = Arc::new(
        JwksKeyProvider::with_http_timeout(
            cfg.jwks_url.clone(),
            Duration::from_secs(cfg.http_timeout_secs),
        )?
        .with_refresh_interval(Duration::from_secs(cfg.refresh_interval_secs)),
    );

    let verifier = Arc::new(IdTokenVerifier::for_project(
        provider.clone(),
        &cfg.issuer_prefix,
        project_id,
        cfg.leeway_seconds,
    ));

    tracing::info!(
        project_id,
        jwks_url = %cfg.jwks_url,
        "identity verifier configured"
    );

    Ok((verifier, provider))
}
