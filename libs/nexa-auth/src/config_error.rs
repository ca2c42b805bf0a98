use thiserror::Error;

/// Errors that can occur while building the identity verifier from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("identity.project_id must be set to verify bearer tokens")]
    MissingProjectId,

    #[error("invalid JWKS URL '{url}': {reason}")]
    InvalidJwksUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
