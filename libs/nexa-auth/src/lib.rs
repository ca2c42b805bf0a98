#![warn(warnings)]

// Core modules
pub mod claims;
pub mod claims_error;
pub mod errors;
pub mod key_provider;
pub mod validation;
pub mod verifier;

pub mod config;
pub mod config_error;
pub mod http_error;
pub mod providers;

#[cfg(feature = "axum-ext")]
pub mod axum_ext;

pub use claims::Claims;
pub use claims_error::ClaimsError;
pub use config::{IdentityConfig, build_identity_verifier};
pub use config_error::ConfigError;
pub use errors::AuthError;
pub use key_provider::KeyProvider;
pub use providers::jwks::{JwksKeyProvider, run_jwks_refresh_task};
pub use validation::ValidationConfig;
pub use verifier::{IdTokenVerifier, IdentityVerifier, VerifiedIdentity};
#[cfg(feature = "axum-ext")]
pub use axum_ext::{Authenticated, extract_bearer_token, require_bearer};
