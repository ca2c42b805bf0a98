use async_trait::async_trait;
use jsonwebtoken::Header;
use serde_json::Value;

use crate::claims_error::ClaimsError;

/// Source of signature-verification keys for bearer ID tokens.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Check the token signature and return its header plus raw payload.
    ///
    /// Issuer, audience and time claims are not checked here.
    async fn validate_and_decode(&self, token: &str) -> Result<(Header, Value), ClaimsError>;

    /// Refresh cached keys if due.
    async fn refresh_keys(&self) -> Result<(), ClaimsError>;
}
