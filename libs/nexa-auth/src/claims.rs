use serde_json::Value;
use time::OffsetDateTime;

use crate::claims_error::ClaimsError;
use crate::validation::{extract_audiences, extract_string, parse_timestamp};

/// Normalized ID-token claims.
///
/// Only the claims the service relies on are lifted out of the raw payload;
/// everything else stays with the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Stable user identifier issued by the provider (`sub`)
    pub subject: String,

    /// Token issuer (`iss`)
    pub issuer: String,

    /// Intended audiences (`aud`), a single string is normalized to one entry
    pub audiences: Vec<String>,

    /// Expiration (`exp`)
    pub expires_at: OffsetDateTime,

    /// Issue time (`iat`)
    pub issued_at: OffsetDateTime,

    /// Time the user authenticated (`auth_time`), when present
    pub auth_time: Option<OffsetDateTime>,

    pub email: Option<String>,
    pub name: Option<String>,
}

impl Claims {
    /// Lift claims out of a decoded JWT payload.
    ///
    /// # Errors
    /// Returns `ClaimsError` when a required claim is missing or malformed.
    pub fn from_value(raw: &Value) -> Result<Self, ClaimsError> {
        let subject = extract_string(&raw["sub"], "sub")?;
        let issuer = extract_string(&raw["iss"], "iss")?;

        let audiences = extract_audiences(&raw["aud"]);
        if audiences.is_empty() {
            return Err(ClaimsError::MissingClaim("aud".into()));
        }

        let expires_at = match raw.get("exp") {
            Some(v) => parse_timestamp(v, "exp")?,
            None => return Err(ClaimsError::MissingClaim("exp".into())),
        };
        let issued_at = match raw.get("iat") {
            Some(v) => parse_timestamp(v, "iat")?,
            None => return Err(ClaimsError::MissingClaim("iat".into())),
        };
        let auth_time = raw
            .get("auth_time")
            .map(|v| parse_timestamp(v, "auth_time"))
            .transpose()?;

        Ok(Self {
            subject,
            issuer,
            audiences,
            expires_at,
            issued_at,
            auth_time,
            email: raw["email"].as_str().map(ToOwned::to_owned),
            name: raw["name"].as_str().map(ToOwned::to_owned),
        })
    }
}
