use crate::{claims::Claims, claims_error::ClaimsError};
use time::OffsetDateTime;

/// Longest `sub` the identity provider will ever issue.
pub const MAX_SUBJECT_LEN: usize = 128;

/// Configuration for common validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Allowed issuers (if empty, any issuer is accepted)
    pub allowed_issuers: Vec<String>,

    /// Allowed audiences (if empty, any audience is accepted)
    pub allowed_audiences: Vec<String>,

    /// Leeway in seconds for time-based validations (exp, iat, `auth_time`)
    pub leeway_seconds: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allowed_issuers: vec![],
            allowed_audiences: vec![],
            leeway_seconds: 60,
        }
    }
}

/// Perform common validation checks on claims.
///
/// # Errors
/// Returns `ClaimsError` if any validation check fails (issuer, audience, expiration, etc.).
pub fn validate_claims(claims: &Claims, config: &ValidationConfig) -> Result<(), ClaimsError> {
    validate_claims_at(claims, config, OffsetDateTime::now_utc())
}

/// [`validate_claims`] against an explicit clock reading.
///
/// # Errors
/// Returns `ClaimsError` if any validation check fails.
pub fn validate_claims_at(
    claims: &Claims,
    config: &ValidationConfig,
    now: OffsetDateTime,
) -> Result<(), ClaimsError> {
    if !config.allowed_issuers.is_empty() && !config.allowed_issuers.contains(&claims.issuer) {
        return Err(ClaimsError::InvalidIssuer {
            expected: config.allowed_issuers.clone(),
            actual: claims.issuer.clone(),
        });
    }

    // at least one audience must match
    if !config.allowed_audiences.is_empty() {
        let has_valid_audience = claims
            .audiences
            .iter()
            .any(|aud| config.allowed_audiences.contains(aud));

        if !has_valid_audience {
            return Err(ClaimsError::InvalidAudience {
                expected: config.allowed_audiences.clone(),
                actual: claims.audiences.clone(),
            });
        }
    }

    let leeway = time::Duration::seconds(config.leeway_seconds);

    if now > claims.expires_at + leeway {
        return Err(ClaimsError::Expired);
    }

    if claims.issued_at - leeway > now {
        return Err(ClaimsError::IssuedInFuture);
    }

    if let Some(auth_time) = claims.auth_time
        && auth_time - leeway > now
    {
        return Err(ClaimsError::InvalidClaimFormat {
            field: "auth_time".to_owned(),
            reason: "must be in the past".to_owned(),
        });
    }

    if claims.subject.is_empty() || claims.subject.len() > MAX_SUBJECT_LEN {
        return Err(ClaimsError::InvalidClaimFormat {
            field: "sub".to_owned(),
            reason: format!("must be 1..={MAX_SUBJECT_LEN} characters"),
        });
    }

    Ok(())
}

/// Helper to parse timestamp (seconds since epoch) into `OffsetDateTime`.
///
/// # Errors
/// Returns `ClaimsError::InvalidClaimFormat` if the value is not a valid unix timestamp.
pub fn parse_timestamp(
    value: &serde_json::Value,
    field_name: &str,
) -> Result<OffsetDateTime, ClaimsError> {
    let ts = value
        .as_i64()
        .ok_or_else(|| ClaimsError::InvalidClaimFormat {
            field: field_name.to_owned(),
            reason: "must be a number (unix timestamp)".to_owned(),
        })?;

    OffsetDateTime::from_unix_timestamp(ts).map_err(|_| ClaimsError::InvalidClaimFormat {
        field: field_name.to_owned(),
        reason: "invalid unix timestamp".to_owned(),
    })
}

/// Helper to extract string from JSON value.
///
/// # Errors
/// Returns `ClaimsError::MissingClaim` if the value is not a string.
pub fn extract_string(value: &serde_json::Value, field_name: &str) -> Result<String, ClaimsError> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| ClaimsError::MissingClaim(field_name.to_owned()))
}

/// Helper to extract string array from JSON value (handles both string and array)
#[must_use]
pub fn extract_audiences(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(s) => vec![s.clone()],
        serde_json::Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str().map(ToString::to_string))
            .collect(),
        _ => vec![],
    }
}
