use thiserror::Error;

/// Outcome of a failed bearer-token check, as seen by request handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: missing bearer token")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token validation failed: {0}")]
    ValidationFailed(String),

    #[error("JWKS fetch failed: {0}")]
    JwksFetchFailed(String),

    #[error("Issuer mismatch: expected {expected}, got {actual}")]
    IssuerMismatch { expected: String, actual: String },

    #[error("Audience mismatch: expected {expected:?}, got {actual:?}")]
    AudienceMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Token expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "axum-ext")]
impl From<AuthError> for nexa_errors::ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::Unauthenticated => {
                tracing::debug!("rejecting request without bearer token");
                nexa_errors::ApiError::unauthorized("No token provided")
            }
            AuthError::JwksFetchFailed(detail) => {
                tracing::warn!(error = %detail, "identity provider keys unavailable");
                nexa_errors::ApiError::unauthorized("Invalid token")
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "authentication pipeline misconfigured");
                nexa_errors::ApiError::internal("Server error")
            }
            _ => {
                tracing::debug!(error = %err, "token verification failed");
                nexa_errors::ApiError::unauthorized("Invalid token")
            }
        }
    }
}

#[cfg(feature = "axum-ext")]
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        nexa_errors::ApiError::from(self).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[cfg(feature = "axum-ext")]
    #[test]
    fn maps_to_generic_client_messages() {
        use axum::http::StatusCode;

        let missing = nexa_errors::ApiError::from(AuthError::Unauthenticated);
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
        assert_eq!(missing.message, "No token provided");

        let expired = nexa_errors::ApiError::from(AuthError::TokenExpired);
        assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired.message, "Invalid token");

        let mismatch = nexa_errors::ApiError::from(AuthError::IssuerMismatch {
            expected: "https://securetoken.google.com/prod".into(),
            actual: "https://evil.example.com".into(),
        });
        assert_eq!(mismatch.message, "Invalid token");
        assert!(!mismatch.message.contains("evil"));

        let internal = nexa_errors::ApiError::from(AuthError::Internal("no verifier".into()));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
