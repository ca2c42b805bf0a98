//! Catch-all responses installed on the outer router.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::ApiError;

pub const GENERIC_FAILURE: &str = "Something went wrong!";

/// Answer for any route the router does not know.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
///
/// The panic payload is logged and replaced by a generic 500 body so that no
/// backtrace or message reaches the client.
#[allow(clippy::needless_pass_by_value)] // signature required by CatchPanicLayer
pub fn panic_to_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = detail, "request handler panicked");
    ApiError::internal(GENERIC_FAILURE).into_response()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn panic_payload_is_not_echoed() {
        let resp = panic_to_response(Box::new("database password is hunter2".to_owned()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains(GENERIC_FAILURE));
        assert!(!text.contains("hunter2"));
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let resp = not_found().await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
