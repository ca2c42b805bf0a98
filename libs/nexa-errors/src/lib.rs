//! Client-facing error bodies shared by every API endpoint.
//!
//! Every failure leaves the service as `{"error": "<message>"}` with a status
//! code. The message is always a generic, caller-safe string; the detail
//! belongs in the server log.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api_error;

#[cfg(feature = "axum")]
pub mod fallback;

pub use api_error::{ApiError, ApiResult, ErrorBody};
