/// Format a [`reqwest::Error`] into a short message with a context prefix.
///
/// The prefix identifies the caller (e.g. `"JWKS"`) so log output is
/// immediately attributable. Response bodies are never included.
#[must_use]
pub fn format_http_error(e: &reqwest::Error, prefix: &str) -> String {
    if let Some(status) = e.status() {
        return format!("{prefix} HTTP {status}");
    }
    if e.is_decode() {
        return format!("{prefix} JSON parse failed: {e}");
    }
    if e.is_timeout() {
        return format!("{prefix} request timed out");
    }
    if e.is_connect() {
        return format!("{prefix} connection failed: {e}");
    }
    if e.is_builder() {
        return format!("{prefix} request build failed: {e}");
    }
    format!("{prefix} request failed")
}
