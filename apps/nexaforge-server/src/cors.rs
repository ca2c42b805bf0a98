use std::time::Duration;

use anyhow::Result;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;

/// Credentialed CORS for the configured frontend origins.
///
/// # Errors
/// A `"*"` origin is refused: browsers reject wildcard origins on
/// credentialed responses. Origins that are not valid header values are
/// refused too.
pub fn build_cors_layer(cfg: &ServerConfig) -> Result<CorsLayer> {
    if cfg.allowed_origins.iter().any(|o| o == "*") {
        anyhow::bail!(
            "CORS misconfiguration: allowed_origins=['*'] cannot be combined with credentials"
        );
    }

    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o.trim_end_matches('/'))
                .map_err(|e| anyhow::anyhow!("invalid CORS origin {o:?}: {e}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if origins.is_empty() {
        tracing::warn!("no CORS origins configured, browsers will be refused");
    }

    let mut layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    if cfg.cors_max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cfg.cors_max_age_seconds));
    }

    Ok(layer)
}
