use std::sync::Arc;

use anyhow::Result;
use axum::{Extension, Router, http::HeaderName, routing::get};
use contact::ContactService;
use nexa_auth::IdentityVerifier;
use nexa_errors::fallback::{not_found, panic_to_response};
use reviews::ReviewService;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::cors::build_cors_layer;
use crate::health::{HEALTH_PATH, health};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Long-lived services the handlers share.
#[derive(Clone)]
pub struct AppServices {
    pub contact: Arc<ContactService>,
    pub reviews: Arc<ReviewService>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

/// Assemble every route and the middleware stack.
///
/// Layer order, outermost first: `SetRequestId` -> `PropagateRequestId` ->
/// Trace -> CORS -> `CatchPanic` -> routes.
///
/// # Errors
/// Fails when the CORS settings are invalid.
pub fn build_router(services: AppServices, server: &ServerConfig) -> Result<Router> {
    let mut router = Router::new()
        .route(HEALTH_PATH, get(health))
        .layer(Extension(services.reviews.clone()));
    router = contact::api::rest::routes::register_routes(router, services.contact);
    router = reviews::api::rest::routes::register_routes(
        router,
        services.reviews,
        services.verifier,
    );

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Ok(router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_to_response))
        .layer(build_cors_layer(server)?)
        .layer(TraceLayer::new_for_http().make_span_with(
            |req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                )
            },
        ))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid)))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[path = "app_test.rs"]
mod app_test;
