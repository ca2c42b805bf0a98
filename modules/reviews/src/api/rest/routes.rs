use std::sync::Arc;

use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use nexa_auth::{IdentityVerifier, require_bearer};

use crate::api::rest::handlers;
use crate::domain::service::ReviewService;

pub const REVIEWS_PATH: &str = "/api/reviews";

/// `GET` is public; `POST` sits behind bearer verification, which runs
/// before the body is looked at.
pub fn register_routes(
    router: Router,
    service: Arc<ReviewService>,
    verifier: Arc<dyn IdentityVerifier>,
) -> Router {
    let create = post(handlers::create_review)
        .route_layer(middleware::from_fn_with_state(verifier, require_bearer));

    router
        .route(REVIEWS_PATH, get(handlers::list_reviews).merge(create))
        .layer(Extension(service))
}
