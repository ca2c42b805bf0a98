use std::sync::Arc;

use axum::{Extension, Router, routing::post};

use crate::api::rest::handlers;
use crate::domain::service::ContactService;

pub const CONTACT_PATH: &str = "/api/contact";

pub fn register_routes(router: Router, service: Arc<ContactService>) -> Router {
    router
        .route(CONTACT_PATH, post(handlers::submit_contact))
        .layer(Extension(service))
}
