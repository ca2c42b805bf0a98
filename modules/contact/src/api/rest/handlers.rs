use std::sync::Arc;

use axum::{Json, extract::Extension, extract::rejection::JsonRejection};
use nexa_errors::ApiResult;

use crate::domain::model::ContactMessage;
use crate::domain::service::ContactService;

use super::dto::{ContactRequest, ContactResponse};

pub async fn submit_contact(
    Extension(svc): Extension<Arc<ContactService>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(req) = payload?;
    let msg = ContactMessage::new(req.email, req.message)?;
    svc.submit(&msg).await?;
    Ok(Json(ContactResponse::sent()))
}
