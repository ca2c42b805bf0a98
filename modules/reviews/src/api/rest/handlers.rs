use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
};
use nexa_auth::Authenticated;
use nexa_errors::ApiResult;

use crate::domain::model::NewReview;
use crate::domain::service::ReviewService;

use super::dto::{CreateReviewRequest, ReviewDto};

pub async fn list_reviews(
    Extension(svc): Extension<Arc<ReviewService>>,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    let reviews = svc.list().await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

pub async fn create_review(
    Extension(svc): Extension<Arc<ReviewService>>,
    Authenticated(identity): Authenticated,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ReviewDto>)> {
    let Json(req) = payload?;
    let new = NewReview::try_from(req)?;
    let review = svc.submit(&identity, new).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}
