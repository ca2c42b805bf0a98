mod support;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use reviews::{ReviewService, api::rest::routes::register_routes};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use support::{GOOD_TOKEN, StubVerifier};
use tower::ServiceExt;

fn app(service: Arc<ReviewService>) -> Router {
    register_routes(Router::new(), service, Arc::new(StubVerifier))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn list_request() -> Request<Body> {
    Request::builder()
        .uri("/api/reviews")
        .body(Body::empty())
        .unwrap()
}

fn create_request(token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/reviews")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn full_review(heading: &str) -> Value {
    json!({
        "userId": "firebase-uid-1",
        "displayName": "Ana",
        "heading": heading,
        "content": "Delivered ahead of schedule"
    })
}

async fn stored_count(db: &DatabaseConnection) -> u64 {
    reviews::infra::storage::entity::Entity::find()
        .count(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let (svc, _db) = support::review_service().await;
    let (status, body) = send(app(svc), list_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_without_token_is_401_and_writes_nothing() {
    let (svc, db) = support::review_service().await;
    let (status, body) = send(app(svc), create_request(None, &full_review("Great"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "No token provided"}));
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn create_with_rejected_token_is_401() {
    let (svc, db) = support::review_service().await;
    let (status, body) = send(
        app(svc),
        create_request(Some("forged"), &full_review("Great")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid token"}));
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn missing_token_wins_over_invalid_body() {
    let (svc, _db) = support::review_service().await;
    let (status, _) = send(app(svc), create_request(None, &json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_without_heading_is_400_and_writes_nothing() {
    let (svc, db) = support::review_service().await;
    let mut body = full_review("x");
    body.as_object_mut().unwrap().remove("heading");

    let (status, json) = send(app(svc), create_request(Some(GOOD_TOKEN), &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "All fields are required"}));
    assert_eq!(stored_count(&db).await, 0);
}

#[tokio::test]
async fn create_returns_201_and_appears_first_in_listing() {
    let (svc, _db) = support::review_service().await;

    let (status, first) = send(
        app(svc.clone()),
        create_request(Some(GOOD_TOKEN), &full_review("First")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["heading"], "First");
    assert_eq!(first["userId"], "firebase-uid-1");
    assert!(first["id"].is_string());
    assert!(first["createdAt"].is_string());

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, second) = send(
        app(svc.clone()),
        create_request(Some(GOOD_TOKEN), &full_review("Second")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(app(svc), list_request()).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], second);
    assert_eq!(listed[1], first);
}

#[tokio::test]
async fn client_cannot_set_created_at() {
    let (svc, _db) = support::review_service().await;
    let mut body = full_review("Backdated");
    body["createdAt"] = json!("2000-01-01T00:00:00Z");

    let (status, created) = send(app(svc), create_request(Some(GOOD_TOKEN), &body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["createdAt"], "2000-01-01T00:00:00Z");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (svc, db) = support::review_service().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/reviews")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {GOOD_TOKEN}"))
        .body(Body::from("{broken"))
        .unwrap();

    let (status, body) = send(app(svc), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));
    assert_eq!(stored_count(&db).await, 0);
}
