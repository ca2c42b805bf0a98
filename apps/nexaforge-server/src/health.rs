use std::sync::Arc;

use axum::{Extension, Json};
use chrono::{DateTime, SecondsFormat, Utc};
use reviews::ReviewService;
use serde::Serialize;

pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage_status: StorageStatus,
    pub timestamp: String,
}

impl HealthResponse {
    fn at(storage_status: StorageStatus, now: DateTime<Utc>) -> Self {
        Self {
            status: "OK",
            storage_status,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Liveness plus a store ping. Always 200; a dead store only shows up in
/// `storageStatus`.
pub async fn health(Extension(reviews): Extension<Arc<ReviewService>>) -> Json<HealthResponse> {
    let storage_status = if reviews.storage_available().await {
        StorageStatus::Connected
    } else {
        StorageStatus::Disconnected
    };
    Json(HealthResponse::at(storage_status, Utc::now()))
}
