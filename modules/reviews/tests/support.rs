#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use nexa_auth::{AuthError, IdentityVerifier, VerifiedIdentity};
use reviews::{
    DatabaseConfig, ReviewService, ReviewsConfig, SeaOrmReviewsRepository,
    infra::db::{connect, migrate},
};
use sea_orm::DatabaseConnection;

pub const GOOD_TOKEN: &str = "good-token";
pub const SUBJECT: &str = "firebase-uid-1";

/// Accepts exactly [`GOOD_TOKEN`].
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        if token == GOOD_TOKEN {
            Ok(VerifiedIdentity {
                subject: SUBJECT.to_owned(),
                email: Some("ana@example.com".to_owned()),
                name: None,
            })
        } else {
            Err(AuthError::InvalidToken("unknown token".to_owned()))
        }
    }
}

pub async fn migrated_db() -> DatabaseConnection {
    let db = connect(&DatabaseConfig {
        url: "sqlite::memory:".to_owned(),
        ..Default::default()
    })
    .await
    .expect("in-memory sqlite connects");
    migrate(&db).await.expect("migrations apply");
    db
}

pub async fn review_service() -> (Arc<ReviewService>, DatabaseConnection) {
    let db = migrated_db().await;
    let repo = Arc::new(SeaOrmReviewsRepository::new(db.clone()));
    (
        Arc::new(ReviewService::new(repo, ReviewsConfig::default())),
        db,
    )
}
