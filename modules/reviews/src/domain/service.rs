use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use nexa_auth::VerifiedIdentity;
use uuid::Uuid;

use super::error::ReviewError;
use super::model::{NewReview, Review};
use super::repo::ReviewsRepository;
use crate::config::ReviewsConfig;

pub struct ReviewService {
    repo: Arc<dyn ReviewsRepository>,
    config: ReviewsConfig,
}

impl ReviewService {
    #[must_use]
    pub fn new(repo: Arc<dyn ReviewsRepository>, config: ReviewsConfig) -> Self {
        Self { repo, config }
    }

    /// # Errors
    /// Returns `ReviewError::Storage` when the store cannot be read.
    pub async fn list(&self) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repo.list_recent().await?)
    }

    /// Store a review on behalf of a verified caller.
    ///
    /// Identical resubmissions create separate records.
    ///
    /// # Errors
    /// Returns `ReviewError::Storage` when the insert fails.
    pub async fn submit(
        &self,
        identity: &VerifiedIdentity,
        new: NewReview,
    ) -> Result<Review, ReviewError> {
        let author_id = if self.config.bind_author_to_token {
            identity.subject.clone()
        } else {
            if new.author_id != identity.subject {
                tracing::warn!(
                    user_id = %new.author_id,
                    subject = %identity.subject,
                    "review userId does not match the token subject"
                );
            }
            new.author_id
        };

        let review = Review {
            id: Uuid::now_v7(),
            author_id,
            display_name: new.display_name,
            heading: new.heading,
            content: new.content,
            created_at: now_millis(),
        };

        let stored = self.repo.insert(review).await?;
        tracing::info!(review_id = %stored.id, "review stored");
        Ok(stored)
    }

    /// Whether the store answers a ping right now.
    pub async fn storage_available(&self) -> bool {
        match self.repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "review store ping failed");
                false
            }
        }
    }
}

/// Current UTC time at millisecond precision, which every backend round-trips.
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
