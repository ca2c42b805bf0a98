use async_trait::async_trait;

use super::model::Review;

#[async_trait]
pub trait ReviewsRepository: Send + Sync {
    /// Every review, newest first (ties by id, descending).
    async fn list_recent(&self) -> anyhow::Result<Vec<Review>>;

    async fn insert(&self, review: Review) -> anyhow::Result<Review>;

    /// Round-trip to the store.
    async fn ping(&self) -> anyhow::Result<()>;
}
