use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::model::Review;
use crate::domain::repo::ReviewsRepository;

use super::entity::{self, Entity as ReviewEntity};

pub struct SeaOrmReviewsRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewsRepository for SeaOrmReviewsRepository {
    async fn list_recent(&self) -> anyhow::Result<Vec<Review>> {
        let rows = ReviewEntity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, review: Review) -> anyhow::Result<Review> {
        let active_model: entity::ActiveModel = review.into();
        let model = active_model.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}
