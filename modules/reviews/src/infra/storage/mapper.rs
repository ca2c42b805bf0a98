use sea_orm::ActiveValue;

use super::entity;
use crate::domain::model::Review;

impl From<entity::Model> for Review {
    fn from(m: entity::Model) -> Self {
        Self {
            id: m.id,
            author_id: m.user_id,
            display_name: m.display_name,
            heading: m.heading,
            content: m.content,
            created_at: m.created_at,
        }
    }
}

impl From<Review> for entity::ActiveModel {
    fn from(r: Review) -> Self {
        Self {
            id: ActiveValue::Set(r.id),
            user_id: ActiveValue::Set(r.author_id),
            display_name: ActiveValue::Set(r.display_name),
            heading: ActiveValue::Set(r.heading),
            content: ActiveValue::Set(r.content),
            created_at: ActiveValue::Set(r.created_at),
        }
    }
}
