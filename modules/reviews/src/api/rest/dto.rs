use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::ReviewError;
use crate::domain::model::{NewReview, Review};

/// `POST /api/reviews` body. Every field is required; absence is reported
/// as a validation error rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub heading: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<CreateReviewRequest> for NewReview {
    type Error = ReviewError;

    fn try_from(req: CreateReviewRequest) -> Result<Self, Self::Error> {
        NewReview::new(req.user_id, req.display_name, req.heading, req.content)
    }
}

/// REST representation of a stored review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: Uuid,
    pub user_id: String,
    pub display_name: String,
    pub heading: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            user_id: r.author_id,
            display_name: r.display_name,
            heading: r.heading,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn review_serializes_with_camel_case_wire_names() {
        let dto = ReviewDto::from(Review {
            id: Uuid::nil(),
            author_id: "u1".into(),
            display_name: "Ana".into(),
            heading: "Great".into(),
            content: "Fast".into(),
            created_at: Utc.with_ymd_and_hms(2025, 9, 6, 12, 30, 0).unwrap(),
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "userId": "u1",
                "displayName": "Ana",
                "heading": "Great",
                "content": "Fast",
                "createdAt": "2025-09-06T12:30:00Z"
            })
        );
    }

    #[test]
    fn request_reads_camel_case_fields() {
        let req: CreateReviewRequest = serde_json::from_value(json!({
            "userId": "u1",
            "displayName": "Ana",
            "heading": "Great",
            "content": "Fast"
        }))
        .unwrap();
        let review = NewReview::try_from(req).unwrap();
        assert_eq!(review.author_id, "u1");
        assert_eq!(review.display_name, "Ana");
    }
}
