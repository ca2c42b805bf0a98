use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::ReviewError;

/// A stored testimonial. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    /// Author as recorded at submission time
    pub author_id: String,
    pub display_name: String,
    pub heading: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A submission that passed field validation: all four fields non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub author_id: String,
    pub display_name: String,
    pub heading: String,
    pub content: String,
}

impl NewReview {
    /// # Errors
    /// Returns `ReviewError::Validation` when any field is absent or blank.
    pub fn new(
        author_id: Option<String>,
        display_name: Option<String>,
        heading: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ReviewError> {
        let required = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (
            required(author_id),
            required(display_name),
            required(heading),
            required(content),
        ) {
            (Some(author_id), Some(display_name), Some(heading), Some(content)) => Ok(Self {
                author_id,
                display_name,
                heading,
                content,
            }),
            _ => Err(ReviewError::validation("all fields are required")),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_owned())
    }

    #[test]
    fn accepts_complete_submission() {
        let review = NewReview::new(s("u1"), s("Ana"), s("Great"), s("Fast delivery")).unwrap();
        assert_eq!(review.heading, "Great");
    }

    #[test]
    fn rejects_missing_or_blank_fields() {
        assert!(NewReview::new(s("u1"), s("Ana"), None, s("x")).is_err());
        assert!(NewReview::new(s("u1"), s("Ana"), s("  "), s("x")).is_err());
        assert!(NewReview::new(None, s("Ana"), s("h"), s("x")).is_err());
        assert!(NewReview::new(s("u1"), s(""), s("h"), s("x")).is_err());
        assert!(NewReview::new(s("u1"), s("Ana"), s("h"), s("\t")).is_err());
    }
}
