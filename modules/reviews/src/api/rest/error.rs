use nexa_errors::ApiError;

use crate::domain::error::ReviewError;

impl From<ReviewError> for ApiError {
    fn from(e: ReviewError) -> Self {
        match &e {
            ReviewError::Validation(_) => ApiError::bad_request("All fields are required"),
            ReviewError::Storage(_) => {
                tracing::error!(error = ?e, "review store error");
                ApiError::internal("Server error")
            }
        }
    }
}
