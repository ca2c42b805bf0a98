use serde::{Deserialize, Serialize};

/// `POST /api/contact` body. Fields are optional on the wire so that a
/// missing field is reported as a validation error, not a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

impl ContactResponse {
    #[must_use]
    pub fn sent() -> Self {
        Self {
            message: "Message sent successfully".to_owned(),
        }
    }
}
