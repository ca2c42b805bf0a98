use nexa_errors::ApiError;

use crate::domain::error::ContactError;

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        match &e {
            ContactError::MissingField => ApiError::bad_request("Email and message are required"),
            ContactError::InvalidEmail(_) => ApiError::bad_request("Invalid email format"),
            ContactError::Configuration(_) => {
                tracing::error!(error = %e, "contact relay misconfigured");
                ApiError::internal("Server configuration error")
            }
            ContactError::Template(_) | ContactError::Delivery { .. } => {
                tracing::error!(error = %e, "Error sending email");
                ApiError::internal("Failed to send message")
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::ports::MailerError;
    use axum::http::StatusCode;

    #[test]
    fn delivery_failure_does_not_name_the_leg() {
        let err = ApiError::from(ContactError::Delivery {
            leg: "auto-reply",
            source: MailerError::Transport("550 mailbox unavailable".into()),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to send message");
    }

    #[test]
    fn configuration_error_is_redacted() {
        let err = ApiError::from(ContactError::configuration("operator mailbox is not set"));
        assert_eq!(err.message, "Server configuration error");
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(
            ApiError::from(ContactError::MissingField).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ContactError::InvalidEmail("x".into())).message,
            "Invalid email format"
        );
    }
}
