use crate::services::ScoringError;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// The lead submission failed validation.
    Validation(ValidationError),
    /// Bad request error (unparsable body).
    BadRequest(String),
    /// Scoring failed after validation.
    Processing(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Processing(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Validation failures are returned verbatim. Processing failures are
    /// logged in full and answered with a generic message.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Processing(msg) => {
                tracing::error!("Processing error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing lead".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<ScoringError> for AppError {
    /// Converts a pipeline failure into an `AppError`.
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Validation(e) => AppError::Validation(e),
            ScoringError::Processing(msg) => AppError::Processing(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = AppError::Validation(ValidationError::InvalidIncome).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::BadRequest("EOF while parsing".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Processing("model offline".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_scoring_error() {
        let err = AppError::from(ScoringError::Validation(ValidationError::ConsentRequired));
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::ConsentRequired)
        ));

        let err = AppError::from(ScoringError::Processing("timeout".into()));
        assert_eq!(err.to_string(), "Processing error: timeout");
    }
}
