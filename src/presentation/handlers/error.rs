use axum::http::StatusCode;
use serde::Serialize;

use crate::application::services::IntakeError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Remote failures surface as 502; local staging failures as 500.
pub fn intake_error_status(error: &IntakeError) -> StatusCode {
    match error {
        IntakeError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        IntakeError::Classification(_) | IntakeError::Extraction(_) => StatusCode::BAD_GATEWAY,
    }
}
