use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::application::services::{IntakeOutcome, IntakeReport};
use crate::domain::ClassificationResult;
use crate::presentation::render::{
    CLASSIFICATION_FAILED_MESSAGE, FieldCard, format_type_heading, render_cards,
    unmapped_type_message,
};
use crate::presentation::state::AppState;

use super::error::{ErrorResponse, intake_error_status};
use super::upload::read_upload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    Extracted,
    ClassificationFailed,
    UnmappedType,
}

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub upload_id: String,
    pub filename: String,
    pub status: IntakeStatus,
    pub stage: &'static str,
    pub classification: Option<ClassificationResult>,
    pub document_type_title: Option<String>,
    pub cards: Vec<FieldCard>,
    pub message: Option<String>,
    pub processed_at: DateTime<Utc>,
}

impl From<IntakeReport> for IntakeResponse {
    fn from(report: IntakeReport) -> Self {
        let (status, document_type_title, cards, message) = match &report.outcome {
            IntakeOutcome::ClassificationFailed => (
                IntakeStatus::ClassificationFailed,
                None,
                Vec::new(),
                Some(CLASSIFICATION_FAILED_MESSAGE.to_string()),
            ),
            IntakeOutcome::UnmappedType { classification } => (
                IntakeStatus::UnmappedType,
                None,
                Vec::new(),
                Some(unmapped_type_message(&classification.doc_type)),
            ),
            IntakeOutcome::Extracted {
                classification,
                extraction,
            } => (
                IntakeStatus::Extracted,
                Some(format_type_heading(&classification.doc_type)),
                render_cards(extraction),
                None,
            ),
        };

        Self {
            upload_id: report.upload_id.as_uuid().to_string(),
            filename: report.filename,
            status,
            stage: report.stage.as_str(),
            classification: report.outcome.classification().cloned(),
            document_type_title,
            cards,
            message,
            processed_at: report.processed_at,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_document_handler<C, X>(
    State(state): State<AppState<C, X>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    let document = match read_upload(&mut multipart).await {
        Ok(d) => d,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.message(), "Upload rejected");
            return (rejection.status(), Json(ErrorResponse::new(rejection.message())))
                .into_response();
        }
    };

    match state.intake_service.process(document).await {
        Ok(report) => (StatusCode::OK, Json(IntakeResponse::from(report))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Document intake failed");
            (
                intake_error_status(&e),
                Json(ErrorResponse::new(format!("Document processing failed: {e}"))),
            )
                .into_response()
        }
    }
}
