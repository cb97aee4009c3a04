use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::presentation::render::{render_error_page, render_result_page, render_upload_page};
use crate::presentation::state::AppState;

use super::error::intake_error_status;
use super::upload::read_upload;

pub async fn upload_form_handler<C, X>(State(state): State<AppState<C, X>>) -> impl IntoResponse
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    Html(render_upload_page(state.upload.max_file_size_mb))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_submit_handler<C, X>(
    State(state): State<AppState<C, X>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    let max_mb = state.upload.max_file_size_mb;

    let document = match read_upload(&mut multipart).await {
        Ok(d) => d,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.message(), "Upload rejected");
            return (
                rejection.status(),
                Html(render_error_page(&rejection.message(), max_mb)),
            )
                .into_response();
        }
    };

    match state.intake_service.process(document).await {
        Ok(report) => (StatusCode::OK, Html(render_result_page(&report, max_mb))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Document intake failed");
            (
                intake_error_status(&e),
                Html(render_error_page(
                    &format!("Document processing failed: {e}"),
                    max_mb,
                )),
            )
                .into_response()
        }
    }
}
