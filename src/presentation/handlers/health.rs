use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub agents: usize,
}

pub async fn health_handler<C, X>(State(state): State<AppState<C, X>>) -> impl IntoResponse
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            agents: state.intake_service.agents().len(),
        }),
    )
}
