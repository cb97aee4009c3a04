use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::domain::AgentName;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct DocumentTypeResponse {
    pub name: String,
    pub agent: String,
    pub provisioned: bool,
    pub classifiable: bool,
    pub fields: Vec<FieldResponse>,
}

#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

pub async fn document_types_handler<C, X>(
    State(state): State<AppState<C, X>>,
) -> impl IntoResponse
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    let service = &state.intake_service;
    let types: Vec<DocumentTypeResponse> = service
        .registry()
        .all()
        .iter()
        .map(|schema| {
            let agent = AgentName::for_type(schema.name);
            DocumentTypeResponse {
                name: schema.name.to_string(),
                provisioned: service.agents().contains(&agent),
                agent: agent.to_string(),
                classifiable: schema.rule_description.is_some(),
                fields: schema
                    .fields
                    .iter()
                    .map(|f| FieldResponse {
                        name: f.name.to_string(),
                        field_type: f.field_type.as_str().to_string(),
                    })
                    .collect(),
            }
        })
        .collect();

    Json(types)
}
