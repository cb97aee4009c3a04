use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ClassificationRule;

#[derive(Debug, Deserialize)]
pub struct FileResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct JobResponse {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyJobRequest<'a> {
    pub file_ids: Vec<String>,
    pub rules: &'a [ClassificationRule],
    pub parsing_configuration: ClassifyParsingConfiguration,
}

#[derive(Debug, Serialize)]
pub struct ClassifyParsingConfiguration {
    pub lang: String,
    pub max_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResultsResponse {
    #[serde(default)]
    pub items: Vec<ClassifyResultItem>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResultItem {
    pub file_id: String,
    #[serde(default)]
    pub result: Option<ClassifyResultDto>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResultDto {
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractionAgentResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateAgentRequest<'a> {
    pub name: &'a str,
    pub data_schema: Value,
    pub config: ExtractConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractConfig {
    pub extraction_mode: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            extraction_mode: "BALANCED".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractJobRequest<'a> {
    pub extraction_agent_id: &'a str,
    pub file_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRunResponse {
    #[serde(default)]
    pub data: Option<Value>,
}
