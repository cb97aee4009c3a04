use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{AgentLookupError, ExtractionAgentClient, ExtractionError};
use crate::domain::{AgentHandle, AgentName, DocumentTypeSchema, ExtractionResult};

use super::client::{ApiError, JobState, LlamaCloudClient};
use super::types::{
    CreateAgentRequest, ExtractConfig, ExtractJobRequest, ExtractRunResponse,
    ExtractionAgentResponse, JobResponse,
};

const AGENTS_PATH: &str = "extraction/extraction-agents";
const JOBS_PATH: &str = "extraction/jobs";

pub struct LlamaExtractClient {
    client: Arc<LlamaCloudClient>,
    config: ExtractConfig,
}

impl LlamaExtractClient {
    pub fn new(client: Arc<LlamaCloudClient>) -> Self {
        Self {
            client,
            config: ExtractConfig::default(),
        }
    }

    pub fn with_config(client: Arc<LlamaCloudClient>, config: ExtractConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ExtractionAgentClient for LlamaExtractClient {
    async fn get_agent(&self, name: &AgentName) -> Result<AgentHandle, AgentLookupError> {
        let path = format!("{AGENTS_PATH}/by-name/{}", name.as_str());
        let agent: ExtractionAgentResponse =
            self.client.get_json(&path).await.map_err(|e| match e {
                e if e.is_not_found() => AgentLookupError::NotFound(name.to_string()),
                ApiError::Decode(msg) => AgentLookupError::InvalidResponse(msg),
                other => AgentLookupError::RequestFailed(other.to_string()),
            })?;

        if agent.name != name.as_str() {
            return Err(AgentLookupError::InvalidResponse(format!(
                "asked for agent {name}, got {}",
                agent.name
            )));
        }

        Ok(AgentHandle::new(agent.id, name.clone()))
    }

    #[tracing::instrument(skip(self, schema), fields(agent = %name))]
    async fn create_agent(
        &self,
        name: &AgentName,
        schema: &DocumentTypeSchema,
    ) -> Result<AgentHandle, ExtractionError> {
        let request = CreateAgentRequest {
            name: name.as_str(),
            data_schema: schema.to_json_schema(),
            config: self.config.clone(),
        };

        let agent: ExtractionAgentResponse = self
            .client
            .post_json(AGENTS_PATH, &request)
            .await
            .map_err(to_extraction_error)?;

        Ok(AgentHandle::new(agent.id, name.clone()))
    }

    #[tracing::instrument(skip(self), fields(agent = %agent.name, path = %file_path.display()))]
    async fn extract(
        &self,
        agent: &AgentHandle,
        file_path: &Path,
    ) -> Result<ExtractionResult, ExtractionError> {
        let file_id = self
            .client
            .upload_file(file_path)
            .await
            .map_err(to_extraction_error)?;

        let job: JobResponse = self
            .client
            .post_json(
                JOBS_PATH,
                &ExtractJobRequest {
                    extraction_agent_id: &agent.id,
                    file_id: &file_id,
                },
            )
            .await
            .map_err(to_extraction_error)?;
        tracing::debug!(job_id = %job.id, "Extraction job submitted");

        let status_path = format!("{JOBS_PATH}/{}", job.id);
        match self
            .client
            .wait_for_job(&status_path)
            .await
            .map_err(to_extraction_error)?
        {
            JobState::Failed(reason) => return Err(ExtractionError::JobFailed(reason)),
            JobState::PartiallySucceeded => {
                tracing::warn!(job_id = %job.id, "Extraction finished with partial success");
            }
            _ => {}
        }

        let run: ExtractRunResponse = self
            .client
            .get_json(&format!("{status_path}/result"))
            .await
            .map_err(to_extraction_error)?;

        into_extraction_result(run)
    }
}

pub(crate) fn into_extraction_result(
    run: ExtractRunResponse,
) -> Result<ExtractionResult, ExtractionError> {
    match run.data {
        Some(Value::Object(map)) => Ok(ExtractionResult::new(map)),
        Some(Value::Null) | None => Ok(ExtractionResult::default()),
        Some(other) => Err(ExtractionError::InvalidResponse(format!(
            "expected an object of fields, got {other}"
        ))),
    }
}

fn to_extraction_error(e: ApiError) -> ExtractionError {
    match e {
        ApiError::Timeout(path) => ExtractionError::Timeout(path),
        ApiError::Decode(msg) => ExtractionError::InvalidResponse(msg),
        ApiError::Io(io) => ExtractionError::Io(io),
        other => ExtractionError::ApiRequestFailed(other.to_string()),
    }
}
