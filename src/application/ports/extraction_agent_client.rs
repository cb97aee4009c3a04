use std::path::Path;

use async_trait::async_trait;

use crate::domain::{AgentHandle, AgentName, DocumentTypeSchema, ExtractionResult};

#[async_trait]
pub trait ExtractionAgentClient: Send + Sync {
    async fn get_agent(&self, name: &AgentName) -> Result<AgentHandle, AgentLookupError>;

    async fn create_agent(
        &self,
        name: &AgentName,
        schema: &DocumentTypeSchema,
    ) -> Result<AgentHandle, ExtractionError>;

    async fn extract(
        &self,
        agent: &AgentHandle,
        file_path: &Path,
    ) -> Result<ExtractionResult, ExtractionError>;
}

/// Outcome of looking an agent up by name. Only `NotFound` means the agent is absent;
/// the other variants say nothing about whether it exists.
#[derive(Debug, thiserror::Error)]
pub enum AgentLookupError {
    #[error("agent not found: {0}")]
    NotFound(String),
    #[error("api request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("extraction job failed: {0}")]
    JobFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out waiting for extraction job {0}")]
    Timeout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
