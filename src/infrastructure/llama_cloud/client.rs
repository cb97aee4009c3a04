use std::path::Path;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ContentType;

use super::types::{FileResponse, JobResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.cloud.llamaindex.ai";
pub const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct LlamaCloudConfig {
    pub base_url: String,
    pub api_key: String,
    pub project_id: String,
    pub organization_id: String,
    pub request_timeout: Duration,
    pub poll_timeout: Duration,
}

/// Authenticated connection to the LlamaCloud REST API, scoped to one project and
/// organization. Shared by the classifier and extraction adapters.
pub struct LlamaCloudClient {
    http: Client,
    base_url: String,
    api_key: String,
    project_id: String,
    organization_id: String,
    poll_timeout: Duration,
}

impl LlamaCloudClient {
    pub fn new(config: LlamaCloudConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("client build: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            project_id: config.project_id,
            organization_id: config.organization_id,
            poll_timeout: config.poll_timeout,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn scoped(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key).query(&[
            ("project_id", self.project_id.as_str()),
            ("organization_id", self.organization_id.as_str()),
        ])
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .scoped(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("GET {path}: {e}")))?;
        decode(path, response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .scoped(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("POST {path}: {e}")))?;
        decode(path, response).await
    }

    /// Uploads a local file and returns the remote file id.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_file(&self, path: &Path) -> Result<String, ApiError> {
        let data = tokio::fs::read(path).await.map_err(ApiError::Io)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let mime = ContentType::from_filename(&file_name)
            .map(|ct| ct.as_mime())
            .unwrap_or("application/octet-stream");

        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::Transport(format!("mime: {e}")))?;
        let form = multipart::Form::new().part("upload_file", part);

        let response = self
            .scoped(self.http.post(self.url("files")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("POST files: {e}")))?;

        let file: FileResponse = decode("files", response).await?;
        tracing::debug!(file_id = %file.id, "File uploaded");
        Ok(file.id)
    }

    /// Polls `path` until the job reaches a terminal status or the poll timeout elapses.
    pub async fn wait_for_job(&self, path: &str) -> Result<JobState, ApiError> {
        let poll = async {
            let mut interval = INITIAL_POLL_INTERVAL;
            loop {
                let job: JobResponse = self.get_json(path).await?;
                match JobState::from_status(&job.status) {
                    JobState::Running => {
                        tracing::trace!(job_id = %job.id, status = %job.status, "Job still running");
                        tokio::time::sleep(interval).await;
                        interval = (interval * 2).min(MAX_POLL_INTERVAL);
                    }
                    JobState::Failed(_) => {
                        let reason = job.error_message.unwrap_or(job.status);
                        return Ok(JobState::Failed(reason));
                    }
                    state => return Ok(state),
                }
            }
        };

        tokio::time::timeout(self.poll_timeout, poll)
            .await
            .map_err(|_| ApiError::Timeout(path.to_string()))?
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            path: path.to_string(),
            status,
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(format!("{path}: {e}")))
}

/// Remote job status collapsed to what the adapters act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Running,
    Succeeded,
    PartiallySucceeded,
    Failed(String),
}

impl JobState {
    pub fn from_status(status: &str) -> Self {
        match status.to_ascii_uppercase().as_str() {
            "SUCCESS" | "COMPLETED" => JobState::Succeeded,
            "PARTIAL_SUCCESS" => JobState::PartiallySucceeded,
            "ERROR" | "FAILED" | "CANCELLED" => JobState::Failed(status.to_string()),
            _ => JobState::Running,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{path} returned {status}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("timed out polling {0}")]
    Timeout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
