use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ClassificationResult, ClassificationRule, ParsingConfig};

#[async_trait]
pub trait DocumentClassifier: Send + Sync {
    /// Returns one entry per input path, in input order. `None` means the remote service
    /// could not classify that file.
    async fn classify(
        &self,
        file_paths: &[&Path],
        rules: &[ClassificationRule],
        parsing: &ParsingConfig,
    ) -> Result<Vec<Option<ClassificationResult>>, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("classification job failed: {0}")]
    JobFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out waiting for classification job {0}")]
    Timeout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
