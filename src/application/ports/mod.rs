mod document_classifier;
mod extraction_agent_client;
mod upload_staging;

pub use document_classifier::{ClassifierError, DocumentClassifier};
pub use extraction_agent_client::{AgentLookupError, ExtractionAgentClient, ExtractionError};
pub use upload_staging::{StagedFile, StagingError, UploadStaging};
