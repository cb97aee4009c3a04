mod classifier;
mod client;
mod extract;
mod types;

pub use classifier::LlamaCloudClassifier;
pub use client::{ApiError, DEFAULT_BASE_URL, JobState, LlamaCloudClient, LlamaCloudConfig};
pub use extract::LlamaExtractClient;
pub use types::{
    ClassifyJobRequest, ClassifyParsingConfiguration, ClassifyResultDto, ClassifyResultItem,
    ClassifyResultsResponse, CreateAgentRequest, ExtractConfig, ExtractJobRequest,
    ExtractRunResponse, ExtractionAgentResponse, FileResponse, JobResponse,
};
