use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ClassifierError, DocumentClassifier};
use crate::domain::{ClassificationResult, ClassificationRule, ParsingConfig};
use crate::infrastructure::observability::truncate_for_log;

use super::client::{ApiError, JobState, LlamaCloudClient};
use super::types::{
    ClassifyJobRequest, ClassifyParsingConfiguration, ClassifyResultDto, ClassifyResultsResponse,
    JobResponse,
};

pub struct LlamaCloudClassifier {
    client: Arc<LlamaCloudClient>,
}

impl LlamaCloudClassifier {
    pub fn new(client: Arc<LlamaCloudClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentClassifier for LlamaCloudClassifier {
    #[tracing::instrument(
        skip(self, file_paths, rules),
        fields(files = file_paths.len(), rules = rules.len(), max_pages = parsing.max_pages)
    )]
    async fn classify(
        &self,
        file_paths: &[&Path],
        rules: &[ClassificationRule],
        parsing: &ParsingConfig,
    ) -> Result<Vec<Option<ClassificationResult>>, ClassifierError> {
        let mut file_ids = Vec::with_capacity(file_paths.len());
        for path in file_paths {
            file_ids.push(self.client.upload_file(path).await.map_err(to_classifier_error)?);
        }

        let request = ClassifyJobRequest {
            file_ids: file_ids.clone(),
            rules,
            parsing_configuration: ClassifyParsingConfiguration {
                lang: parsing.language.clone(),
                max_pages: parsing.max_pages,
            },
        };

        let job: JobResponse = self
            .client
            .post_json("classifier/jobs", &request)
            .await
            .map_err(to_classifier_error)?;
        tracing::debug!(job_id = %job.id, "Classification job submitted");

        let status_path = format!("classifier/jobs/{}", job.id);
        if let JobState::Failed(reason) = self
            .client
            .wait_for_job(&status_path)
            .await
            .map_err(to_classifier_error)?
        {
            return Err(ClassifierError::JobFailed(reason));
        }

        let results: ClassifyResultsResponse = self
            .client
            .get_json(&format!("{status_path}/results"))
            .await
            .map_err(to_classifier_error)?;

        Ok(align_results(&file_ids, results))
    }
}

/// Orders remote results by the submitted file ids. Files missing from the response, or
/// whose result is incomplete, map to `None`.
pub(crate) fn align_results(
    file_ids: &[String],
    mut response: ClassifyResultsResponse,
) -> Vec<Option<ClassificationResult>> {
    file_ids
        .iter()
        .map(|file_id| {
            let position = response.items.iter().position(|i| &i.file_id == file_id)?;
            let item = response.items.swap_remove(position);
            item.result.and_then(into_domain)
        })
        .collect()
}

fn into_domain(dto: ClassifyResultDto) -> Option<ClassificationResult> {
    let doc_type = dto.doc_type.filter(|t| !t.trim().is_empty())?;
    let confidence = dto.confidence?;
    let reasoning = dto.reasoning.unwrap_or_default();

    tracing::debug!(
        doc_type = %doc_type,
        confidence,
        reasoning = %truncate_for_log(&reasoning),
        "Classification result received"
    );

    Some(ClassificationResult::new(doc_type, confidence, reasoning))
}

fn to_classifier_error(e: ApiError) -> ClassifierError {
    match e {
        ApiError::Timeout(path) => ClassifierError::Timeout(path),
        ApiError::Decode(msg) => ClassifierError::InvalidResponse(msg),
        ApiError::Io(io) => ClassifierError::Io(io),
        other => ClassifierError::ApiRequestFailed(other.to_string()),
    }
}
