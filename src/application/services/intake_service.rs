use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{
    ClassifierError, DocumentClassifier, ExtractionAgentClient, ExtractionError, StagingError,
    UploadStaging,
};
use crate::domain::{
    AgentName, ClassificationResult, ExtractionResult, IntakeStage, ParsingConfig, SchemaRegistry,
    UploadId, UploadedDocument,
};

use super::AgentDirectory;

/// Runs one upload through classify, agent lookup and extract.
pub struct DocumentIntakeService<C, X>
where
    C: DocumentClassifier + ?Sized,
    X: ExtractionAgentClient + ?Sized,
{
    classifier: Arc<C>,
    agent_client: Arc<X>,
    staging: Arc<dyn UploadStaging>,
    agents: Arc<AgentDirectory>,
    registry: SchemaRegistry,
    parsing: ParsingConfig,
}

impl<C, X> DocumentIntakeService<C, X>
where
    C: DocumentClassifier + ?Sized,
    X: ExtractionAgentClient + ?Sized,
{
    pub fn new(
        classifier: Arc<C>,
        agent_client: Arc<X>,
        staging: Arc<dyn UploadStaging>,
        agents: Arc<AgentDirectory>,
        registry: SchemaRegistry,
        parsing: ParsingConfig,
    ) -> Self {
        Self {
            classifier,
            agent_client,
            staging,
            agents,
            registry,
            parsing,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn agents(&self) -> &AgentDirectory {
        &self.agents
    }

    /// The staged file is dropped, and therefore deleted, on every return path including
    /// errors propagated from the remote calls.
    #[tracing::instrument(
        skip(self, document),
        fields(
            upload_id = %document.id.as_uuid(),
            filename = %document.filename,
            bytes = document.size_bytes()
        )
    )]
    pub async fn process(&self, document: UploadedDocument) -> Result<IntakeReport, IntakeError> {
        let mut stage = Stage::new(document.id);

        let staged = self.staging.stage(&document).await?;
        stage.advance(IntakeStage::FileReceived);

        let rules = self.registry.classification_rules();
        stage.advance(IntakeStage::Classifying);
        let results = self
            .classifier
            .classify(&[staged.path()], &rules, &self.parsing)
            .await?;

        let Some(classification) = results.into_iter().next().flatten() else {
            stage.advance(IntakeStage::ClassificationFailed);
            tracing::warn!("Classification returned no result");
            return Ok(IntakeReport::new(
                &document,
                stage.current(),
                IntakeOutcome::ClassificationFailed,
            ));
        };

        stage.advance(IntakeStage::Classified);
        tracing::info!(
            doc_type = %classification.doc_type,
            confidence = classification.confidence,
            "Document classified"
        );

        let agent_name = AgentName::for_type(&classification.doc_type);
        let Some(agent) = self.agents.get(&agent_name) else {
            tracing::warn!(agent = %agent_name, "No extractor registered for document type");
            stage.advance(IntakeStage::Done);
            return Ok(IntakeReport::new(
                &document,
                stage.current(),
                IntakeOutcome::UnmappedType { classification },
            ));
        };

        stage.advance(IntakeStage::Extracting);
        let extraction = self.agent_client.extract(agent, staged.path()).await?;
        stage.advance(IntakeStage::Done);

        tracing::info!(fields = extraction.len(), agent = %agent_name, "Extraction completed");

        if let Err(e) = staged.close() {
            tracing::warn!(error = %e, "Failed to remove staged upload");
        }

        Ok(IntakeReport::new(
            &document,
            stage.current(),
            IntakeOutcome::Extracted {
                classification,
                extraction,
            },
        ))
    }
}

struct Stage {
    upload_id: UploadId,
    current: IntakeStage,
}

impl Stage {
    fn new(upload_id: UploadId) -> Self {
        Self {
            upload_id,
            current: IntakeStage::Idle,
        }
    }

    fn advance(&mut self, next: IntakeStage) {
        tracing::debug!(
            upload_id = %self.upload_id.as_uuid(),
            from = %self.current,
            to = %next,
            "Intake stage transition"
        );
        if next.is_terminal() {
            tracing::info!(upload_id = %self.upload_id.as_uuid(), stage = %next, "Intake finished");
        }
        self.current = next;
    }

    fn current(&self) -> IntakeStage {
        self.current
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    ClassificationFailed,
    UnmappedType {
        classification: ClassificationResult,
    },
    Extracted {
        classification: ClassificationResult,
        extraction: ExtractionResult,
    },
}

impl IntakeOutcome {
    pub fn classification(&self) -> Option<&ClassificationResult> {
        match self {
            IntakeOutcome::ClassificationFailed => None,
            IntakeOutcome::UnmappedType { classification }
            | IntakeOutcome::Extracted { classification, .. } => Some(classification),
        }
    }

    pub fn extraction(&self) -> Option<&ExtractionResult> {
        match self {
            IntakeOutcome::Extracted { extraction, .. } => Some(extraction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntakeReport {
    pub upload_id: UploadId,
    pub filename: String,
    /// Terminal stage the upload stopped in.
    pub stage: IntakeStage,
    pub outcome: IntakeOutcome,
    pub processed_at: DateTime<Utc>,
}

impl IntakeReport {
    fn new(document: &UploadedDocument, stage: IntakeStage, outcome: IntakeOutcome) -> Self {
        Self {
            upload_id: document.id,
            filename: document.filename.clone(),
            stage,
            outcome,
            processed_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("staging: {0}")]
    Staging(#[from] StagingError),
    #[error("classification: {0}")]
    Classification(#[from] ClassifierError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
}
