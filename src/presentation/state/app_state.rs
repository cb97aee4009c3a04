use std::sync::Arc;

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::application::services::DocumentIntakeService;
use crate::presentation::config::UploadSettings;

pub struct AppState<C, X>
where
    C: DocumentClassifier + ?Sized,
    X: ExtractionAgentClient + ?Sized,
{
    pub intake_service: Arc<DocumentIntakeService<C, X>>,
    pub upload: UploadSettings,
}

impl<C, X> Clone for AppState<C, X>
where
    C: DocumentClassifier + ?Sized,
    X: ExtractionAgentClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            intake_service: Arc::clone(&self.intake_service),
            upload: self.upload.clone(),
        }
    }
}
