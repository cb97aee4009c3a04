mod document_types;
mod documents;
mod error;
mod health;
mod upload;
mod upload_form;

pub use document_types::{DocumentTypeResponse, FieldResponse, document_types_handler};
pub use documents::{IntakeResponse, IntakeStatus, process_document_handler};
pub use error::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use upload::{UploadRejection, read_upload};
pub use upload_form::{upload_form_handler, upload_submit_handler};
