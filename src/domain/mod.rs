mod agent;
mod classification;
mod document;
mod extraction;
mod intake_stage;
mod schema;
mod schema_registry;

pub use agent::{AgentHandle, AgentName};
pub use classification::{ClassificationResult, ClassificationRule, ParsingConfig};
pub use document::{ContentType, UploadId, UploadedDocument};
pub use extraction::ExtractionResult;
pub use intake_stage::IntakeStage;
pub use schema::{DocumentTypeSchema, FieldSpec, FieldType};
pub use schema_registry::SchemaRegistry;
