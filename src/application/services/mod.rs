mod agent_directory;
mod agent_provisioner;
mod intake_service;

pub use agent_directory::AgentDirectory;
pub use agent_provisioner::{AgentProvisioner, ProvisioningError};
pub use intake_service::{DocumentIntakeService, IntakeError, IntakeOutcome, IntakeReport};
