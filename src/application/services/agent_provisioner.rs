use std::sync::Arc;

use crate::application::ports::{AgentLookupError, ExtractionAgentClient, ExtractionError};
use crate::domain::{AgentHandle, AgentName, DocumentTypeSchema, SchemaRegistry};

use super::AgentDirectory;

pub struct AgentProvisioner<X>
where
    X: ExtractionAgentClient + ?Sized,
{
    client: Arc<X>,
}

impl<X> AgentProvisioner<X>
where
    X: ExtractionAgentClient + ?Sized,
{
    pub fn new(client: Arc<X>) -> Self {
        Self { client }
    }

    /// Fetches the agent by name and creates it only when the remote service reports it
    /// missing. Lookup failures of any other kind are returned untouched.
    #[tracing::instrument(skip(self, schema), fields(agent = %name))]
    pub async fn ensure_agent(
        &self,
        name: &AgentName,
        schema: &DocumentTypeSchema,
    ) -> Result<AgentHandle, ProvisioningError> {
        match self.client.get_agent(name).await {
            Ok(handle) => {
                tracing::debug!(agent_id = %handle.id, "Reusing existing extraction agent");
                Ok(handle)
            }
            Err(AgentLookupError::NotFound(_)) => {
                tracing::info!(fields = schema.fields.len(), "Creating extraction agent");
                let handle = self
                    .client
                    .create_agent(name, schema)
                    .await
                    .map_err(|source| ProvisioningError::Create {
                        agent: name.to_string(),
                        source,
                    })?;
                tracing::info!(agent_id = %handle.id, "Extraction agent created");
                Ok(handle)
            }
            Err(source) => {
                tracing::error!(error = %source, "Extraction agent lookup failed");
                Err(ProvisioningError::Lookup {
                    agent: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Ensures one agent per registered schema, in registry order. Stops at the first error.
    pub async fn provision_all(
        &self,
        registry: &SchemaRegistry,
    ) -> Result<AgentDirectory, ProvisioningError> {
        let mut handles = Vec::with_capacity(registry.len());
        for schema in registry.all() {
            let name = AgentName::for_type(schema.name);
            handles.push(self.ensure_agent(&name, schema).await?);
        }

        let directory = AgentDirectory::from_handles(handles);
        tracing::info!(
            agents = directory.len(),
            names = ?directory.names().map(AgentName::as_str).collect::<Vec<_>>(),
            "Extraction agents provisioned"
        );
        Ok(directory)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("looking up agent {agent}: {source}")]
    Lookup {
        agent: String,
        #[source]
        source: AgentLookupError,
    },
    #[error("creating agent {agent}: {source}")]
    Create {
        agent: String,
        #[source]
        source: ExtractionError,
    },
}
