use std::collections::BTreeMap;

use crate::domain::{AgentHandle, AgentName};

/// Provisioned extraction agents keyed by name. Built once at startup and read-only after.
#[derive(Debug, Clone, Default)]
pub struct AgentDirectory {
    agents: BTreeMap<AgentName, AgentHandle>,
}

impl AgentDirectory {
    pub fn from_handles(handles: impl IntoIterator<Item = AgentHandle>) -> Self {
        let agents = handles
            .into_iter()
            .map(|handle| (handle.name.clone(), handle))
            .collect();
        Self { agents }
    }

    pub fn get(&self, name: &AgentName) -> Option<&AgentHandle> {
        self.agents.get(name)
    }

    pub fn for_type(&self, doc_type: &str) -> Option<&AgentHandle> {
        self.get(&AgentName::for_type(doc_type))
    }

    pub fn contains(&self, name: &AgentName) -> bool {
        self.agents.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &AgentName> {
        self.agents.keys()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
