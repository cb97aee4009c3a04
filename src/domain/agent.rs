use std::fmt;

const AGENT_SUFFIX: &str = "-extractor";

/// Stable remote name of the extraction agent bound to one document type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentName(String);

impl AgentName {
    pub fn for_type(doc_type: &str) -> Self {
        Self(format!("{doc_type}{AGENT_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a provisioned remote extraction agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentHandle {
    pub id: String,
    pub name: AgentName,
}

impl AgentHandle {
    pub fn new(id: impl Into<String>, name: AgentName) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}
