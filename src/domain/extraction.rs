use serde::Serialize;
use serde_json::{Map, Value};

/// Field map returned by an extraction agent, in the order the remote service produced it.
/// Not validated against the schema the agent was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult(Map<String, Value>);

impl ExtractionResult {
    pub fn new(data: Map<String, Value>) -> Self {
        Self(data)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ExtractionResult {
    fn from(data: Map<String, Value>) -> Self {
        Self(data)
    }
}
