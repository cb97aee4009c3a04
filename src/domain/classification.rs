use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRule {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub description: String,
}

impl ClassificationRule {
    pub fn new(doc_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            description: description.into(),
        }
    }
}

/// Best guess returned by the classifier for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub doc_type: String,
    pub confidence: f64,
    pub reasoning: String,
}

impl ClassificationResult {
    /// Confidence is clamped into `[0, 1]`.
    pub fn new(doc_type: impl Into<String>, confidence: f64, reasoning: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            doc_type: doc_type.into(),
            confidence,
            reasoning: reasoning.into(),
        }
    }
}

/// Parsing options the classifier applies before labelling a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    pub language: String,
    pub max_pages: u32,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            max_pages: 5,
        }
    }
}
