#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use docintake::application::ports::{
    AgentLookupError, ClassifierError, DocumentClassifier, ExtractionAgentClient, ExtractionError,
};
use docintake::domain::{
    AgentHandle, AgentName, ClassificationResult, ClassificationRule, DocumentTypeSchema,
    ExtractionResult, ParsingConfig,
};

pub fn invoice_classification() -> ClassificationResult {
    ClassificationResult::new("invoice", 0.91, "Contains invoice number and total")
}

pub fn invoice_fields() -> Map<String, Value> {
    let Value::Object(map) = json!({
        "invoice_number": "INV-001",
        "date": "2024-01-01",
        "total": 250.0,
        "items": [
            {"description": "Widget", "amount": 200.0},
            {"description": "Shipping", "amount": 50.0}
        ]
    }) else {
        unreachable!("literal is an object")
    };
    map
}

#[derive(Default)]
pub struct ClassifierCall {
    pub paths: Vec<PathBuf>,
    pub paths_existed: Vec<bool>,
    pub rules: Vec<ClassificationRule>,
    pub parsing: Option<ParsingConfig>,
}

pub struct MockClassifier {
    results: Option<Vec<Option<ClassificationResult>>>,
    pub calls: Mutex<Vec<ClassifierCall>>,
}

impl MockClassifier {
    pub fn returning(result: Option<ClassificationResult>) -> Self {
        Self {
            results: Some(vec![result]),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning_nothing() -> Self {
        Self {
            results: Some(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            results: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .flat_map(|c| c.paths.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentClassifier for MockClassifier {
    async fn classify(
        &self,
        file_paths: &[&Path],
        rules: &[ClassificationRule],
        parsing: &ParsingConfig,
    ) -> Result<Vec<Option<ClassificationResult>>, ClassifierError> {
        self.calls.lock().unwrap().push(ClassifierCall {
            paths: file_paths.iter().map(|p| p.to_path_buf()).collect(),
            paths_existed: file_paths.iter().map(|p| p.exists()).collect(),
            rules: rules.to_vec(),
            parsing: Some(parsing.clone()),
        });

        match &self.results {
            Some(results) => Ok(results.clone()),
            None => Err(ClassifierError::ApiRequestFailed(
                "connection reset".to_string(),
            )),
        }
    }
}

/// In-memory stand-in for the remote agent service. Created agents persist, so a second
/// provisioning pass finds them.
pub struct MockAgentClient {
    remote: Mutex<HashMap<AgentName, AgentHandle>>,
    lookup_failure: Option<String>,
    extraction: Option<Map<String, Value>>,
    pub get_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub extract_calls: AtomicUsize,
    pub created: Mutex<Vec<(AgentName, &'static str)>>,
    pub extracted_paths: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockAgentClient {
    pub fn empty() -> Self {
        Self {
            remote: Mutex::new(HashMap::new()),
            lookup_failure: None,
            extraction: Some(invoice_fields()),
            get_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            extract_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            extracted_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn with_existing(names: &[&str]) -> Self {
        let client = Self::empty();
        {
            let mut remote = client.remote.lock().unwrap();
            for name in names {
                let agent = AgentName::for_type(name);
                remote.insert(
                    agent.clone(),
                    AgentHandle::new(format!("existing-{name}"), agent),
                );
            }
        }
        client
    }

    pub fn unreachable() -> Self {
        Self {
            lookup_failure: Some("connection refused".to_string()),
            ..Self::empty()
        }
    }

    pub fn with_extraction(mut self, fields: Map<String, Value>) -> Self {
        self.extraction = Some(fields);
        self
    }

    pub fn failing_extraction(mut self) -> Self {
        self.extraction = None;
        self
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn extracts(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionAgentClient for MockAgentClient {
    async fn get_agent(&self, name: &AgentName) -> Result<AgentHandle, AgentLookupError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.lookup_failure {
            return Err(AgentLookupError::RequestFailed(reason.clone()));
        }
        self.remote
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| AgentLookupError::NotFound(name.to_string()))
    }

    async fn create_agent(
        &self,
        name: &AgentName,
        schema: &DocumentTypeSchema,
    ) -> Result<AgentHandle, ExtractionError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let handle = AgentHandle::new(format!("created-{}", schema.name), name.clone());
        self.remote
            .lock()
            .unwrap()
            .insert(name.clone(), handle.clone());
        self.created
            .lock()
            .unwrap()
            .push((name.clone(), schema.name));
        Ok(handle)
    }

    async fn extract(
        &self,
        _agent: &AgentHandle,
        file_path: &Path,
    ) -> Result<ExtractionResult, ExtractionError> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.extracted_paths
            .lock()
            .unwrap()
            .push((file_path.to_path_buf(), file_path.exists()));
        match &self.extraction {
            Some(fields) => Ok(ExtractionResult::new(fields.clone())),
            None => Err(ExtractionError::JobFailed("ERROR".to_string())),
        }
    }
}
