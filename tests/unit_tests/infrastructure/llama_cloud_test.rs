use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use docintake::application::ports::{
    AgentLookupError, ClassifierError, DocumentClassifier, ExtractionAgentClient, ExtractionError,
};
use docintake::application::services::{AgentProvisioner, ProvisioningError};
use docintake::domain::{AgentHandle, AgentName, ParsingConfig, SchemaRegistry};
use docintake::infrastructure::llama_cloud::{
    JobState, LlamaCloudClassifier, LlamaCloudClient, LlamaCloudConfig, LlamaExtractClient,
};

const API_KEY: &str = "test-key";
const PROJECT_ID: &str = "project-1";

struct Stub {
    classify_requests: Mutex<Vec<Value>>,
    created_agents: Mutex<Vec<Value>>,
    status_polls: AtomicUsize,
    job_status: &'static str,
    known_agents: Vec<&'static str>,
}

impl Stub {
    fn new(job_status: &'static str, known_agents: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            classify_requests: Mutex::new(Vec::new()),
            created_agents: Mutex::new(Vec::new()),
            status_polls: AtomicUsize::new(0),
            job_status,
            known_agents,
        })
    }
}

type Shared = State<Arc<Stub>>;

fn authorized(headers: &HeaderMap, query: &HashMap<String, String>) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"))
        && query.get("project_id").map(String::as_str) == Some(PROJECT_ID)
}

async fn upload_file(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers, &query) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "bad key"})));
    }
    (StatusCode::OK, Json(json!({"id": "file-1"})))
}

async fn submit_classify(State(stub): Shared, Json(body): Json<Value>) -> Json<Value> {
    stub.classify_requests.lock().unwrap().push(body);
    Json(json!({"id": "cls-1", "status": "PENDING"}))
}

async fn job_status(State(stub): Shared, Path(id): Path<String>) -> Json<Value> {
    // First poll reports the job as still running.
    let polls = stub.status_polls.fetch_add(1, Ordering::SeqCst);
    let status = if polls == 0 { "PENDING" } else { stub.job_status };
    Json(json!({"id": id, "status": status, "error_message": null}))
}

async fn classify_results() -> Json<Value> {
    Json(json!({
        "items": [{
            "file_id": "file-1",
            "result": {"type": "invoice", "confidence": 0.93, "reasoning": "Has invoice number"}
        }]
    }))
}

async fn agent_by_name(State(stub): Shared, Path(name): Path<String>) -> impl IntoResponse {
    if name == "broken-extractor" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"})));
    }
    if stub.known_agents.contains(&name.as_str()) {
        return (
            StatusCode::OK,
            Json(json!({"id": format!("id-{name}"), "name": name})),
        );
    }
    (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"})))
}

async fn create_agent(State(stub): Shared, Json(body): Json<Value>) -> Json<Value> {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    stub.created_agents.lock().unwrap().push(body);
    Json(json!({"id": format!("new-{name}"), "name": name}))
}

async fn submit_extract(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["file_id"], "file-1");
    Json(json!({"id": "ext-1", "status": "PENDING"}))
}

async fn extract_result() -> Json<Value> {
    Json(json!({
        "data": {"invoice_number": "INV-9", "date": "2024-03-01", "total": 99.5, "items": []}
    }))
}

async fn serve(stub: Arc<Stub>) -> Arc<LlamaCloudClient> {
    let app = Router::new()
        .route("/api/v1/files", post(upload_file))
        .route("/api/v1/classifier/jobs", post(submit_classify))
        .route("/api/v1/classifier/jobs/{id}", get(job_status))
        .route("/api/v1/classifier/jobs/{id}/results", get(classify_results))
        .route(
            "/api/v1/extraction/extraction-agents/by-name/{name}",
            get(agent_by_name),
        )
        .route("/api/v1/extraction/extraction-agents", post(create_agent))
        .route("/api/v1/extraction/jobs", post(submit_extract))
        .route("/api/v1/extraction/jobs/{id}", get(job_status))
        .route("/api/v1/extraction/jobs/{id}/result", get(extract_result))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Arc::new(
        LlamaCloudClient::new(LlamaCloudConfig {
            base_url: format!("http://{addr}/"),
            api_key: API_KEY.to_string(),
            project_id: PROJECT_ID.to_string(),
            organization_id: "org-1".to_string(),
            request_timeout: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(10),
        })
        .unwrap(),
    )
}

fn sample_pdf() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invoice.pdf");
    std::fs::write(&path, b"%PDF-1.7 sample").unwrap();
    (dir, path)
}

#[test]
fn given_remote_statuses_when_parsed_then_map_to_job_states() {
    assert_eq!(JobState::from_status("SUCCESS"), JobState::Succeeded);
    assert_eq!(JobState::from_status("completed"), JobState::Succeeded);
    assert_eq!(
        JobState::from_status("PARTIAL_SUCCESS"),
        JobState::PartiallySucceeded
    );
    assert_eq!(
        JobState::from_status("ERROR"),
        JobState::Failed("ERROR".to_string())
    );
    assert_eq!(JobState::from_status("PENDING"), JobState::Running);
}

#[test]
fn given_base_url_with_trailing_slash_when_building_url_then_single_separator() {
    let client = LlamaCloudClient::new(LlamaCloudConfig {
        base_url: "https://cloud.example/".to_string(),
        api_key: API_KEY.to_string(),
        project_id: PROJECT_ID.to_string(),
        organization_id: "org-1".to_string(),
        request_timeout: Duration::from_secs(1),
        poll_timeout: Duration::from_secs(1),
    })
    .unwrap();

    assert_eq!(
        client.url("/files"),
        "https://cloud.example/api/v1/files"
    );
}

#[tokio::test]
async fn given_pdf_when_classified_then_uploads_polls_and_returns_result() {
    let stub = Stub::new("SUCCESS", vec![]);
    let classifier = LlamaCloudClassifier::new(serve(Arc::clone(&stub)).await);
    let (_dir, path) = sample_pdf();
    let rules = SchemaRegistry::builtin().classification_rules();

    let results = classifier
        .classify(&[path.as_path()], &rules, &ParsingConfig::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let result = results[0].as_ref().unwrap();
    assert_eq!(result.doc_type, "invoice");
    assert_eq!(result.confidence, 0.93);
    assert!(stub.status_polls.load(Ordering::SeqCst) >= 2);

    let requests = stub.classify_requests.lock().unwrap();
    assert_eq!(requests[0]["file_ids"], json!(["file-1"]));
    assert_eq!(requests[0]["rules"].as_array().unwrap().len(), 6);
    assert_eq!(requests[0]["rules"][0]["type"], "invoice");
    assert_eq!(requests[0]["parsing_configuration"]["lang"], "en");
    assert_eq!(requests[0]["parsing_configuration"]["max_pages"], 5);
}

#[tokio::test]
async fn given_failed_job_when_classified_then_job_failed_error() {
    let stub = Stub::new("ERROR", vec![]);
    let classifier = LlamaCloudClassifier::new(serve(stub).await);
    let (_dir, path) = sample_pdf();

    let result = classifier
        .classify(&[path.as_path()], &[], &ParsingConfig::default())
        .await;

    assert!(matches!(result, Err(ClassifierError::JobFailed(_))));
}

#[tokio::test]
async fn given_known_agent_when_looked_up_then_returns_handle() {
    let stub = Stub::new("SUCCESS", vec!["invoice-extractor"]);
    let client = LlamaExtractClient::new(serve(stub).await);

    let handle = client
        .get_agent(&AgentName::for_type("invoice"))
        .await
        .unwrap();

    assert_eq!(handle.id, "id-invoice-extractor");
}

#[tokio::test]
async fn given_missing_agent_when_looked_up_then_not_found() {
    let client = LlamaExtractClient::new(serve(Stub::new("SUCCESS", vec![])).await);

    let result = client.get_agent(&AgentName::for_type("receipt")).await;

    assert!(matches!(result, Err(AgentLookupError::NotFound(_))));
}

#[tokio::test]
async fn given_server_error_when_looked_up_then_request_failed_not_not_found() {
    let client = LlamaExtractClient::new(serve(Stub::new("SUCCESS", vec![])).await);

    let result = client.get_agent(&AgentName::for_type("broken")).await;

    assert!(matches!(result, Err(AgentLookupError::RequestFailed(_))));
}

#[tokio::test]
async fn given_partially_provisioned_project_when_provisioning_then_creates_only_missing() {
    let stub = Stub::new("SUCCESS", vec!["invoice-extractor", "receipt-extractor"]);
    let client = Arc::new(LlamaExtractClient::new(serve(Arc::clone(&stub)).await));

    let directory = AgentProvisioner::new(client)
        .provision_all(&SchemaRegistry::builtin())
        .await
        .unwrap();

    assert_eq!(directory.len(), 10);
    assert_eq!(
        directory.for_type("invoice").unwrap().id,
        "id-invoice-extractor"
    );
    assert_eq!(
        directory.for_type("bank").unwrap().id,
        "new-bank-extractor"
    );

    let created = stub.created_agents.lock().unwrap();
    assert_eq!(created.len(), 8);
    let bank = created
        .iter()
        .find(|a| a["name"] == "bank-extractor")
        .unwrap();
    assert_eq!(bank["config"]["extraction_mode"], "BALANCED");
    assert_eq!(
        bank["data_schema"]["properties"]["transactions"]["type"],
        "array"
    );
}

#[tokio::test]
async fn given_unreachable_lookup_when_provisioning_then_create_is_never_called() {
    static BROKEN: [docintake::domain::DocumentTypeSchema; 1] =
        [docintake::domain::DocumentTypeSchema {
            name: "broken",
            title: "Broken",
            fields: &[],
            rule_description: None,
        }];
    let stub = Stub::new("SUCCESS", vec![]);
    let client = Arc::new(LlamaExtractClient::new(serve(Arc::clone(&stub)).await));

    let result = AgentProvisioner::new(client)
        .provision_all(&SchemaRegistry::from_static(&BROKEN))
        .await;

    assert!(matches!(result, Err(ProvisioningError::Lookup { .. })));
    assert!(stub.created_agents.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_agent_and_file_when_extracted_then_returns_fields_in_order() {
    let stub = Stub::new("SUCCESS", vec![]);
    let client = LlamaExtractClient::new(serve(stub).await);
    let (_dir, path) = sample_pdf();
    let agent = AgentHandle::new("agent-1", AgentName::for_type("invoice"));

    let result = client.extract(&agent, &path).await.unwrap();

    let keys: Vec<&String> = result.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, ["invoice_number", "date", "total", "items"]);
    assert_eq!(result.get("total").unwrap(), &json!(99.5));
}

#[tokio::test]
async fn given_failed_extraction_job_when_extracted_then_job_failed_error() {
    let client = LlamaExtractClient::new(serve(Stub::new("FAILED", vec![])).await);
    let (_dir, path) = sample_pdf();
    let agent = AgentHandle::new("agent-1", AgentName::for_type("invoice"));

    let result = client.extract(&agent, &path).await;

    assert!(matches!(result, Err(ExtractionError::JobFailed(_))));
}

#[tokio::test]
async fn given_missing_file_when_extracted_then_io_error() {
    let client = LlamaExtractClient::new(serve(Stub::new("SUCCESS", vec![])).await);
    let agent = AgentHandle::new("agent-1", AgentName::for_type("invoice"));

    let result = client
        .extract(&agent, std::path::Path::new("/nonexistent/upload.pdf"))
        .await;

    assert!(matches!(result, Err(ExtractionError::Io(_))));
}
