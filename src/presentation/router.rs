use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentClassifier, ExtractionAgentClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    document_types_handler, health_handler, process_document_handler, upload_form_handler,
    upload_submit_handler,
};
use crate::presentation::state::AppState;

/// Multipart framing on top of the file itself. Overflow is reported by the multipart
/// extractor, so each route renders its own 413 body.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<C, X>(state: AppState<C, X>) -> Router
where
    C: DocumentClassifier + ?Sized + 'static,
    X: ExtractionAgentClient + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.upload.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES;

    let uploads = Router::new()
        .route(
            "/",
            get(upload_form_handler::<C, X>).post(upload_submit_handler::<C, X>),
        )
        .route("/api/v1/documents", post(process_document_handler::<C, X>))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(health_handler::<C, X>))
        .route(
            "/api/v1/document-types",
            get(document_types_handler::<C, X>),
        )
        .merge(uploads)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
