use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docintake::application::services::{AgentProvisioner, DocumentIntakeService};
use docintake::domain::SchemaRegistry;
use docintake::infrastructure::llama_cloud::{
    ExtractConfig, LlamaCloudClassifier, LlamaCloudClient, LlamaCloudConfig, LlamaExtractClient,
};
use docintake::infrastructure::observability::{TracingConfig, init_tracing, redact_secret};
use docintake::infrastructure::storage::TempFileStaging;
use docintake::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_level(
        environment.as_str(),
        &settings.logging.level,
        settings.logging.enable_json,
    ));

    tracing::info!(
        environment = %environment,
        base_url = %settings.llama_cloud.base_url,
        project_id = %settings.llama_cloud.project_id,
        api_key = %redact_secret(&settings.llama_cloud.api_key),
        "Configuration loaded"
    );

    let cloud = Arc::new(LlamaCloudClient::new(LlamaCloudConfig {
        base_url: settings.llama_cloud.base_url.clone(),
        api_key: settings.llama_cloud.api_key.clone(),
        project_id: settings.llama_cloud.project_id.clone(),
        organization_id: settings.llama_cloud.organization_id.clone(),
        request_timeout: settings.llama_cloud.request_timeout(),
        poll_timeout: settings.llama_cloud.poll_timeout(),
    })?);

    let classifier = Arc::new(LlamaCloudClassifier::new(Arc::clone(&cloud)));
    let extract_client = Arc::new(LlamaExtractClient::with_config(
        Arc::clone(&cloud),
        ExtractConfig {
            extraction_mode: settings.llama_cloud.extraction_mode.clone(),
        },
    ));

    let registry = SchemaRegistry::builtin();
    tracing::info!(schemas = registry.len(), "Provisioning extraction agents");
    let agents = AgentProvisioner::new(Arc::clone(&extract_client))
        .provision_all(&registry)
        .await
        .context("Failed to provision extraction agents")?;

    let staging = Arc::new(TempFileStaging::new(settings.upload.staging_dir())?);

    let intake_service = Arc::new(DocumentIntakeService::new(
        classifier,
        extract_client,
        staging,
        Arc::new(agents),
        registry,
        settings.classification.parsing_config(),
    ));

    let state = AppState {
        intake_service,
        upload: settings.upload.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
