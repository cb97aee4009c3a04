use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::domain::ParsingConfig;

use super::Environment;

pub const API_KEY_ENV: &str = "LLAMA_CLOUD_API_KEY";

const DEFAULT_PROJECT_ID: &str = "42da2f89-2702-426f-b41f-0440b3858bdd";
const DEFAULT_ORGANIZATION_ID: &str = "e7103cc5-2717-4a01-abc3-f7ea6fc579b9";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llama_cloud: LlamaCloudSettings,
    pub classification: ClassificationSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct LlamaCloudSettings {
    pub api_key: String,
    pub base_url: String,
    pub project_id: String,
    pub organization_id: String,
    pub request_timeout_secs: u64,
    pub poll_timeout_secs: u64,
    pub extraction_mode: String,
}

impl LlamaCloudSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }
}

impl std::fmt::Debug for LlamaCloudSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlamaCloudSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("organization_id", &self.organization_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("extraction_mode", &self.extraction_mode)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSettings {
    pub language: String,
    pub max_pages: u32,
}

impl ClassificationSettings {
    pub fn parsing_config(&self) -> ParsingConfig {
        ParsingConfig {
            language: self.language.clone(),
            max_pages: self.max_pages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
    pub staging_dir: Option<String>,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("docintake"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.{env}`, then `APP_*` variables, then `LLAMA_CLOUD_API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let api_key = std::env::var(API_KEY_ENV).ok();
        Self::build(Self::builder(environment, api_key)?)
    }

    pub fn builder(
        environment: Environment,
        api_key: Option<String>,
    ) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8501_i64)?
            .set_default("llama_cloud.api_key", "")?
            .set_default(
                "llama_cloud.base_url",
                crate::infrastructure::llama_cloud::DEFAULT_BASE_URL,
            )?
            .set_default("llama_cloud.project_id", DEFAULT_PROJECT_ID)?
            .set_default("llama_cloud.organization_id", DEFAULT_ORGANIZATION_ID)?
            .set_default("llama_cloud.request_timeout_secs", 120_i64)?
            .set_default("llama_cloud.poll_timeout_secs", 600_i64)?
            .set_default("llama_cloud.extraction_mode", "BALANCED")?
            .set_default("classification.language", "en")?
            .set_default("classification.max_pages", 5_i64)?
            .set_default("upload.max_file_size_mb", 200_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("llama_cloud.api_key", api_key)?;

        Ok(builder)
    }

    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.llama_cloud.api_key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        if self.classification.max_pages == 0 {
            return Err(SettingsError::Invalid(
                "classification.max_pages must be at least 1".to_string(),
            ));
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(SettingsError::Invalid(
                "upload.max_file_size_mb must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("LLAMA_CLOUD_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid setting: {0}")]
    Invalid(String),
}
