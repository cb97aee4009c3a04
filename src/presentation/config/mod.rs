mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    API_KEY_ENV, ClassificationSettings, LlamaCloudSettings, LoggingSettings, ServerSettings,
    Settings, SettingsError, UploadSettings,
};
