/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_level(environment: &str, level: &str, json_format: bool) -> Self {
        Self {
            environment: environment.to_string(),
            json_format,
            default_filter: format!("{level},docintake=debug,tower_http=debug"),
        }
    }
}
