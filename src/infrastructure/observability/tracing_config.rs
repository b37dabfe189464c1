/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            json_format: false,
            default_filter: "info,dosesense=debug,tower_http=debug".to_string(),
        }
    }
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, filter: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            environment: environment.into(),
            json_format,
            default_filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(defaults.default_filter),
        }
    }
}
