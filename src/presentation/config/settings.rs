use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_MAX_CONCURRENT_PAGES;

use super::Environment;

/// Layered settings: `appsettings.<env>.toml`, then `APP_`-prefixed
/// environment variables with `__` between section and key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub layout: LayoutSettings,
    pub search: SearchSettings,
    pub scrape: ScrapeSettings,
    pub llm: LlmSettings,
    pub parser: ParserSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("search.default_sites")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Empty selects the in-memory repository.
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub poll_timeout_secs: u64,
    pub initial_backoff_ms: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "v4".to_string(),
            poll_timeout_secs: 300,
            initial_backoff_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub endpoint: String,
    pub subscription_key: String,
    pub custom_config_id: String,
    pub default_sites: Vec<String>,
    pub top_k: usize,
    pub timeout_secs: u64,
    pub context_sentences: usize,
    pub similarity_threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.bing.microsoft.com/v7.0/custom/search".to_string(),
            subscription_key: String::new(),
            custom_config_id: String::new(),
            default_sites: Vec::new(),
            top_k: 3,
            timeout_secs: 15,
            context_sentences: 2,
            similarity_threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    pub timeout_secs: u64,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: String,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub api_mode: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub templates_dir: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            endpoint: "http://localhost:8080/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            api_mode: "chat".to_string(),
            max_tokens: 2000,
            temperature: 0.0,
            timeout_secs: 120,
            templates_dir: "prompts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub max_concurrent_pages: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_concurrent_pages: DEFAULT_MAX_CONCURRENT_PAGES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 500,
            max_backoff_ms: 8000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: Option<String>,
    pub json: bool,
}
