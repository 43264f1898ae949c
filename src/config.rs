use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level ingestion configuration
#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Relational store settings
    pub database: DatabaseConfig,
    /// Generative service settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Connection settings for the relational store
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    pub url: String,
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long an operation may wait for a connection before it counts as
    /// a persistence failure, in seconds
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// Settings for the OpenAI-backed recipe generator
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key (can also be set via the OPENAI_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint (for proxy or test endpoints)
    pub base_url: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

impl IngestConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__DATABASE__URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested keys: RECIPE__GENERATOR__API_KEY
            .add_source(
                Environment::with_prefix("RECIPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
