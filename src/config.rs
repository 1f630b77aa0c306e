use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub generator: GeneratorSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub lotto_draws: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    pub endpoint: String,
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_num_sets")]
    pub max_num_sets: u8,
}

fn default_generator_timeout() -> u64 { 30 }
fn default_max_num_sets() -> u8 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with LOTTO__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with LOTTO__)
            // e.g., LOTTO__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LOTTO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute environment variables in string values
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LOTTO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known environment variables into config values.
///
/// Secrets (the Appwrite key) and deploy-specific endpoints come from the
/// environment rather than the checked-in config files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let appwrite_endpoint = env::var("LOTTO_APPWRITE__ENDPOINT").ok();
    let appwrite_api_key = env::var("LOTTO_APPWRITE__API_KEY").ok();
    let appwrite_project_id = env::var("LOTTO_APPWRITE__PROJECT_ID").ok();
    let appwrite_database_id = env::var("LOTTO_APPWRITE__DATABASE_ID").ok();
    let generator_endpoint = env::var("LOTTO_GENERATOR__ENDPOINT").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }
    if let Some(endpoint) = generator_endpoint {
        builder = builder.set_override("generator.endpoint", endpoint)?;
    }

    builder.build()
}
