//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Overdue sweep job configuration.
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Overdue sweep job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Whether the periodic sweep job runs at all.
    #[serde(default = "default_sweep_enabled")]
    pub enabled: bool,
    /// Seconds between sweep runs.
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_sweep_enabled(),
            interval_secs: default_sweep_interval(),
        }
    }
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    86_400 // once a day
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FLUXO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
