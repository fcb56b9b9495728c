use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub forecast: ForecastSettings,
    pub insights: InsightSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Rejects values that would make the service unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.default_window_size == 0 {
            return Err(ConfigError::ValidationError(
                "forecast.default_window_size must be at least 1".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.server.owner_header.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.owner_header must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// The IP address to bind, e.g. `0.0.0.0` or `127.0.0.1`.
    pub host: String,
    pub port: u16,
    /// The request header carrying the authenticated owner id, set by the auth proxy.
    pub owner_header: String,
    /// Maximum accepted request body, in megabytes. Bounds CSV uploads.
    pub body_limit_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            owner_header: "x-owner-id".to_string(),
            body_limit_mb: 50,
        }
    }
}

/// Settings for the PostgreSQL connection pool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Deletes every stored record when the server starts. Off unless asked for.
    pub clear_on_start: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/salescast".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
            clear_on_start: false,
        }
    }
}

/// Settings for the moving-average forecast.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// The window used when a request does not specify one.
    pub default_window_size: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_window_size: 7,
        }
    }
}

/// Which records the sales trend is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TrendScope {
    /// Only the requesting owner's records.
    #[default]
    Owner,
    /// Every owner's records.
    Global,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InsightSettings {
    pub trend_scope: TrendScope,
}

/// Settings for log output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "salescast.log".to_string(),
        }
    }
}
