use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DatabaseSettings, ForecastSettings, InsightSettings, LoggingSettings, ServerSettings,
    TrendScope,
};

/// The prefix for environment overrides, e.g. `SALESCAST__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "SALESCAST";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at `path`
/// (optional), `SALESCAST__*` environment variables, and finally `DATABASE_URL`
/// for the database connection string. The result is validated before it is
/// returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.forecast.default_window_size, 7);
        assert_eq!(config.insights.trend_scope, TrendScope::Owner);
        assert!(!config.database.clear_on_start);
        assert_eq!(config.server.owner_header, "x-owner-id");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[forecast]\ndefault_window_size = 3\n\n[insights]\ntrend_scope = \"global\"\n\n[server]\nport = 8080"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.forecast.default_window_size, 3);
        assert_eq!(config.insights.trend_scope, TrendScope::Global);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[forecast]\ndefault_window_size = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
