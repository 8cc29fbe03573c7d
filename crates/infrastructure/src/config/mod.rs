//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite connection settings
//! - `logging`: tracing subscriber settings
//!
//! Nothing is hard-coded: defaults are overridden by an optional TOML file
//! and then by `JOBPORTAL_`-prefixed environment variables, using `__` to
//! separate nested keys (e.g. `JOBPORTAL_DATABASE__URL`).

mod database;
mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use database::{DatabaseConfig, DatabaseLocation};
pub use logging::{LogFormat, LoggingConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "JOBPORTAL";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `jobportal.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (required when given) and
    /// environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("jobportal").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file_source)
            // Override with environment variables (e.g., JOBPORTAL_DATABASE__URL)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.database.url, "sqlite://job_portal.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"database":{"url":"sqlite::memory:","max_connections":1},"logging":{"format":"json"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite://data/portal.db\"\nenforce_foreign_keys = false\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.database.url, "sqlite://data/portal.db");
        assert!(!config.database.enforce_foreign_keys);
        assert!(config.database.initialize_schema);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn load_from_missing_file_fails() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/jobportal.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn log_format_serialization() {
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), "\"json\"");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn config_has_debug_impl() {
        let debug = format!("{:?}", AppConfig::default());
        assert!(debug.contains("AppConfig"));
        assert!(debug.contains("database"));
    }
}
