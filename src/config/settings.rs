use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::format::FormatOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub formatter: FormatOptions,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Required `X-API-Key` value for `/api/v1` (unset = open)
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Evict documents idle for longer than this many seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    /// Eviction task interval in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
    /// Maximum number of documents held in memory
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

/// Longest accepted idle timeout: 100 years
const MAX_IDLE_TIMEOUT_SECS: u64 = 100 * 365 * 24 * 60 * 60;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_idle_timeout() -> u64 {
    3600 // 1 hour
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

fn default_max_documents() -> usize {
    10_000
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.body_limit", default_body_limit() as i64)?
            .set_default("session.idle_timeout", default_idle_timeout() as i64)?
            .set_default("session.cleanup_interval", default_cleanup_interval() as i64)?
            .set_default("session.max_documents", default_max_documents() as i64)?
            .set_default("formatter.escape_html", false)?
            .set_default("log.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // LETTER_SERVER__PORT, LETTER_API__KEY, LETTER_SESSION__IDLE_TIMEOUT, etc.
            // Field names contain `_`, so sections are split on `__`
            .add_source(
                Environment::with_prefix("LETTER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject session timings the cleanup task cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = &self.session;
        if session.idle_timeout == 0 || session.idle_timeout > MAX_IDLE_TIMEOUT_SECS {
            return Err(ConfigError::Message(format!(
                "session.idle_timeout must be between 1 and {} seconds, got {}",
                MAX_IDLE_TIMEOUT_SECS, session.idle_timeout
            )));
        }
        if session.cleanup_interval == 0 {
            return Err(ConfigError::Message(
                "session.cleanup_interval must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            body_limit: default_body_limit(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: default_idle_timeout(),
            cleanup_interval: default_cleanup_interval(),
            max_documents: default_max_documents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let session = SessionConfig::default();
        assert_eq!(session.idle_timeout, 3600);
        assert_eq!(session.max_documents, 10_000);

        let settings = Settings::default();
        assert!(!settings.formatter.escape_html);
        assert!(settings.api.key.is_none());
        assert_eq!(settings.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let settings: Settings = Config::builder()
            .set_default("server.port", 9000)
            .unwrap()
            .set_default("formatter.escape_html", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert!(settings.formatter.escape_html);
        assert_eq!(settings.session.cleanup_interval, 300);
    }

    #[test]
    fn test_validate_session_timings() {
        assert!(Settings::default().validate().is_ok());

        let mut settings = Settings::default();
        settings.session.idle_timeout = u64::MAX;
        assert!(settings.validate().is_err());

        settings.session.idle_timeout = 0;
        assert!(settings.validate().is_err());

        settings.session.idle_timeout = MAX_IDLE_TIMEOUT_SECS;
        assert!(settings.validate().is_ok());

        settings.session.cleanup_interval = 0;
        assert!(settings.validate().is_err());
    }
}
