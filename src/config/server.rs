//! Process-level server configuration.

use std::env;

/// Output format for structured logs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Bind address, storage location and log format
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "events.duckdb".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "events.duckdb".to_string());

        let log_format = env::var("LOG_FORMAT")
            .map(|v| {
                if v.eq_ignore_ascii_case("json") {
                    LogFormat::Json
                } else {
                    LogFormat::Pretty
                }
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            database_path,
            log_format,
        }
    }
}
