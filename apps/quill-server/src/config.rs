//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;
use crate::tls::TlsConfig;

/// Application configuration.
///
/// Built once in `main` and passed down; nothing reads the environment
/// after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// `None` serves plaintext HTTP.
    pub tls: Option<TlsConfig>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8005;

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = lookup("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.max_connections = max;
            }
            if let Some(min) = lookup("DB_MIN_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: lookup("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            database,
            tls: TlsConfig::from_lookup(&lookup),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}
