//! Runtime configuration read from environment variables (a `.env` file is
//! honoured by the server binary through `dotenvy`).

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_APPLICATION_NAME: &str = "larisChatbotAssistantApp";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
    /// Prefix of the `X-<app>-alert` headers and of alert message keys.
    pub application_name: String,
    /// Create missing tables on startup.
    pub run_migrations: bool,
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "postgres://localhost/movies".into(),
            bind_addr: "0.0.0.0:8080".into(),
            max_connections: 5,
            request_timeout: Duration::from_secs(30),
            application_name: DEFAULT_APPLICATION_NAME.into(),
            run_migrations: false,
            body_limit: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();
        if let Some(v) = lookup("DATABASE_URL") {
            config.database_url = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            config.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("APPLICATION_NAME") {
            config.application_name = v;
        }
        if let Some(v) = lookup("RUN_MIGRATIONS") {
            config.run_migrations = parse_bool("RUN_MIGRATIONS", &v)?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            config.body_limit = parse("BODY_LIMIT_BYTES", &v)?;
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
