//! Environment-driven configuration, read once at startup.
use std::net::SocketAddr;

use thiserror::Error;

pub mod database;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3002;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Copy `.env.example` to `.env` and update credentials, or set it in your environment")]
    Missing(&'static str),
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    Memory,
}

/// Cross-origin policy for the dashboard client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    #[default]
    Disabled,
    Any,
    Origins(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Present whenever `storage` is `MySql`.
    pub database: Option<DatabaseConfig>,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "APP_PORT",
                value: raw,
                reason: "must be a valid u16 number",
            })?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("STORAGE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("mysql") => StorageBackend::MySql,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                    reason: "expected `mysql` or `memory`",
                });
            }
        };

        let database = match storage {
            StorageBackend::Memory => None,
            StorageBackend::MySql => {
                let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                    Some(raw) => match raw.trim().parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ConfigError::Invalid {
                                key: "DB_MAX_CONNECTIONS",
                                value: raw,
                                reason: "must be a positive integer",
                            });
                        }
                    },
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                Some(DatabaseConfig { url, max_connections })
            }
        };

        let cors = parse_cors(
            lookup("CORS_ALLOWED_ORIGINS"),
            lookup("ENABLE_CORS").map(|v| v == "true" || v == "1").unwrap_or(false),
        );

        Ok(Self {
            host,
            port,
            storage,
            database,
            cors,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "APP_HOST",
                value: self.host.clone(),
                reason: "APP_HOST:APP_PORT must form a valid socket address",
            })
    }
}

// An explicit origin list wins; "*" means any origin. ENABLE_CORS alone is permissive.
fn parse_cors(allowed: Option<String>, enabled: bool) -> CorsConfig {
    match allowed {
        Some(list) if list.trim() == "*" => CorsConfig::Any,
        Some(list) => CorsConfig::Origins(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        None if enabled => CorsConfig::Any,
        None => CorsConfig::Disabled,
    }
}
