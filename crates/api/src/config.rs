//! Process configuration read from environment variables.
//!
//! | variable                    | default        |
//! |-----------------------------|----------------|
//! | `ROSTER_BIND_ADDR`          | `0.0.0.0:8080` |
//! | `DATABASE_URL`              | unset (in-memory stores) |
//! | `ROSTER_DB_MAX_CONNECTIONS` | `5`            |
//! | `ROSTER_SEED`               | `true` in-memory, `false` with Postgres |
//! | `ROSTER_LOG_FORMAT`         | `json`         |

use std::net::SocketAddr;

use roster_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Where employee and compensation documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    /// Load the bundled employee hierarchy at startup.
    pub seed: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    /// In-memory, seeded, JSON logs.
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            backend: StoreBackend::InMemory,
            seed: true,
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = var("ROSTER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("ROSTER_BIND_ADDR", &bind_raw, e))?;

        let backend = match var("DATABASE_URL") {
            None => StoreBackend::InMemory,
            Some(database_url) => {
                let max_connections = match var("ROSTER_DB_MAX_CONNECTIONS") {
                    None => DEFAULT_MAX_CONNECTIONS,
                    Some(raw) => match raw.trim().parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        Ok(_) => {
                            return Err(ConfigError::invalid(
                                "ROSTER_DB_MAX_CONNECTIONS",
                                &raw,
                                "must be at least 1",
                            ));
                        }
                        Err(e) => {
                            return Err(ConfigError::invalid("ROSTER_DB_MAX_CONNECTIONS", &raw, e));
                        }
                    },
                };
                StoreBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
        };

        let seed = match var("ROSTER_SEED") {
            None => backend == StoreBackend::InMemory,
            Some(raw) => raw
                .trim()
                .to_ascii_lowercase()
                .parse::<bool>()
                .map_err(|e| ConfigError::invalid("ROSTER_SEED", &raw, e))?,
        };

        let log_format = match var("ROSTER_LOG_FORMAT") {
            None => LogFormat::default(),
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid("ROSTER_LOG_FORMAT", &raw, e))?,
        };

        Ok(Self {
            bind_addr,
            backend,
            seed,
            log_format,
        })
    }
}
