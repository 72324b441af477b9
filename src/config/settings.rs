//! Process settings from environment variables (`.env` honored via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Schema holding `products` and `admins`. A plain identifier.
    pub schema: String,
    /// Create the target database at startup if it is missing.
    pub create_database: bool,
    pub max_body_bytes: usize,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr: SocketAddr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), Some(DEFAULT_MAX_CONNECTIONS))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                message: "must be at least 1".into(),
            });
        }
        let acquire_secs: u64 = parse_or(
            "DB_ACQUIRE_TIMEOUT_SECS",
            get("DB_ACQUIRE_TIMEOUT_SECS"),
            Some(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        )?;
        let schema = get("WAREHOUSE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                var: "WAREHOUSE_SCHEMA",
                message: format!("'{}' is not a valid identifier", schema),
            });
        }
        let create_database = parse_or("CREATE_DATABASE", get("CREATE_DATABASE"), Some(false))?;
        let max_body_bytes = parse_or("MAX_BODY_BYTES", get("MAX_BODY_BYTES"), Some(DEFAULT_MAX_BODY_BYTES))?;

        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
            schema,
            create_database,
            max_body_bytes,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Missing(var)),
    }
}

/// Lowercase PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
