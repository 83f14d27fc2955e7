//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with a
//! fallback name and typed defaults, plus the server/database settings
//! used when the binary runs without a subcommand.

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;
/// Default database URL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/servicepulse.db";
/// Default maximum number of pooled database connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Get an environment variable with fallback to a secondary name
///
/// If the primary variable is set, returns its value. Otherwise the
/// fallback variable is consulted.
///
/// # Example
/// ```
/// use servicepulse::config::get_env_with_fallback;
///
/// let filter = get_env_with_fallback("SERVICEPULSE_LOG_LEVEL", "RUST_LOG");
/// ```
pub fn get_env_with_fallback(name: &str, fallback: &str) -> Option<String> {
    std::env::var(name).ok().or_else(|| std::env::var(fallback).ok())
}

/// Get an environment variable or a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// Unset or unparsable values fall back to `default`; unparsable values
/// are logged.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid value for {}: {:?}", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

/// Get a boolean flag from the environment (`true/1/yes/on`)
pub fn get_env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Seed development data on startup
    pub seed: bool,
}

impl ServerConfig {
    /// Load server settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: get_env_or("SERVICEPULSE_HOST", DEFAULT_HOST),
            port: get_env_parse("SERVICEPULSE_PORT", DEFAULT_PORT),
            seed: get_env_flag("SERVICEPULSE_SEED"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite database URL
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: get_env_or("SERVICEPULSE_DATABASE_URL", DEFAULT_DATABASE_URL),
            max_connections: get_env_parse(
                "SERVICEPULSE_DB_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            ),
        }
    }
}
