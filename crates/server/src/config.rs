//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERDESK_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`). Only required with the `postgres` storage backend.
//!
//! ## Optional
//! - `ORDERDESK_STORAGE` - Storage backend, `postgres` or `memory` (default: postgres)
//! - `ORDERDESK_HOST` - Bind address (default: 127.0.0.1)
//! - `ORDERDESK_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. production)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where client and order records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// `PostgreSQL` tables `clients` and `orders`.
    #[default]
    Postgres,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected 'postgres' or 'memory')"
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Server application configuration.
///
/// `SecretString` keeps the database URL out of `Debug` output.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend
    pub storage: StorageBackend,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = parse_or_default::<StorageBackend>(&lookup, "ORDERDESK_STORAGE", "postgres")?;
        let host = parse_or_default::<IpAddr>(&lookup, "ORDERDESK_HOST", "127.0.0.1")?;
        let port = parse_or_default::<u16>(&lookup, "ORDERDESK_PORT", "8080")?;

        // Prefer ORDERDESK_DATABASE_URL, fall back to the generic DATABASE_URL
        let database_url = lookup("ORDERDESK_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from);
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar(
                "ORDERDESK_DATABASE_URL".to_string(),
            ));
        }

        Ok(Self {
            storage,
            database_url,
            host,
            port,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read `key` through `lookup` (or use `default`) and parse it.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = load(&[("ORDERDESK_DATABASE_URL", "postgres://localhost/orderdesk")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://localhost/orderdesk"
        );
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://fallback/db"
        );
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "ORDERDESK_DATABASE_URL"));
    }

    #[test]
    fn test_memory_needs_no_database_url() {
        let config = load(&[("ORDERDESK_STORAGE", "memory"), ("ORDERDESK_PORT", "9000")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 9000);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("ORDERDESK_STORAGE", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDERDESK_STORAGE"));

        let err = load(&[("ORDERDESK_STORAGE", "memory"), ("ORDERDESK_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDERDESK_PORT"));

        let err = load(&[("ORDERDESK_STORAGE", "memory"), ("ORDERDESK_HOST", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORDERDESK_HOST"));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("ORDERDESK_DATABASE_URL", "postgres://user:hunter2@db/orderdesk")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_empty_sentry_dsn_is_unset() {
        let config = load(&[("ORDERDESK_STORAGE", "memory"), ("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
