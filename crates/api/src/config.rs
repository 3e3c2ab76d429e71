//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (postgres storage)
//! - `BOOKING_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `BOOKING_STORAGE` - `postgres` (default) or `memory`
//! - `BOOKING_HOST` - Bind address (default: 127.0.0.1)
//! - `BOOKING_PORT` - Listen port (default: 8000)
//! - `BOOKING_BASE_URL` - Public URL (default: `http://localhost:8000`); `https://` enables secure cookies
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

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

/// Where records are persisted.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// `PostgreSQL`, reached through the given connection URL.
    Postgres(SecretString),
    /// Process-local maps; everything is lost on restart.
    Memory,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Storage backend
    pub storage: StorageBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the API
    pub base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
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

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match get_env_or_default(&lookup, "BOOKING_STORAGE", "postgres").as_str() {
            "postgres" => StorageBackend::Postgres(get_database_url(&lookup, "BOOKING_DATABASE_URL")?),
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "BOOKING_STORAGE".to_string(),
                    format!("unknown storage backend \"{other}\" (expected postgres or memory)"),
                ));
            }
        };
        let host = get_env_or_default(&lookup, "BOOKING_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKING_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(&lookup, "BOOKING_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKING_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default(&lookup, "BOOKING_BASE_URL", "http://localhost:8000");

        Ok(Self {
            storage,
            host,
            port,
            base_url,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// In-memory configuration bound to an ephemeral local port.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must only travel over HTTPS.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Get the database URL, with fallback to generic `DATABASE_URL`.
fn get_database_url(
    lookup: &impl Fn(&str) -> Option<String>,
    primary_key: &str,
) -> Result<SecretString, ConfigError> {
    lookup(primary_key)
        .or_else(|| lookup("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_require_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "BOOKING_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/booking")]).unwrap();
        match &config.storage {
            StorageBackend::Postgres(url) => {
                assert_eq!(url.expose_secret(), "postgres://localhost/booking");
            }
            StorageBackend::Memory => panic!("expected postgres storage"),
        }
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8000");
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_memory_storage_needs_no_database() {
        let config = load(&[
            ("BOOKING_STORAGE", "memory"),
            ("BOOKING_PORT", "9000"),
            ("BOOKING_BASE_URL", "https://booking.example.com"),
        ])
        .unwrap();
        assert!(matches!(config.storage, StorageBackend::Memory));
        assert_eq!(config.port, 9000);
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("BOOKING_STORAGE", "redis")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("BOOKING_STORAGE", "memory"), ("BOOKING_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
