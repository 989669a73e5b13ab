//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BAZAAR_DATABASE_URL` - `PostgreSQL` connection string
//! - `BAZAAR_BASE_URL` - Public URL for the site
//!
//! ## Optional
//! - `BAZAAR_HOST` - Bind address (default: 127.0.0.1)
//! - `BAZAAR_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

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

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl SiteConfig {
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

    /// Load configuration through a lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get_database_url(&lookup, "BAZAAR_DATABASE_URL")?;
        let host = get_or_default(&lookup, "BAZAAR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAZAAR_HOST".to_string(), e.to_string()))?;
        let port = get_or_default(&lookup, "BAZAAR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BAZAAR_PORT".to_string(), e.to_string()))?;
        let base_url = get_required(&lookup, "BAZAAR_BASE_URL")?;
        let sentry_dsn = lookup("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required variable through the lookup.
fn get_required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(
    lookup: &impl Fn(&str) -> Option<String>,
    primary_key: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(value) = lookup(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Some(value) = lookup("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_from_lookup_minimal() {
        let config = SiteConfig::from_lookup(env(&[
            ("BAZAAR_DATABASE_URL", "postgres://localhost/bazaar"),
            ("BAZAAR_BASE_URL", "http://localhost:3000"),
        ]))
        .unwrap();

        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_from_lookup_missing_database_url() {
        let result = SiteConfig::from_lookup(env(&[("BAZAAR_BASE_URL", "http://localhost:3000")]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_from_lookup_generic_database_url_fallback() {
        let config = SiteConfig::from_lookup(env(&[
            ("DATABASE_URL", "postgres://localhost/bazaar"),
            ("BAZAAR_BASE_URL", "http://localhost:3000"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_from_lookup_invalid_port() {
        let result = SiteConfig::from_lookup(env(&[
            ("BAZAAR_DATABASE_URL", "postgres://localhost/bazaar"),
            ("BAZAAR_BASE_URL", "http://localhost:3000"),
            ("BAZAAR_PORT", "not-a-port"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig::from_lookup(env(&[
            ("BAZAAR_DATABASE_URL", "postgres://localhost/bazaar"),
            ("BAZAAR_BASE_URL", "http://localhost:8080"),
            ("BAZAAR_HOST", "0.0.0.0"),
            ("BAZAAR_PORT", "8080"),
        ]))
        .unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }
}
