//! # Configuration Settings
//!
//! Defines the configuration structure for the Learngate auth service.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Development-only token signing secret, used when no secret is configured
/// outside production. Production startup fails fast instead of falling back.
const DEV_FALLBACK_TOKEN_SECRET: &str = "learngate-development-secret-do-not-deploy";

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,

    /// Server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[validate(nested)]
    pub auth: AuthConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Values are read from `LEARNGATE_<SECTION>__<FIELD>` variables (e.g.
    /// `LEARNGATE_SERVER__PORT`, `LEARNGATE_AUTH__SECRET`). `DATABASE_URL`
    /// is honored as a conventional override for the database URL.
    pub fn from_env() -> Result<Self> {
        let raw = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("LEARNGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: AppConfig = raw.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.database.url = url;
        }

        Ok(cfg)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        // Use validator crate for basic validation
        Validate::validate(self).map_err(Error::from)?;

        // Custom validation logic
        self.validate_custom()?;

        Ok(())
    }

    /// Custom validation logic that goes beyond what the validator crate can do
    fn validate_custom(&self) -> Result<()> {
        if !self.database.url.starts_with("sqlite://") {
            return Err(Error::validation("Database URL must start with 'sqlite://'"));
        }

        // The token secret has no silent default in production: startup fails
        // fast rather than signing sessions with a known value.
        if self.environment.is_production() && self.auth.secret.len() < 32 {
            return Err(Error::validation(
                "LEARNGATE_AUTH__SECRET must be set to at least 32 bytes in production",
            ));
        }

        if self.auth.access_ttl_seconds >= self.auth.refresh_ttl_seconds {
            return Err(Error::validation(
                "Access token lifetime must be shorter than refresh token lifetime",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, max = 65535, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[validate(range(max = 50, message = "Min connections must be at most 50"))]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds (0 = no timeout)
    pub idle_timeout_seconds: u64,

    /// Enable automatic migrations
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/learngate.db".to_string(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600,
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Get idle timeout as Duration (None if 0)
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_seconds))
        }
    }
}

/// Authentication and token configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthConfig {
    /// Token signing secret. Required (>= 32 bytes) in production.
    pub secret: String,

    /// Issuer claim stamped into every token
    #[validate(length(min = 1, message = "Issuer cannot be empty"))]
    pub issuer: String,

    /// Audience claim stamped into every token
    #[validate(length(min = 1, message = "Audience cannot be empty"))]
    pub audience: String,

    /// Access token lifetime in seconds (default 30 days)
    #[validate(range(min = 60, message = "Access token lifetime must be at least 60 seconds"))]
    pub access_ttl_seconds: i64,

    /// Refresh token lifetime in seconds (default 90 days)
    #[validate(range(min = 60, message = "Refresh token lifetime must be at least 60 seconds"))]
    pub refresh_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "learngate".to_string(),
            audience: "learngate-platform".to_string(),
            access_ttl_seconds: 30 * 24 * 60 * 60,
            refresh_ttl_seconds: 90 * 24 * 60 * 60,
        }
    }
}

impl AuthConfig {
    /// Resolve the signing secret for the given environment.
    ///
    /// Outside production an unset secret falls back to a development-only
    /// value with a warning; production is rejected by [`AppConfig::validate`]
    /// before this is reached.
    pub fn token_secret(&self, environment: Environment) -> Vec<u8> {
        if self.secret.is_empty() && !environment.is_production() {
            tracing::warn!(
                "No token secret configured; using the development fallback. \
                 Set LEARNGATE_AUTH__SECRET before deploying."
            );
            return DEV_FALLBACK_TOKEN_SECRET.as_bytes().to_vec();
        }
        self.secret.as_bytes().to_vec()
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}
