//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_UPLOADS_DIR` - Directory holding product images (default: public/uploads)
//! - `ASSET_MAX_BYTES` - Largest accepted image upload in bytes (default: 5 MiB)
//! - `SHOP_CORS_ORIGINS` - Comma-separated allowed origins (default: any origin)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default directory for uploaded product images.
pub const DEFAULT_UPLOADS_DIR: &str = "public/uploads";

/// Default maximum upload size (5 MiB).
pub const DEFAULT_ASSET_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines for local development.
    #[default]
    Text,
    /// One JSON object per event for log collectors.
    Json,
}

/// Image asset storage configuration.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory uploaded images are written to and served from
    pub dir: PathBuf,
    /// Largest accepted upload in bytes
    pub max_bytes: usize,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            max_bytes: DEFAULT_ASSET_MAX_BYTES,
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Image asset storage
    pub assets: AssetConfig,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
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

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let database_url = env
            .get("SHOP_DATABASE_URL")
            .or_else(|| env.get("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOP_DATABASE_URL".to_string()))?;
        let host = env.parse_or("SHOP_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("SHOP_PORT", 3000_u16)?;

        let assets = AssetConfig {
            dir: env
                .get("SHOP_UPLOADS_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR), PathBuf::from),
            max_bytes: env.parse_or("ASSET_MAX_BYTES", DEFAULT_ASSET_MAX_BYTES)?,
        };
        if assets.max_bytes == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ASSET_MAX_BYTES".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let cors_origins = env
            .get("SHOP_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        // Fly.io log shipping expects JSON unless told otherwise.
        let log_format = match env.get("LOG_FORMAT").as_deref() {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(_) => LogFormat::Text,
            None if env.get("FLY_APP_NAME").is_some() => LogFormat::Json,
            None => LogFormat::Text,
        };

        Ok(Self {
            database_url,
            host,
            port,
            assets,
            cors_origins,
            log_format,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env
                .get("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: env
                .get("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source wrapper; empty values count as unset.
struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
