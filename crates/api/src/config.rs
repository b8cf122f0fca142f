//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FOODGRAM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `FOODGRAM_HOST` - Bind address (default: 127.0.0.1)
//! - `FOODGRAM_PORT` - Listen port (default: 8000)
//! - `FOODGRAM_BASE_URL` - Public URL (default: <http://localhost:8000>); `https://` enables secure cookies
//! - `FOODGRAM_FONT_PATH` - TrueType font embedded into shopping list PDFs
//!   (default: the bundled DejaVu Sans face)
//! - `FOODGRAM_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use crate::services::shopping_list::FontSource;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
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
    /// Public base URL
    pub base_url: String,
    /// Typeface used for shopping list documents
    pub font: FontSource,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when absent
    pub dsn: Option<String>,
    /// Environment tag attached to events
    pub environment: Option<String>,
    /// Fraction of error events sent
    pub sample_rate: f32,
    /// Fraction of transactions sent
    pub traces_sample_rate: f32,
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
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let database_url = vars
            .get("FOODGRAM_DATABASE_URL")
            .or_else(|| vars.get("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("FOODGRAM_DATABASE_URL".to_string()))?;

        let host = vars.parse_or("FOODGRAM_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = vars.parse_or("FOODGRAM_PORT", 8000_u16)?;
        let base_url = vars
            .get("FOODGRAM_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let font = vars
            .get("FOODGRAM_FONT_PATH")
            .map_or(FontSource::Embedded, |path| {
                FontSource::File(PathBuf::from(path))
            });

        let log_json = vars
            .get("FOODGRAM_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let sentry = SentryConfig {
            dsn: vars.get("SENTRY_DSN"),
            environment: vars.get("SENTRY_ENVIRONMENT"),
            sample_rate: vars.rate_or("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: vars.rate_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            font,
            log_json,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup with typed accessors.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }

    /// Parse a sampling rate that must lie in `0.0..=1.0`.
    fn rate_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        let rate = self.parse_or(key, default)?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {rate})"),
            ))
        }
    }
}
