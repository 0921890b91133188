//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `EDUMALL_API_BASE_URL` - Root of the backend API (e.g. `https://api.edumall.vn/api/`)
//!
//! ## Optional
//! - `EDUMALL_REQUEST_TIMEOUT_SECS` - Whole-request timeout (default: 30)
//! - `EDUMALL_CONNECT_TIMEOUT_SECS` - TCP/TLS connect timeout (default: 10)
//! - `EDUMALL_CACHE_TTL_SECS` - Lifetime of a cached query result (default: 300)
//! - `EDUMALL_CACHE_MAX_CAPACITY` - Maximum number of cached query results (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_MAX_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Edumall client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the backend API. Always ends with `/`.
    pub base_url: Url,
    /// Upper bound on a whole request, connect to last body byte.
    pub request_timeout: Duration,
    /// Upper bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Query cache tuning.
    pub cache: CacheConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Query cache tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a fetched result is served before it is refetched.
    pub time_to_live: Duration,
    /// Maximum number of cached results across all keys.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            time_to_live: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_capacity: DEFAULT_CACHE_MAX_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Configuration with default timeouts and cache settings.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            cache: CacheConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

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

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let raw_base_url = env.required("EDUMALL_API_BASE_URL")?;
        let base_url = Url::parse(&raw_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("EDUMALL_API_BASE_URL".to_string(), e.to_string())
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "EDUMALL_API_BASE_URL".to_string(),
                "must be a hierarchical http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url),
            request_timeout: env.seconds("EDUMALL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_timeout: env.seconds("EDUMALL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            cache: CacheConfig {
                time_to_live: env.seconds("EDUMALL_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
                max_capacity: env.number("EDUMALL_CACHE_MAX_CAPACITY", DEFAULT_CACHE_MAX_CAPACITY)?,
            },
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

/// Make sure relative endpoint paths resolve under the base path.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a numeric variable with a default value.
    fn number(&self, key: &str, default: u64) -> Result<u64, ConfigError> {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Get a positive number of seconds with a default value.
    fn seconds(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        match self.number(key, default)? {
            0 => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            )),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}
