//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BRAMBLEFIG_API_BASE_URL` - Shop backend base URL
//!   (default: `http://127.0.0.1:8000/api`)
//! - `BRAMBLEFIG_STATE_DIR` - Directory for the persisted state mirror
//!   (default: `.bramblefig` under the user's home directory, falling back
//!   to the working directory)
//! - `BRAMBLEFIG_HTTP_TIMEOUT_SECS` - Request timeout in seconds
//!   (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const STATE_DIR_NAME: &str = ".bramblefig";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Shop backend base URL. Always ends with a trailing slash so that
    /// relative endpoint paths join underneath it.
    pub api_base_url: Url,
    /// Directory holding the persisted state mirror.
    pub state_dir: PathBuf,
    /// Timeout applied to every outgoing request.
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_env_or_default(
            "BRAMBLEFIG_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))?;

        let state_dir = get_optional_env("BRAMBLEFIG_STATE_DIR")
            .map_or_else(default_state_dir, PathBuf::from);

        let timeout_secs = get_env_or_default(
            "BRAMBLEFIG_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("BRAMBLEFIG_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            state_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, normalizing the base URL.
    ///
    /// Used by tests and by callers that manage their own settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base_url` is not a valid URL.
    pub fn new(api_base_url: &str, state_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            state_dir: state_dir.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }
}

/// Parse and normalize the API base URL.
///
/// A trailing slash is required for `Url::join` to treat the final path
/// segment as a directory, so one is appended when missing.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("BRAMBLEFIG_API_BASE_URL".to_owned(), e.to_string()))
}

/// Default state directory: `$HOME/.bramblefig`, or `./.bramblefig` when no
/// home directory is available.
fn default_state_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(STATE_DIR_NAME)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/");

        // Joining a relative path keeps the /api prefix
        let joined = url.join("products/").unwrap();
        assert_eq!(joined.as_str(), "http://127.0.0.1:8000/api/products/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("http://shop.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "http://shop.example.com/api/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_config_new_defaults_timeout() {
        let config = ClientConfig::new("http://localhost:8000/api", "/tmp/state").unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/state"));
    }
}
