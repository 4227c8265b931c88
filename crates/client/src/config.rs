//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TOMATO_MALL_API_URL` - Backend base URL (default: `http://localhost:8080`)
//! - `TOMATO_MALL_LOGIN_PATH` - View to navigate to when the session is rejected (default: `/login`)
//! - `TOMATO_MALL_TIMEOUT_SECS` - Overall per-request timeout in seconds (default: none)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::routes::LOGIN_PATH;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Client view path the redirect guard navigates to on a 401.
    pub login_path: String,
    /// Overall request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            login_path: LOGIN_PATH.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with default settings otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url("TOMATO_MALL_API_URL", base_url)?,
            ..Self::default()
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("TOMATO_MALL_API_URL")
            .map_or_else(|| Ok(DEFAULT_API_URL.to_string()), |raw| {
                validate_base_url("TOMATO_MALL_API_URL", &raw)
            })?;

        let login_path = lookup("TOMATO_MALL_LOGIN_PATH").unwrap_or_else(|| LOGIN_PATH.to_string());
        if !login_path.starts_with('/') {
            return Err(ConfigError::InvalidEnvVar(
                "TOMATO_MALL_LOGIN_PATH".to_string(),
                format!("must start with '/' (got {login_path:?})"),
            ));
        }

        let timeout = lookup("TOMATO_MALL_TIMEOUT_SECS")
            .map(|raw| parse_timeout("TOMATO_MALL_TIMEOUT_SECS", &raw))
            .transpose()?;

        Ok(Self {
            base_url,
            login_path,
            timeout,
        })
    }

    /// Absolute URL for an API path such as `/api/products`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and normalize a base URL (scheme must be http or https).
fn validate_base_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Parse a positive number of seconds.
fn parse_timeout(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ClientConfig::from_vars(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.login_path, "/login");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let config =
            ClientConfig::from_vars(lookup(&[("TOMATO_MALL_API_URL", "https://mall.example.com/")]))
                .unwrap();
        assert_eq!(config.base_url, "https://mall.example.com");
        assert_eq!(
            config.endpoint("/api/products"),
            "https://mall.example.com/api/products"
        );
    }

    #[test]
    fn test_base_url_with_prefix_is_kept() {
        let config = ClientConfig::new("http://gateway.local/mall").unwrap();
        assert_eq!(config.endpoint("/api/cart"), "http://gateway.local/mall/api/cart");
        assert_eq!(config.endpoint("api/cart"), "http://gateway.local/mall/api/cart");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::from_vars(lookup(&[("TOMATO_MALL_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TOMATO_MALL_API_URL"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = ClientConfig::new("ftp://mall.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_login_path_must_be_absolute() {
        let err = ClientConfig::from_vars(lookup(&[("TOMATO_MALL_LOGIN_PATH", "login")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_timeout_parsing() {
        let config =
            ClientConfig::from_vars(lookup(&[("TOMATO_MALL_TIMEOUT_SECS", "15")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        assert!(ClientConfig::from_vars(lookup(&[("TOMATO_MALL_TIMEOUT_SECS", "0")])).is_err());
        assert!(ClientConfig::from_vars(lookup(&[("TOMATO_MALL_TIMEOUT_SECS", "soon")])).is_err());
    }
}
