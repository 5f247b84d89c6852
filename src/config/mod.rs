//! Configuration types for the generative AI client.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;
use crate::error::{GenAiError, ConfigurationError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Authentication method for API key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use x-goog-api-key header (recommended).
    #[default]
    Header,
    /// Use ?key= query parameter.
    QueryParam,
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
    /// Trace level - very detailed information.
    Trace,
}

/// Configuration for the client.
#[derive(Clone)]
pub struct GenAiConfig {
    /// API key (required).
    pub api_key: SecretString,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Default timeout for requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Log level.
    pub log_level: LogLevel,
    /// Authentication method.
    pub auth_method: AuthMethod,
}

impl GenAiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GenAiConfigBuilder {
        GenAiConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` (falling back to `GOOGLE_API_KEY`),
    /// `GEMINI_BASE_URL`, `GEMINI_API_VERSION` and `GEMINI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ConfigurationError::MissingApiKey)?;

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let api_version = std::env::var("GEMINI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Self::builder()
            .api_key(SecretString::new(api_key))
            .base_url(&base_url)?
            .api_version(&api_version)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
    }
}

impl std::fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

/// Builder for GenAiConfig.
#[derive(Default)]
pub struct GenAiConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    auth_method: Option<AuthMethod>,
}

impl GenAiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, GenAiError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<GenAiConfig, GenAiError> {
        let api_key = self.api_key.ok_or(ConfigurationError::MissingApiKey)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let api_version = self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "api_version must not be empty".to_string(),
            }
            .into());
        }

        Ok(GenAiConfig {
            api_key,
            base_url,
            api_version,
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            log_level: self.log_level.unwrap_or_default(),
            auth_method: self.auth_method.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenAiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .build()
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://generativelanguage.googleapis.com/");
        assert_eq!(config.api_version, "v1beta");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.auth_method, AuthMethod::Header);
    }

    #[test]
    fn test_custom_config() {
        let config = GenAiConfig::builder()
            .api_key(SecretString::new("test-key".into()))
            .api_version("v1")
            .timeout(Duration::from_secs(60))
            .auth_method(AuthMethod::QueryParam)
            .build()
            .unwrap();

        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.auth_method, AuthMethod::QueryParam);
    }

    #[test]
    fn test_missing_api_key() {
        let result = GenAiConfig::builder().build();
        assert!(matches!(
            result,
            Err(GenAiError::Configuration(ConfigurationError::MissingApiKey))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GenAiConfig::builder().base_url("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GenAiConfig::builder()
            .api_key(SecretString::new("super-secret".into()))
            .build()
            .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
