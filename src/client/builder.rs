//! Builder for creating client instances.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::auth::{ApiKeyAuthManager, AuthManager};
use crate::config::{AuthMethod, GenAiConfig, LogLevel};
use crate::error::{ConfigurationError, GenAiError, NetworkError};
use crate::observability::{Logger, Observability, StructuredLogger, Tracer, TracingTracer};
use crate::transport::{HttpTransport, ReqwestTransport};

use super::client::GenAiClientImpl;

const SERVICE_NAME: &str = "genai";

/// Builder for creating a [`GenAiClientImpl`].
///
/// # Example
///
/// ```no_run
/// use integrations_genai::client::GenAiClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GenAiClientBuilder::new()
///     .api_key(SecretString::new("your-api-key".into()))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GenAiClientBuilder {
    api_key: Option<SecretString>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    auth_method: Option<AuthMethod>,
    log_level: Option<LogLevel>,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
    tracer: Option<Arc<dyn Tracer>>,
}

impl GenAiClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: GenAiConfig) -> Self {
        Self {
            api_key: Some(config.api_key),
            base_url: Some(config.base_url),
            api_version: Some(config.api_version),
            timeout: Some(config.timeout),
            connect_timeout: Some(config.connect_timeout),
            auth_method: Some(config.auth_method),
            log_level: Some(config.log_level),
            ..Self::default()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL for the API.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the base URL from a string.
    pub fn base_url_str(mut self, url: &str) -> Result<Self, GenAiError> {
        self.base_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Sets the authentication method.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Sets the level of the default logger.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets a custom tracer.
    pub fn tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - API key is not provided and not found in environment variables
    /// - Invalid configuration values
    /// - Failed to create HTTP transport
    pub fn build(self) -> Result<GenAiClientImpl, GenAiError> {
        // Resolution order: explicit, GEMINI_API_KEY, GOOGLE_API_KEY
        let api_key = self
            .api_key
            .or_else(|| {
                std::env::var("GEMINI_API_KEY")
                    .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                    .ok()
                    .map(SecretString::new)
            })
            .ok_or(ConfigurationError::MissingApiKey)?;

        let mut config = GenAiConfig::builder().api_key(api_key);
        if let Some(url) = &self.base_url {
            config = config.base_url(url.as_str())?;
        }
        if let Some(version) = &self.api_version {
            config = config.api_version(version);
        }
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            config = config.connect_timeout(timeout);
        }
        if let Some(method) = self.auth_method {
            config = config.auth_method(method);
        }
        if let Some(level) = self.log_level {
            config = config.log_level(level);
        }
        let config = config.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::from_config(&config).map_err(|e| {
                    GenAiError::Network(NetworkError::ConnectionFailed {
                        message: format!("Failed to create HTTP transport: {e}"),
                    })
                })?,
            ),
        };

        let auth_manager: Arc<dyn AuthManager> = Arc::new(ApiKeyAuthManager::from_config(&config));

        let observability = Observability {
            logger: self.logger.unwrap_or_else(|| {
                Arc::new(StructuredLogger::new(SERVICE_NAME).with_level(config.log_level))
            }),
            tracer: self
                .tracer
                .unwrap_or_else(|| Arc::new(TracingTracer::new(SERVICE_NAME))),
        };

        observability.logger.info(
            "GenAI client initialized",
            serde_json::json!({
                "base_url": config.base_url.as_str(),
                "api_version": config.api_version,
                "auth_method": format!("{:?}", config.auth_method),
            }),
        );

        Ok(GenAiClientImpl::from_parts(config, transport, auth_manager, observability))
    }
}
