//! Main client implementation.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::GenAiConfig;
use crate::error::GenAiError;
use crate::observability::Observability;
use crate::services::{
    CachedContentService, CachedContentServiceImpl, ModelsService, ModelsServiceImpl, ServiceContext,
};
use crate::transport::{HttpTransport, RequestBuilder};

use super::builder::GenAiClientBuilder;
use super::traits::GenAiClient;

/// Client for the cached content and models APIs.
///
/// Services are created on first access and shared afterwards.
///
/// # Example
///
/// ```no_run
/// use integrations_genai::client::{GenAiClient, GenAiClientImpl};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GenAiClientImpl::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .build()?;
///
/// let model = client.models().get("gemini-1.0-pro-001").await?;
/// println!("{model}");
/// # Ok(())
/// # }
/// ```
pub struct GenAiClientImpl {
    config: GenAiConfig,
    context: ServiceContext,

    // Lazy-initialized services
    cached_content_service: OnceCell<Arc<dyn CachedContentService>>,
    models_service: OnceCell<Arc<dyn ModelsService>>,
}

impl GenAiClientImpl {
    /// Creates a new client builder.
    pub fn builder() -> GenAiClientBuilder {
        GenAiClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads configuration from:
    /// - `GEMINI_API_KEY` or `GOOGLE_API_KEY` (required)
    /// - `GEMINI_BASE_URL` (optional)
    /// - `GEMINI_API_VERSION` (optional)
    /// - `GEMINI_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self, GenAiError> {
        Self::new(GenAiConfig::from_env()?)
    }

    /// Creates a client from a configuration object.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        GenAiClientBuilder::from_config(config).build()
    }

    pub(super) fn from_parts(
        config: GenAiConfig,
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        observability: Observability,
    ) -> Self {
        let requests = RequestBuilder::from_config(&config, auth_manager);
        Self {
            config,
            context: ServiceContext::new(requests, transport, observability),
            cached_content_service: OnceCell::new(),
            models_service: OnceCell::new(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }
}

impl GenAiClient for GenAiClientImpl {
    fn cached_content(&self) -> Arc<dyn CachedContentService> {
        let service = self.cached_content_service.get_or_init(|| {
            Arc::new(CachedContentServiceImpl::new(self.context.clone()))
        });
        Arc::clone(service)
    }

    fn models(&self) -> Arc<dyn ModelsService> {
        let service = self
            .models_service
            .get_or_init(|| Arc::new(ModelsServiceImpl::new(self.context.clone())));
        Arc::clone(service)
    }
}

impl std::fmt::Debug for GenAiClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClientImpl")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Create a shareable client from configuration.
pub fn create_client(config: GenAiConfig) -> Result<Arc<dyn GenAiClient>, GenAiError> {
    Ok(Arc::new(GenAiClientImpl::new(config)?))
}

/// Create a shareable client from environment variables.
pub fn create_client_from_env() -> Result<Arc<dyn GenAiClient>, GenAiError> {
    create_client(GenAiConfig::from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthMethod, LogLevel, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
    use crate::mocks::{MockHttpTransport, MockTracer};
    use secrecy::SecretString;
    use serde_json::json;
    use std::time::Duration;

    fn key() -> SecretString {
        SecretString::new("test-api-key".into())
    }

    #[test]
    fn test_builder_with_api_key() {
        let client = GenAiClientBuilder::new().api_key(key()).build().unwrap();

        assert_eq!(client.config().base_url.as_str(), format!("{DEFAULT_BASE_URL}/"));
        assert_eq!(client.config().api_version, DEFAULT_API_VERSION);
        assert_eq!(client.config().timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(client.config().auth_method, AuthMethod::Header);
    }

    #[test]
    fn test_builder_custom_settings() {
        let client = GenAiClientBuilder::new()
            .api_key(key())
            .api_version("v1")
            .timeout(Duration::from_secs(60))
            .auth_method(AuthMethod::QueryParam)
            .log_level(LogLevel::Debug)
            .build()
            .unwrap();

        assert_eq!(client.config().api_version, "v1");
        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().auth_method, AuthMethod::QueryParam);
        assert_eq!(client.config().log_level, LogLevel::Debug);
    }

    #[test]
    fn test_builder_from_config() {
        let config = GenAiConfig::builder()
            .api_key(key())
            .api_version("v1")
            .build()
            .unwrap();

        let client = GenAiClientBuilder::from_config(config).build().unwrap();
        assert_eq!(client.config().api_version, "v1");
    }

    #[test]
    fn test_services_are_shared() {
        let client = GenAiClientBuilder::new()
            .api_key(key())
            .transport(Arc::new(MockHttpTransport::new()))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(&client.models(), &client.models()));
        assert!(Arc::ptr_eq(&client.cached_content(), &client.cached_content()));
    }

    #[tokio::test]
    async fn test_injected_transport_and_tracer_are_used() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, &json!({"name": "models/gemini-pro-001"}));
        let tracer = MockTracer::default();

        let client = GenAiClientBuilder::new()
            .api_key(key())
            .api_version("v1")
            .transport(Arc::clone(&transport) as Arc<dyn HttpTransport>)
            .tracer(Arc::new(tracer.clone()))
            .build()
            .unwrap();

        client.models().get("models/gemini-pro-001").await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path(), "/v1/models/gemini-pro-001");
        assert_eq!(sent.headers.get("x-goog-api-key").map(String::as_str), Some("test-api-key"));

        let spans = tracer.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "genai.models.get");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GenAiClientBuilder::new().api_key(key()).build().unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-api-key"));
    }
}
