//! # Gemini cached content and models client
//!
//! Resource-oriented access to two corners of the Gemini
//! `generativelanguage` REST API:
//!
//! - **Cached content**: create, get, list, update (TTL or expiry), and
//!   delete server-side context caches.
//! - **Models**: read-only model metadata.
//!
//! Every operation is one HTTP request. Nothing is retried or cached
//! locally; the "cache" is a server resource addressed by name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_genai::caching::{CachedContents, CreateCachedContentOptions};
//! use integrations_genai::{create_client, GenAiConfig};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GenAiConfig::builder()
//!         .api_key(SecretString::new("your-api-key".into()))
//!         .build()?;
//!     let client = create_client(config)?;
//!
//!     let caches = CachedContents::from_client(client.as_ref());
//!     let cache = caches
//!         .create("gemini-1.5-flash-001", CreateCachedContentOptions::new().content("..."))
//!         .await?;
//!     println!("{cache}");
//!
//!     let mut all = caches.list(Some(10));
//!     while let Some(cc) = all.next().await? {
//!         println!("{} expires {:?}", cc.name(), cc.expire_time());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `caching` - `CachedContent` resource façade
//! - `models` - `get_model` / `list_models`
//! - `client` - Client trait, builder, and the process-wide default client
//! - `config` - Configuration types and builder
//! - `auth` - API key authentication
//! - `transport` - HTTP transport, request building, response mapping
//! - `error` - Error types and HTTP status mapping
//! - `types` - Wire types (camelCase JSON)
//! - `services` - One service per API resource
//! - `pagination` - Lazy cursor-based paging

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod auth;
pub mod caching;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod names;
pub mod observability;
pub mod pagination;
pub mod pretty;
pub mod services;
pub mod transport;
pub mod types;

// Testing support - always available for integration tests
pub mod mocks;

// Re-exports for convenience
pub use auth::{ApiKeyAuthManager, AuthManager, Credential};
pub use caching::{CachedContent, CachedContents, CreateCachedContentOptions};
pub use client::{
    configure, create_client, create_client_from_env, default_client, set_default_client,
    GenAiClient, GenAiClientBuilder, GenAiClientImpl,
};
pub use config::{
    AuthMethod, GenAiConfig, GenAiConfigBuilder, LogLevel, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    // Main error types
    GenAiError,
    GenAiResult,
    // Error categories
    AuthenticationError,
    ConfigurationError,
    NetworkError,
    RateLimitError,
    RequestError,
    ResourceError,
    ResourceKind,
    ResponseError,
    ServerError,
    ValidationDetail,
};
pub use models::{get_model, list_models};
pub use pagination::{Page, Pager};
pub use services::{CachedContentService, ModelsService};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

// Type re-exports; the wire `types::CachedContent` stays namespaced
pub use types::{
    Blob, Content, ExpireTime, FieldMask, FileData, FunctionCall, FunctionCallingConfig,
    FunctionCallingMode, FunctionDeclaration, FunctionResponse, Model, Part, Role, Tool,
    ToolConfig, Ttl, DEFAULT_TTL,
};

// Observability re-exports
pub use observability::{
    DefaultLogger, DefaultTracer, Logger, Span, SpanStatus, StructuredLogger, Tracer, TracingTracer,
};
