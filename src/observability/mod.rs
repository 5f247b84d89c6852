//! Logging and tracing for the client.
//!
//! Both concerns sit behind small traits so the client can be built with
//! no-op implementations, the `tracing`-backed defaults, or test doubles.
//!
//! ```rust
//! use integrations_genai::observability::{Logger, StructuredLogger, Tracer, TracingTracer, SpanStatus};
//! use integrations_genai::config::LogLevel;
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("genai.caching").with_level(LogLevel::Debug);
//! logger.debug("cached content created", json!({ "name": "cachedContents/abc" }));
//!
//! let tracer = TracingTracer::new("genai");
//! let mut span = tracer.start_span("genai.cached_content.get");
//! span.set_attribute("name", "cachedContents/abc");
//! span.set_status(SpanStatus::Ok);
//! span.end();
//! ```

pub mod logging;
pub mod tracing;

pub use logging::{DefaultLogger, Logger, StructuredLogger};
pub use tracing::{DefaultTracer, Span, SpanStatus, Tracer, TracingSpan, TracingTracer};

use std::sync::Arc;

/// Logger and tracer handed to every service.
#[derive(Clone)]
pub struct Observability {
    /// Structured logger.
    pub logger: Arc<dyn Logger>,
    /// Span factory.
    pub tracer: Arc<dyn Tracer>,
}

impl Observability {
    /// `tracing`-backed logger and tracer.
    pub fn tracing(service_name: &str) -> Self {
        Self {
            logger: Arc::new(StructuredLogger::new(service_name)),
            tracer: Arc::new(TracingTracer::new(service_name)),
        }
    }

    /// Silent logger and tracer.
    pub fn noop() -> Self {
        Self {
            logger: Arc::new(DefaultLogger),
            tracer: Arc::new(DefaultTracer),
        }
    }
}

impl Default for Observability {
    fn default() -> Self {
        Self::noop()
    }
}
