//! Span tracking for service calls.

use std::collections::HashMap;
use std::time::Instant;

/// Creates spans around operations.
pub trait Tracer: Send + Sync {
    /// Start a new span with the given name, e.g. `genai.cached_content.create`.
    fn start_span(&self, name: &str) -> Box<dyn Span>;
}

/// A traced operation.
pub trait Span: Send {
    /// Set an attribute on the span.
    fn set_attribute(&mut self, key: &str, value: &str);

    /// Set the span status.
    fn set_status(&mut self, status: SpanStatus);

    /// End the span and record its duration.
    fn end(self: Box<Self>);
}

/// Status of a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanStatus {
    /// Operation completed successfully.
    Ok,
    /// Operation failed with an error message.
    Error(String),
}

/// Tracer backed by the `tracing` crate.
pub struct TracingTracer {
    service_name: String,
}

impl TracingTracer {
    /// Create a new tracing tracer.
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
        }
    }
}

impl Tracer for TracingTracer {
    fn start_span(&self, name: &str) -> Box<dyn Span> {
        tracing::trace!(service = %self.service_name, span_name = %name, "Span started");

        Box::new(TracingSpan {
            name: name.to_string(),
            service_name: self.service_name.clone(),
            start: Instant::now(),
            attributes: HashMap::new(),
            status: None,
        })
    }
}

/// Span emitted as a `tracing` event when it ends.
pub struct TracingSpan {
    name: String,
    service_name: String,
    start: Instant,
    attributes: HashMap<String, String>,
    status: Option<SpanStatus>,
}

impl TracingSpan {
    /// Attributes recorded so far.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }
}

impl Span for TracingSpan {
    fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    fn set_status(&mut self, status: SpanStatus) {
        if let SpanStatus::Error(msg) = &status {
            tracing::debug!(span_name = %self.name, error = %msg, "Span failed");
        }
        self.status = Some(status);
    }

    fn end(self: Box<Self>) {
        let status = match &self.status {
            Some(SpanStatus::Ok) => "ok",
            Some(SpanStatus::Error(_)) => "error",
            None => "unset",
        };

        tracing::debug!(
            service = %self.service_name,
            span_name = %self.name,
            duration_ms = self.start.elapsed().as_millis() as u64,
            status = status,
            attributes = ?self.attributes,
            "Span ended"
        );
    }
}

/// Tracer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTracer;

impl Tracer for DefaultTracer {
    fn start_span(&self, _name: &str) -> Box<dyn Span> {
        Box::new(NoOpSpan)
    }
}

struct NoOpSpan;

impl Span for NoOpSpan {
    fn set_attribute(&mut self, _key: &str, _value: &str) {}
    fn set_status(&mut self, _status: SpanStatus) {}
    fn end(self: Box<Self>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_span_records_attributes() {
        let mut span = TracingSpan {
            name: "genai.cached_content.get".to_string(),
            service_name: "test".to_string(),
            start: Instant::now(),
            attributes: HashMap::new(),
            status: None,
        };

        span.set_attribute("name", "cachedContents/abc");
        span.set_status(SpanStatus::Ok);

        assert_eq!(span.attributes().get("name").map(String::as_str), Some("cachedContents/abc"));
        assert_eq!(span.status, Some(SpanStatus::Ok));
        Box::new(span).end();
    }

    #[test]
    fn test_default_tracer_noop() {
        let tracer = DefaultTracer;
        let mut span = tracer.start_span("test.operation");

        span.set_attribute("key", "value");
        span.set_status(SpanStatus::Ok);
        span.end();
    }
}
