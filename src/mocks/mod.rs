//! Test doubles for the transport and observability seams.
//!
//! ```
//! use integrations_genai::mocks::{mock_context, MockHttpTransport};
//! use integrations_genai::services::{ModelsService, ModelsServiceImpl};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let transport = Arc::new(MockHttpTransport::new());
//! transport.enqueue_json_response(200, &json!({"name": "models/gemini-pro-001"}));
//!
//! let models = ModelsServiceImpl::new(mock_context(transport.clone()));
//! let model = models.get("gemini-pro-001").await.unwrap();
//!
//! assert_eq!(model.name, "models/gemini-pro-001");
//! transport.verify_request_count(1);
//! # });
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use secrecy::SecretString;
use serde_json::Value;
use url::Url;

use crate::auth::ApiKeyAuthManager;
use crate::config::{AuthMethod, DEFAULT_BASE_URL};
use crate::observability::{Logger, Observability, Span, SpanStatus, Tracer};
use crate::services::ServiceContext;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBuilder, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A [`ServiceContext`] pointed at the production base URL, authenticating
/// with `test-key` in a header, sending through `transport`.
pub fn mock_context(transport: Arc<dyn HttpTransport>) -> ServiceContext {
    mock_context_with(transport, Observability::noop())
}

/// Like [`mock_context`], with the given logger and tracer.
pub fn mock_context_with(transport: Arc<dyn HttpTransport>, observability: Observability) -> ServiceContext {
    let base_url = Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL parses"));
    let auth = ApiKeyAuthManager::new(SecretString::new("test-key".to_string()), AuthMethod::Header);
    let requests = RequestBuilder::new(base_url, "v1beta".to_string(), Arc::new(auth));
    ServiceContext::new(requests, transport, observability)
}

/// Transport that replays queued responses and records every request.
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next request.
    pub fn enqueue_response(&self, response: HttpResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queue a JSON response.
    pub fn enqueue_json_response(&self, status: u16, body: &Value) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        });
    }

    /// Queue a Google-style error body: `{"error": {code, message, status}}`.
    pub fn enqueue_api_error(&self, status: u16, code_name: &str, message: &str) {
        self.enqueue_json_response(
            status,
            &serde_json::json!({
                "error": { "code": status, "message": message, "status": code_name }
            }),
        );
    }

    /// Queue a transport failure.
    pub fn enqueue_error(&self, error: TransportError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        lock(&self.responses).len()
    }

    /// Panics unless exactly `expected` requests were sent.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.request_count();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }

    /// Panics unless request `index` used `method` and a URL containing `url_contains`.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = lock(&self.requests);
        assert!(index < requests.len(), "No request at index {index}");

        let request = &requests[index];
        assert_eq!(request.method, method, "Expected method {method:?}, got {:?}", request.method);
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }
}

/// A log line captured by [`MockLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// `debug`, `info`, `warn` or `error`.
    pub level: &'static str,
    /// The message.
    pub message: String,
    /// Structured fields.
    pub fields: Value,
}

/// Logger that keeps every record in memory.
#[derive(Default)]
pub struct MockLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MockLogger {
    /// Captured records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.records).clone()
    }

    fn push(&self, level: &'static str, message: &str, fields: Value) {
        lock(&self.records).push(LogRecord {
            level,
            message: message.to_string(),
            fields,
        });
    }
}

impl Logger for MockLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.push("debug", message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.push("info", message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.push("warn", message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.push("error", message, fields);
    }
}

/// A finished span captured by [`MockTracer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpanRecord {
    /// Span name.
    pub name: String,
    /// Attributes set on the span.
    pub attributes: HashMap<String, String>,
    /// Final status.
    pub status: Option<SpanStatus>,
}

/// Tracer that records spans as they end.
#[derive(Default, Clone)]
pub struct MockTracer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl MockTracer {
    /// Ended spans, in the order they ended.
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }
}

impl Tracer for MockTracer {
    fn start_span(&self, name: &str) -> Box<dyn Span> {
        Box::new(MockSpan {
            sink: Arc::clone(&self.spans),
            record: SpanRecord {
                name: name.to_string(),
                attributes: HashMap::new(),
                status: None,
            },
        })
    }
}

struct MockSpan {
    sink: Arc<Mutex<Vec<SpanRecord>>>,
    record: SpanRecord,
}

impl Span for MockSpan {
    fn set_attribute(&mut self, key: &str, value: &str) {
        self.record.attributes.insert(key.to_string(), value.to_string());
    }

    fn set_status(&mut self, status: SpanStatus) {
        self.record.status = Some(status);
    }

    fn end(self: Box<Self>) {
        lock(&self.sink).push(self.record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, &serde_json::json!({"id": 1}));
        transport.enqueue_json_response(201, &serde_json::json!({"id": 2}));

        let first = transport.send(get("https://example.com/1")).await.unwrap();
        let second = transport.send(get("https://example.com/2")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 201);
        transport.verify_request_count(2);
        transport.verify_request(1, HttpMethod::Get, "/2");
        assert_eq!(transport.pending_responses(), 0);
    }

    #[tokio::test]
    async fn test_mock_transport_without_response_fails() {
        let transport = MockHttpTransport::new();
        let result = transport.send(get("https://example.com")).await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
        transport.verify_request_count(1);
    }

    #[test]
    fn test_mock_tracer_records_on_end() {
        let tracer = MockTracer::default();
        let mut span = tracer.start_span("genai.models.get");
        span.set_attribute("resource", "models/x");
        assert!(tracer.spans().is_empty());

        span.end();
        let spans = tracer.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].attributes["resource"], "models/x");
    }
}
