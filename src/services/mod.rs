//! One service per API resource. Each operation validates its input, sends
//! exactly one request, and maps the response.

pub mod cached_content;
pub mod models;

pub use cached_content::{CachedContentService, CachedContentServiceImpl};
pub use models::{ModelsService, ModelsServiceImpl};

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::error::GenAiResult;
use crate::observability::{Observability, SpanStatus};
use crate::transport::{HttpMethod, HttpResponse, HttpTransport, RequestBuilder};

/// What every service needs to talk to the API.
#[derive(Clone)]
pub struct ServiceContext {
    requests: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
    observability: Observability,
}

impl ServiceContext {
    /// Bundles the request builder, transport, and observability stack.
    pub fn new(
        requests: RequestBuilder,
        transport: Arc<dyn HttpTransport>,
        observability: Observability,
    ) -> Self {
        Self {
            requests,
            transport,
            observability,
        }
    }

    /// Builds and sends one request.
    pub(crate) async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> GenAiResult<HttpResponse> {
        let request = self.requests.build_request(method, path, query, body)?;
        Ok(self.transport.send(request).await?)
    }

    /// Runs `operation` inside a span named `span_name`, tagging it with the
    /// resource and logging the outcome at debug level.
    pub(crate) async fn traced<T, F>(&self, span_name: &str, resource: &str, operation: F) -> GenAiResult<T>
    where
        F: Future<Output = GenAiResult<T>>,
    {
        let mut span = self.observability.tracer.start_span(span_name);
        span.set_attribute("resource", resource);

        let result = operation.await;

        match &result {
            Ok(_) => {
                span.set_status(SpanStatus::Ok);
                self.observability
                    .logger
                    .debug(&format!("{span_name} succeeded"), json!({ "resource": resource }));
            }
            Err(err) => {
                span.set_status(SpanStatus::Error(err.to_string()));
                self.observability.logger.debug(
                    &format!("{span_name} failed"),
                    json!({ "resource": resource, "error": err.to_string() }),
                );
            }
        }
        span.end();

        result
    }
}
