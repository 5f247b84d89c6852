//! Core HTTP transport abstractions.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use super::error::TransportError;

/// HTTP request for the transport layer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Returns the body parsed as JSON, if there is one.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Returns the decoded value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<String> {
        let url = url::Url::parse(&self.url).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Returns the URL path, without host or query.
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

/// HTTP response from the transport layer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_helpers() {
        let request = HttpRequest {
            method: HttpMethod::Patch,
            url: "https://example.com/v1beta/cachedContents/abc?updateMask=ttl%2Cexpire_time".to_string(),
            headers: HashMap::new(),
            body: Some(Bytes::from(r#"{"ttl":"60s"}"#)),
        };

        assert_eq!(request.path(), "/v1beta/cachedContents/abc");
        assert_eq!(request.query_param("updateMask").as_deref(), Some("ttl,expire_time"));
        assert_eq!(request.query_param("missing"), None);
        assert_eq!(request.json_body().unwrap()["ttl"], "60s");
    }
}
