//! HTTP response parser.
//!
//! Maps non-2xx responses onto [`GenAiError`] and pulls retry hints and
//! request ids out of the headers.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{map_http_status_with_body, GenAiError, RateLimitError, ResourceError, ServerError};
use super::http::HttpResponse;

/// Parser for HTTP responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Deserializes a successful response, or maps an error response.
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, GenAiError> {
        if (200..300).contains(&response.status) {
            let parsed: T = serde_json::from_slice(&response.body)?;
            Ok(parsed)
        } else {
            Err(Self::parse_error_response(response))
        }
    }

    /// Like [`parse_response`](Self::parse_response), but a not-found error
    /// carries `resource_name` instead of whatever the message mentioned.
    pub fn parse_resource_response<T: DeserializeOwned>(
        response: HttpResponse,
        resource_name: &str,
    ) -> Result<T, GenAiError> {
        Self::parse_response(response).map_err(|e| Self::attach_resource_name(e, resource_name))
    }

    /// Checks a response whose body carries nothing of interest (e.g. delete).
    pub fn expect_success(response: HttpResponse, resource_name: &str) -> Result<(), GenAiError> {
        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(Self::attach_resource_name(
                Self::parse_error_response(response),
                resource_name,
            ))
        }
    }

    /// Maps an error response to the appropriate error type.
    pub fn parse_error_response(response: HttpResponse) -> GenAiError {
        let retry_after = Self::parse_retry_after(&response.headers);
        let request_id = Self::extract_request_id(&response.headers);

        let mut error = map_http_status_with_body(response.status, &response.body);

        match error {
            GenAiError::RateLimit(
                RateLimitError::TooManyRequests { retry_after: ref mut ra }
                | RateLimitError::QuotaExceeded { retry_after: ref mut ra },
            )
            | GenAiError::Server(ServerError::ServiceUnavailable { retry_after: ref mut ra }) => {
                *ra = retry_after;
            }
            _ => {}
        }

        if let Some(ref id) = request_id {
            tracing::debug!(
                request_id = %id,
                status = response.status,
                error = ?error,
                "API error occurred"
            );
        }

        error
    }

    /// Parses the `Retry-After` header (delay in seconds).
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the request id from response headers for debugging.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        let possible_headers = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| possible_headers.iter().any(|h| key.eq_ignore_ascii_case(h)))
            .map(|(_, value)| value.clone())
    }

    fn attach_resource_name(error: GenAiError, resource_name: &str) -> GenAiError {
        match error {
            GenAiError::Resource(ResourceError::NotFound { .. }) => {
                GenAiError::Resource(ResourceError::NotFound {
                    kind: crate::error::ResourceKind::infer(resource_name),
                    name: resource_name.to_string(),
                })
            }
            other => other,
        }
    }
}
