//! Error mapping utilities for HTTP status codes and API responses.

use std::time::Duration;
use serde::Deserialize;
use super::categories::*;
use super::types::GenAiError;

/// Structured API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Maps an HTTP status code and response body to a `GenAiError`.
///
/// The body is expected to be a Google API error envelope; plain text bodies
/// are used verbatim as the message.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> GenAiError {
    let (message, error_details) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(error_response) => (error_response.error.message.clone(), Some(error_response.error)),
        Err(_) => (String::from_utf8_lossy(body).to_string(), None),
    };

    match status {
        400 => {
            let details = error_details
                .as_ref()
                .map(|e| parse_validation_details(&e.details))
                .unwrap_or_default();

            GenAiError::Request(RequestError::ValidationError { message, details })
        }

        401 => GenAiError::Authentication(AuthenticationError::InvalidApiKey),

        403 => {
            if message.to_lowercase().contains("quota") {
                GenAiError::Authentication(AuthenticationError::QuotaExceeded)
            } else {
                GenAiError::Authentication(AuthenticationError::PermissionDenied { message })
            }
        }

        404 => {
            let name = extract_resource_name(&message);
            GenAiError::Resource(ResourceError::NotFound {
                kind: ResourceKind::infer(&message),
                name,
            })
        }

        // retry_after is filled in from headers by the response parser
        429 => GenAiError::RateLimit(RateLimitError::TooManyRequests { retry_after: None }),

        503 => GenAiError::Server(ServerError::ServiceUnavailable { retry_after: None }),

        500..=599 => GenAiError::Server(ServerError::InternalError { message }),

        _ => match error_details {
            Some(details) if !details.status.is_empty() => map_api_error(&details.status, message),
            _ => GenAiError::Response(ResponseError::UnexpectedFormat {
                message: format!("HTTP {}: {}", status, message),
            }),
        },
    }
}

/// Maps an HTTP status code with a plain message to a `GenAiError`.
pub fn map_http_status(status: u16, message: String) -> GenAiError {
    map_http_status_with_body(status, message.as_bytes())
}

/// Maps a canonical API status string (e.g. `NOT_FOUND`) to a `GenAiError`.
pub fn map_api_error(error_type: &str, message: String) -> GenAiError {
    match error_type {
        "INVALID_ARGUMENT" | "FAILED_PRECONDITION" => {
            GenAiError::Request(RequestError::ValidationError { message, details: vec![] })
        }
        "UNAUTHENTICATED" => GenAiError::Authentication(AuthenticationError::InvalidApiKey),
        "PERMISSION_DENIED" => {
            GenAiError::Authentication(AuthenticationError::PermissionDenied { message })
        }
        "NOT_FOUND" => GenAiError::Resource(ResourceError::NotFound {
            kind: ResourceKind::infer(&message),
            name: extract_resource_name(&message),
        }),
        "RESOURCE_EXHAUSTED" => {
            GenAiError::RateLimit(RateLimitError::QuotaExceeded { retry_after: None })
        }
        "OUT_OF_RANGE" => GenAiError::Request(RequestError::InvalidParameter {
            parameter: "unknown".to_string(),
            message,
        }),
        "UNAVAILABLE" => GenAiError::Server(ServerError::ServiceUnavailable { retry_after: None }),
        "DEADLINE_EXCEEDED" => GenAiError::Network(NetworkError::Timeout {
            duration: Duration::from_secs(0),
        }),
        _ => GenAiError::Server(ServerError::InternalError {
            message: format!("{}: {}", error_type, message),
        }),
    }
}

/// Extracts a resource name (`cachedContents/...` or `models/...`) from an error message.
fn extract_resource_name(message: &str) -> String {
    if let Some(found) = message
        .split_whitespace()
        .find(|s| s.contains("cachedContents/") || s.contains("models/"))
    {
        return found
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '-' && c != '_' && c != '.')
            .trim_end_matches('.')
            .to_string();
    }

    for quote in ['\'', '"'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Parses validation details from the error `details` array.
fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    let mut result = Vec::new();

    for detail in details {
        // BadRequest details nest their entries under fieldViolations
        if let Some(violations) = detail.get("fieldViolations").and_then(|v| v.as_array()) {
            result.extend(parse_validation_details(violations));
            continue;
        }

        if let Some(obj) = detail.as_object() {
            let field = obj
                .get("field")
                .or_else(|| obj.get("fieldPath"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");

            let description = obj
                .get("description")
                .or_else(|| obj.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or("");

            if !description.is_empty() {
                result.push(ValidationDetail {
                    field: field.to_string(),
                    description: description.to_string(),
                });
            }
        }
    }

    result
}
