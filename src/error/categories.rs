//! Error category types for granular error handling.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Quota exceeded for API key")]
    QuotaExceeded,
}

/// Request validation errors.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    #[error("Validation error: {message}")]
    ValidationError { message: String, details: Vec<ValidationDetail> },

    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },
}

/// Validation detail for field-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    pub field: String,
    pub description: String,
}

/// Rate limiting errors.
#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    #[error("Too many requests")]
    TooManyRequests { retry_after: Option<Duration> },

    #[error("Quota exceeded")]
    QuotaExceeded { retry_after: Option<Duration> },
}

impl RateLimitError {
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after }
            | RateLimitError::QuotaExceeded { retry_after } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },
}

/// Server-side errors.
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("Service unavailable")]
    ServiceUnavailable { retry_after: Option<Duration> },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    #[error("Failed to deserialize response: {message}")]
    DeserializationError { message: String },

    #[error("Unexpected response format: {message}")]
    UnexpectedFormat { message: String },
}

/// The kind of server-side resource an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    CachedContent,
    Model,
    Unknown,
}

impl ResourceKind {
    /// Guess the resource kind from a resource name or error message.
    pub fn infer(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("cachedcontents/") || lower.contains("cached") {
            ResourceKind::CachedContent
        } else if lower.contains("models/") || lower.contains("model") {
            ResourceKind::Model
        } else {
            ResourceKind::Unknown
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::CachedContent => write!(f, "Cached content"),
            ResourceKind::Model => write!(f, "Model"),
            ResourceKind::Unknown => write!(f, "Resource"),
        }
    }
}

/// Resource-related errors.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: ResourceKind, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_infer() {
        assert_eq!(ResourceKind::infer("cachedContents/abc"), ResourceKind::CachedContent);
        assert_eq!(ResourceKind::infer("Cached content not found"), ResourceKind::CachedContent);
        assert_eq!(ResourceKind::infer("models/gemini-1.0-pro-001"), ResourceKind::Model);
        assert_eq!(ResourceKind::infer("something else"), ResourceKind::Unknown);
    }

    #[test]
    fn test_not_found_display() {
        let err = ResourceError::NotFound {
            kind: ResourceKind::CachedContent,
            name: "cachedContents/abc".to_string(),
        };
        assert_eq!(err.to_string(), "Cached content not found: cachedContents/abc");
    }
}
