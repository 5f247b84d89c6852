//! Main error type for the generative AI client.

use std::time::Duration;
use thiserror::Error;
use super::categories::*;

/// Result type alias for client operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Top-level error type for the client.
#[derive(Error, Debug, Clone)]
pub enum GenAiError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

impl GenAiError {
    /// Build a validation error for a single offending argument.
    pub fn validation(field: impl Into<String>, description: impl Into<String>) -> Self {
        let detail = ValidationDetail {
            field: field.into(),
            description: description.into(),
        };
        GenAiError::Request(RequestError::ValidationError {
            message: format!("`{}`: {}", detail.field, detail.description),
            details: vec![detail],
        })
    }

    /// Returns true if this error was raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, GenAiError::Request(RequestError::ValidationError { .. }))
    }

    /// Returns true if the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GenAiError::Resource(ResourceError::NotFound { .. }))
    }

    /// Returns the retry-after duration the service asked for, if any.
    ///
    /// The client never retries on its own; this is surfaced for callers
    /// that want to.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GenAiError::RateLimit(e) => e.retry_after(),
            GenAiError::Server(ServerError::ServiceUnavailable { retry_after }) => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenAiError::Network(NetworkError::Timeout {
                duration: Duration::from_secs(0), // actual elapsed time is not reported
            })
        } else {
            GenAiError::Network(NetworkError::ConnectionFailed {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for GenAiError {
    fn from(err: serde_json::Error) -> Self {
        GenAiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for GenAiError {
    fn from(err: url::ParseError) -> Self {
        GenAiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = GenAiError::validation("display_name", "must be no more than 128 characters");
        assert!(err.is_validation());
        assert!(err.to_string().contains("display_name"));

        match err {
            GenAiError::Request(RequestError::ValidationError { details, .. }) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "display_name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_is_not_found() {
        let err = GenAiError::Resource(ResourceError::NotFound {
            kind: ResourceKind::CachedContent,
            name: "cachedContents/abc".to_string(),
        });
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_retry_after() {
        let rate_limit = GenAiError::RateLimit(RateLimitError::TooManyRequests {
            retry_after: Some(Duration::from_secs(30)),
        });
        assert_eq!(rate_limit.retry_after(), Some(Duration::from_secs(30)));

        let config_error = GenAiError::Configuration(ConfigurationError::MissingApiKey);
        assert_eq!(config_error.retry_after(), None);
    }
}
