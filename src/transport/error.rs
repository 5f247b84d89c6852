//! Transport layer error types.

use std::time::Duration;

use crate::error::{GenAiError, NetworkError};

/// Transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be made or broke off.
    #[error("Connection error: {0}")]
    Connection(String),
    /// The request exceeded the client timeout.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    /// The request could not be sent or its body read.
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for GenAiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(duration) => GenAiError::Network(NetworkError::Timeout { duration }),
            other => GenAiError::Network(NetworkError::ConnectionFailed {
                message: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_keeps_duration() {
        let err = GenAiError::from(TransportError::Timeout(Duration::from_secs(120)));
        assert!(matches!(
            err,
            GenAiError::Network(NetworkError::Timeout { duration }) if duration == Duration::from_secs(120)
        ));
    }

    #[test]
    fn test_connection_maps_to_network_error() {
        let err = GenAiError::from(TransportError::Connection("refused".to_string()));
        assert!(matches!(err, GenAiError::Network(NetworkError::ConnectionFailed { .. })));
    }
}
