//! Structured logging.

use serde_json::Value;
use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";

const SENSITIVE_KEYS: [&str; 10] = [
    "api_key", "apiKey", "key",
    "token", "access_token", "accessToken",
    "secret", "password", "credential",
    "authorization",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger that emits through the `tracing` crate.
///
/// Fields whose names look like credentials are masked before emission, at
/// any nesting depth.
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Create a new structured logger with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    fn redact_sensitive_fields(fields: Value) -> Value {
        match fields {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        if SENSITIVE_KEYS.contains(&key.as_str()) {
                            (key, Value::String(REDACTED.to_string()))
                        } else {
                            (key, Self::redact_sensitive_fields(value))
                        }
                    })
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(Self::redact_sensitive_fields).collect())
            }
            other => other,
        }
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Debug) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::debug!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Info) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::info!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Warn) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::warn!(logger = %self.name, fields = %fields, "{}", message);
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.should_log(LogLevel::Error) {
            let fields = Self::redact_sensitive_fields(fields);
            tracing::error!(logger = %self.name, fields = %fields, "{}", message);
        }
    }
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}
