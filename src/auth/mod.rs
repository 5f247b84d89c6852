//! API key credentials.
//!
//! The key travels either in the `x-goog-api-key` header or as the `key`
//! query parameter, as chosen by [`AuthMethod`].

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::{AuthMethod, GenAiConfig};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "key";

/// Where and what to send for one request.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credential<'a> {
    /// Header or query parameter.
    pub method: AuthMethod,
    /// The API key in plain text.
    pub api_key: &'a str,
}

impl Credential<'_> {
    /// `(name, value)` to send as a header, if the key goes in a header.
    pub fn header(&self) -> Option<(&'static str, &str)> {
        (self.method == AuthMethod::Header).then_some((API_KEY_HEADER, self.api_key))
    }

    /// `(name, value)` to append to the query, if the key goes in the URL.
    pub fn query_param(&self) -> Option<(&'static str, &str)> {
        (self.method == AuthMethod::QueryParam).then_some((API_KEY_QUERY_PARAM, self.api_key))
    }
}

impl fmt::Debug for Credential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("method", &self.method)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the credential for outgoing requests.
pub trait AuthManager: Send + Sync {
    /// The credential to attach to the next request.
    fn credential(&self) -> Credential<'_>;
}

/// Static API key from configuration.
#[derive(Clone)]
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Sends `api_key` as `auth_method` dictates.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self { api_key, auth_method }
    }

    /// Key and method from `config`.
    pub fn from_config(config: &GenAiConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn credential(&self) -> Credential<'_> {
        Credential {
            method: self.auth_method,
            api_key: self.api_key.expose_secret(),
        }
    }
}

impl fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("auth_method", &self.auth_method)
            .finish_non_exhaustive()
    }
}
