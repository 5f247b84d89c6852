//! HTTP request builder.
//!
//! Resolves endpoint paths against the configured base URL and API version,
//! attaches credentials and serializes JSON bodies.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::auth::AuthManager;
use crate::config::GenAiConfig;
use crate::error::{GenAiError, RequestError};
use super::http::{HttpRequest, HttpMethod};

/// Builder for constructing HTTP requests to the API.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Arc<dyn AuthManager>,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(base_url: Url, api_version: String, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Creates a request builder from the client configuration.
    pub fn from_config(config: &GenAiConfig, auth_manager: Arc<dyn AuthManager>) -> Self {
        Self::new(config.base_url.clone(), config.api_version.clone(), auth_manager)
    }

    /// Builds the complete URL for `path` with the given query parameters.
    ///
    /// Authentication query parameters are appended after `query`.
    pub fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, GenAiError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let full_path = format!(
            "{}/{}",
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = base.join(&full_path)?;

        let credential = self.auth_manager.credential();
        let auth_param = credential.query_param();
        if !query.is_empty() || auth_param.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some((key, value)) = auth_param {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Builds an HTTP request, serializing `body` as JSON when present.
    pub fn build_request<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&T>,
    ) -> Result<HttpRequest, GenAiError> {
        let url = self.build_url(path, query)?;

        let mut headers = HashMap::new();

        let body = match body {
            Some(body) => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                let json = serde_json::to_vec(body).map_err(|e| {
                    GenAiError::Request(RequestError::InvalidParameter {
                        parameter: "request".to_string(),
                        message: format!("Failed to serialize request: {}", e),
                    })
                })?;
                Some(Bytes::from(json))
            }
            None => None,
        };

        if let Some((key, value)) = self.auth_manager.credential().header() {
            headers.insert(key.to_string(), value.to_string());
        }

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }
}
