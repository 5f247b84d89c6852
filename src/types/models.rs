//! Model metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only description of a model served by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Resource name, `models/{model}`.
    pub name: String,
    /// Name of the base model, e.g. `gemini-1.5-flash`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_id: Option<String>,
    /// Version number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum input tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_limit: Option<i32>,
    /// Maximum output tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_token_limit: Option<i32>,
    /// API methods the model supports, e.g. `createCachedContent`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_generation_methods: Vec<String>,
    /// Default temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f32>,
    /// Default nucleus sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Default top-k sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
}

impl Model {
    /// Whether `method` (e.g. `createCachedContent`) is listed as supported.
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        f.write_str(&crate::pretty::prettyprint("Model", &value))
    }
}

/// One page of `models.list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    /// Models on this page.
    #[serde(default)]
    pub models: Vec<Model>,
    /// Continuation token; absent or empty on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_deserialize() {
        let model: Model = serde_json::from_value(json!({
            "name": "models/gemini-1.5-flash-001",
            "baseModelId": "gemini-1.5-flash",
            "version": "001",
            "inputTokenLimit": 1_048_576,
            "supportedGenerationMethods": ["generateContent", "createCachedContent"],
            "maxTemperature": 2.0,
            "topK": 64
        }))
        .unwrap();

        assert_eq!(model.base_model_id.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(model.input_token_limit, Some(1_048_576));
        assert_eq!(model.top_k, Some(64));
        assert!(model.supports("createCachedContent"));
        assert!(!model.supports("embedContent"));
    }

    #[test]
    fn test_list_models_response_without_token() {
        let page: ListModelsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.models.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
