//! Tools and tool configuration attached to cached content.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenAiError;

/// A tool the model may use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Function declarations available to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<FunctionDeclaration>>,
    /// Code execution capability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_execution: Option<CodeExecution>,
}

impl Tool {
    /// A tool exposing the given functions.
    pub fn functions(declarations: Vec<FunctionDeclaration>) -> Self {
        Self {
            function_declarations: Some(declarations),
            ..Self::default()
        }
    }
}

impl From<FunctionDeclaration> for Tool {
    fn from(declaration: FunctionDeclaration) -> Self {
        Self::functions(vec![declaration])
    }
}

/// Declaration of a function the model can call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    /// Function name.
    pub name: String,
    /// What the function does.
    #[serde(default)]
    pub description: String,
    /// OpenAPI schema of the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl FunctionDeclaration {
    /// Declaration with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Set the parameter schema.
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Enables server-side code execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CodeExecution {}

/// Configuration applied to all tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Function calling configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_calling_config: Option<FunctionCallingConfig>,
}

impl From<FunctionCallingMode> for ToolConfig {
    fn from(mode: FunctionCallingMode) -> Self {
        Self {
            function_calling_config: Some(FunctionCallingConfig {
                mode: Some(mode),
                allowed_function_names: None,
            }),
        }
    }
}

/// How the model is allowed to call functions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallingConfig {
    /// Calling mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<FunctionCallingMode>,
    /// Restricts `Any` mode to these functions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_function_names: Option<Vec<String>>,
}

/// Mode for function calling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionCallingMode {
    /// Let the model decide.
    Auto,
    /// Always call a function.
    Any,
    /// Never call functions.
    None,
}

impl FromStr for FunctionCallingMode {
    type Err = GenAiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "mode_auto" => Ok(Self::Auto),
            "any" | "mode_any" => Ok(Self::Any),
            "none" | "mode_none" => Ok(Self::None),
            other => Err(GenAiError::validation(
                "tool_config",
                format!("unknown function calling mode `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_into_tool_config() {
        let config = ToolConfig::from(FunctionCallingMode::Any);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"functionCallingConfig": {"mode": "ANY"}})
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("auto".parse::<FunctionCallingMode>().unwrap(), FunctionCallingMode::Auto);
        assert_eq!("NONE".parse::<FunctionCallingMode>().unwrap(), FunctionCallingMode::None);
        assert_eq!("mode_any".parse::<FunctionCallingMode>().unwrap(), FunctionCallingMode::Any);
        assert!("sometimes".parse::<FunctionCallingMode>().unwrap_err().is_validation());
    }

    #[test]
    fn test_tool_wire_format() {
        let tool = Tool::from(FunctionDeclaration::new("get_weather", "Look up the weather"));
        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({"functionDeclarations": [{"name": "get_weather", "description": "Look up the weather"}]})
        );
    }
}
