//! Content messages stored inside cached content.

use serde::{Deserialize, Serialize};

/// A single part of a content message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    #[serde(rename_all = "camelCase")]
    InlineData {
        /// The inline data blob.
        inline_data: Blob,
    },
    /// Reference to an uploaded file.
    #[serde(rename_all = "camelCase")]
    FileData {
        /// The file data reference.
        file_data: FileData,
    },
    /// A function call emitted by the model.
    #[serde(rename_all = "camelCase")]
    FunctionCall {
        /// The function call details.
        function_call: FunctionCall,
    },
    /// The result of a function call.
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        /// The function response details.
        function_response: FunctionResponse,
    },
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// The text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::text(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Text { text }
    }
}

/// Base64 data with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data.
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// A file previously uploaded to the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// The MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The URI of the file.
    pub file_uri: String,
}

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// Call arguments.
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The response to a function call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    /// The function name.
    pub name: String,
    /// The function's output.
    pub response: serde_json::Value,
}

/// A message made of ordered parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// The author of the message. Left unset for system instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the message.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Content with the given parts and no role.
    pub fn new(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    /// Single-text-part content authored by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(vec![Part::text(text)]).with_role(Role::User)
    }

    /// Single-text-part content authored by the model.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(vec![Part::text(text)]).with_role(Role::Model)
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::new(vec![Part::from(text)])
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::new(vec![Part::from(text)])
    }
}

impl From<Part> for Content {
    fn from(part: Part) -> Self {
        Self::new(vec![part])
    }
}

impl From<Vec<Part>> for Content {
    fn from(parts: Vec<Part>) -> Self {
        Self::new(parts)
    }
}

/// The author of a content message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user.
    User,
    /// The model.
    Model,
}
