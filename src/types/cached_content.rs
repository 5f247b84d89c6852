//! Cached content wire records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::Content;
use super::field_mask::FieldMask;
use super::time::{ExpireTime, Ttl};
use super::tools::{Tool, ToolConfig};

/// The cached content resource as sent to and returned by the API.
///
/// Every field is optional so the same record serves as create body, update
/// body, and response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedContent {
    /// Resource name, `cachedContents/{id}`. Assigned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model the content was created for, `models/{model}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// User-chosen name, at most 128 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// System instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Cached conversation contents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<Content>,
    /// Tools available to the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    /// Tool configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
    /// Token accounting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<CachedContentUsageMetadata>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
    /// Expiry instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<ExpireTime>,
    /// Input-only lifetime; never returned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
}

/// Token accounting for cached content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedContentUsageMetadata {
    /// Tokens consumed by the cached content.
    #[serde(default)]
    pub total_token_count: i32,
}

/// `cachedContents.create` request. The record is the whole body.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCachedContentRequest {
    /// The resource to create.
    pub cached_content: CachedContent,
}

/// `cachedContents.patch` request.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCachedContentRequest {
    /// Must carry `name` plus the fields listed in `update_mask`.
    pub cached_content: CachedContent,
    /// Paths to overwrite.
    pub update_mask: FieldMask,
}

/// One page of `cachedContents.list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListCachedContentsResponse {
    /// Cached contents on this page.
    #[serde(default)]
    pub cached_contents: Vec<CachedContent>,
    /// Continuation token; absent or empty on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}
