//! Wire types for the cached content and models APIs.
//!
//! Field names follow the API's camelCase JSON; every record round-trips
//! through serde.

pub mod cached_content;
pub mod content;
pub mod field_mask;
pub mod models;
pub mod time;
pub mod tools;

pub use cached_content::{
    CachedContent, CachedContentUsageMetadata, CreateCachedContentRequest,
    ListCachedContentsResponse, UpdateCachedContentRequest,
};
pub use content::{Blob, Content, FileData, FunctionCall, FunctionResponse, Part, Role};
pub use field_mask::FieldMask;
pub use models::{ListModelsResponse, Model};
pub use time::{ExpireTime, Ttl, DEFAULT_TTL};
pub use tools::{
    CodeExecution, FunctionCallingConfig, FunctionCallingMode, FunctionDeclaration, Tool, ToolConfig,
};

/// Paging parameters shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum items per page. The server may return fewer.
    pub page_size: Option<u32>,
    /// Continuation token from the previous page.
    pub page_token: Option<String>,
}

impl ListParams {
    /// Query pairs for the request URL, skipping unset and empty values.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = self.page_token.as_deref().filter(|t| !t.is_empty()) {
            query.push(("pageToken", token.to_string()));
        }
        query
    }
}

/// Paging parameters for `cachedContents.list`.
pub type ListCachedContentsParams = ListParams;

/// Paging parameters for `models.list`.
pub type ListModelsParams = ListParams;
