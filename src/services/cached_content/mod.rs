//! Cached content service.

mod service;
mod validation;

use async_trait::async_trait;

use crate::error::GenAiResult;
use crate::types::{
    CachedContent, CreateCachedContentRequest, ListCachedContentsParams,
    ListCachedContentsResponse, UpdateCachedContentRequest,
};

pub use service::CachedContentServiceImpl;
pub use validation::{
    validate_cached_content_name, validate_create_request, validate_display_name,
    validate_update_paths, validate_update_request, MAX_DISPLAY_NAME_CHARS, UPDATABLE_PATHS,
};

/// CRUD operations on `cachedContents`.
#[async_trait]
pub trait CachedContentService: Send + Sync {
    /// Create cached content.
    async fn create(&self, request: CreateCachedContentRequest) -> GenAiResult<CachedContent>;

    /// Get cached content by name. Bare ids are prefixed with `cachedContents/`.
    async fn get(&self, name: &str) -> GenAiResult<CachedContent>;

    /// List one page of cached contents.
    async fn list(
        &self,
        params: Option<ListCachedContentsParams>,
    ) -> GenAiResult<ListCachedContentsResponse>;

    /// Overwrite the masked fields of cached content.
    async fn update(&self, request: UpdateCachedContentRequest) -> GenAiResult<CachedContent>;

    /// Delete cached content.
    async fn delete(&self, name: &str) -> GenAiResult<()>;
}
