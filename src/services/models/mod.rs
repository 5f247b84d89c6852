//! Read-only model metadata.

mod service;

use async_trait::async_trait;

use crate::error::GenAiResult;
use crate::types::{ListModelsParams, ListModelsResponse, Model};

pub use service::ModelsServiceImpl;

/// Service for listing and retrieving model information.
#[async_trait]
pub trait ModelsService: Send + Sync {
    /// List one page of models.
    async fn list(&self, params: Option<ListModelsParams>) -> GenAiResult<ListModelsResponse>;

    /// Get a model by name. A bare `word-word-digits` id is looked up under
    /// `models/`; anything else is sent unchanged.
    async fn get(&self, name: &str) -> GenAiResult<Model>;
}
