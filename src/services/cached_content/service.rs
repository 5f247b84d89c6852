use async_trait::async_trait;

use super::validation::{validate_cached_content_name, validate_create_request, validate_update_request};
use super::CachedContentService;
use crate::error::GenAiResult;
use crate::names::cached_content_name;
use crate::services::ServiceContext;
use crate::transport::{endpoints, HttpMethod, ResponseParser};
use crate::types::{
    CachedContent, CreateCachedContentRequest, ListCachedContentsParams,
    ListCachedContentsResponse, UpdateCachedContentRequest,
};

/// `CachedContentService` over HTTP.
pub struct CachedContentServiceImpl {
    context: ServiceContext,
}

impl CachedContentServiceImpl {
    /// Create a new cached content service instance.
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl CachedContentService for CachedContentServiceImpl {
    async fn create(&self, request: CreateCachedContentRequest) -> GenAiResult<CachedContent> {
        validate_create_request(&request)?;

        let model = request.cached_content.model.clone().unwrap_or_default();
        self.context
            .traced("genai.cached_content.create", &model, async {
                let response = self
                    .context
                    .send(
                        HttpMethod::Post,
                        endpoints::CACHED_CONTENTS,
                        &[],
                        Some(&request.cached_content),
                    )
                    .await?;
                ResponseParser::parse_response(response)
            })
            .await
    }

    async fn get(&self, name: &str) -> GenAiResult<CachedContent> {
        validate_cached_content_name(name)?;
        let name = cached_content_name(name);

        self.context
            .traced("genai.cached_content.get", &name, async {
                let response = self
                    .context
                    .send::<()>(HttpMethod::Get, &endpoints::resource(&name), &[], None)
                    .await?;
                ResponseParser::parse_resource_response(response, &name)
            })
            .await
    }

    async fn list(
        &self,
        params: Option<ListCachedContentsParams>,
    ) -> GenAiResult<ListCachedContentsResponse> {
        let query = params.unwrap_or_default().to_query();

        self.context
            .traced("genai.cached_content.list", endpoints::CACHED_CONTENTS, async {
                let response = self
                    .context
                    .send::<()>(HttpMethod::Get, endpoints::CACHED_CONTENTS, &query, None)
                    .await?;
                ResponseParser::parse_response(response)
            })
            .await
    }

    async fn update(&self, request: UpdateCachedContentRequest) -> GenAiResult<CachedContent> {
        validate_update_request(&request)?;

        let name = cached_content_name(request.cached_content.name.as_deref().unwrap_or_default());
        let query = [("updateMask", request.update_mask.to_string())];

        self.context
            .traced("genai.cached_content.update", &name, async {
                let response = self
                    .context
                    .send(
                        HttpMethod::Patch,
                        &endpoints::resource(&name),
                        &query,
                        Some(&request.cached_content),
                    )
                    .await?;
                ResponseParser::parse_resource_response(response, &name)
            })
            .await
    }

    async fn delete(&self, name: &str) -> GenAiResult<()> {
        validate_cached_content_name(name)?;
        let name = cached_content_name(name);

        self.context
            .traced("genai.cached_content.delete", &name, async {
                let response = self
                    .context
                    .send::<()>(HttpMethod::Delete, &endpoints::resource(&name), &[], None)
                    .await?;
                ResponseParser::expect_success(response, &name)
            })
            .await
    }
}
