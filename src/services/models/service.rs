use async_trait::async_trait;

use super::ModelsService;
use crate::error::{GenAiError, GenAiResult};
use crate::names::model_name;
use crate::services::ServiceContext;
use crate::transport::{endpoints, HttpMethod, ResponseParser};
use crate::types::{ListModelsParams, ListModelsResponse, Model};

/// `ModelsService` over HTTP.
pub struct ModelsServiceImpl {
    context: ServiceContext,
}

impl ModelsServiceImpl {
    /// Create a new models service implementation.
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ModelsService for ModelsServiceImpl {
    async fn list(&self, params: Option<ListModelsParams>) -> GenAiResult<ListModelsResponse> {
        let query = params.unwrap_or_default().to_query();

        self.context
            .traced("genai.models.list", endpoints::MODELS, async {
                let response = self
                    .context
                    .send::<()>(HttpMethod::Get, endpoints::MODELS, &query, None)
                    .await?;
                ResponseParser::parse_response(response)
            })
            .await
    }

    async fn get(&self, name: &str) -> GenAiResult<Model> {
        if name.trim().is_empty() {
            return Err(GenAiError::validation("name", "Model name must not be empty"));
        }
        let name = model_name(name);

        self.context
            .traced("genai.models.get", &name, async {
                let response = self
                    .context
                    .send::<()>(HttpMethod::Get, &endpoints::resource(&name), &[], None)
                    .await?;
                ResponseParser::parse_resource_response(response, &name)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{mock_context, MockHttpTransport};
    use crate::types::ListParams;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_prefixes_bare_name() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, &json!({"name": "models/gemini-pro-001"}));
        let service = ModelsServiceImpl::new(mock_context(transport.clone()));

        let model = service.get("gemini-pro-001").await.unwrap();

        assert_eq!(model.name, "models/gemini-pro-001");
        assert_eq!(transport.last_request().unwrap().path(), "/v1beta/models/gemini-pro-001");
    }

    #[tokio::test]
    async fn test_list_sends_paging_params() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, &json!({"models": [{"name": "models/a"}], "nextPageToken": "t2"}));
        let service = ModelsServiceImpl::new(mock_context(transport.clone()));

        let page = service
            .list(Some(ListParams {
                page_size: Some(3),
                page_token: Some("t1".to_string()),
            }))
            .await
            .unwrap();

        assert_eq!(page.models.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("t2"));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.query_param("pageSize").as_deref(), Some("3"));
        assert_eq!(sent.query_param("pageToken").as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_locally() {
        let transport = Arc::new(MockHttpTransport::new());
        let service = ModelsServiceImpl::new(mock_context(transport.clone()));

        assert!(service.get("  ").await.unwrap_err().is_validation());
        assert_eq!(transport.request_count(), 0);
    }
}
