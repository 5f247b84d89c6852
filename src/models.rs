//! Model metadata lookups.
//!
//! ```no_run
//! use integrations_genai::models::{get_model, list_models};
//!
//! # async fn example() -> Result<(), integrations_genai::GenAiError> {
//! let model = get_model("gemini-1.0-pro-001").await?;
//! println!("{model}");
//!
//! let mut models = list_models(Some(50))?;
//! while let Some(model) = models.next().await? {
//!     println!("{}", model.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::client::{default_client, GenAiClient};
use crate::error::GenAiResult;
use crate::pagination::{Page, Pager};
use crate::types::{ListParams, Model};

/// Fetches a model through the default client. A bare `word-word-digits`
/// id such as `gemini-pro-001` is looked up as `models/gemini-pro-001`;
/// any other name is sent as given.
pub async fn get_model(name: &str) -> GenAiResult<Model> {
    get_model_with(default_client()?.as_ref(), name).await
}

/// Like [`get_model`], on `client`.
pub async fn get_model_with(client: &dyn GenAiClient, name: &str) -> GenAiResult<Model> {
    client.models().get(name).await
}

/// Lazily lists models through the default client. `None` lets the
/// server pick the page size.
pub fn list_models(page_size: Option<u32>) -> GenAiResult<Pager<Model>> {
    Ok(list_models_with(default_client()?.as_ref(), page_size))
}

/// Like [`list_models`], on `client`.
pub fn list_models_with(client: &dyn GenAiClient, page_size: Option<u32>) -> Pager<Model> {
    let service = client.models();

    Pager::new(move |page_token| {
        let service = Arc::clone(&service);
        async move {
            let response = service
                .list(Some(ListParams {
                    page_size,
                    page_token,
                }))
                .await?;
            Ok(Page::new(response.models, response.next_page_token))
        }
    })
}
