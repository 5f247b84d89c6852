//! Resource-style access to cached content.
//!
//! [`CachedContents`] creates, fetches and lists resources; each one comes
//! back as a [`CachedContent`] that can update its own expiry or delete
//! itself. The associated functions `CachedContent::create`, `get` and
//! `list` go through the process-wide default client.
//!
//! ```no_run
//! use integrations_genai::caching::{CachedContent, CreateCachedContentOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), integrations_genai::GenAiError> {
//! let mut cache = CachedContent::create(
//!     "gemini-1.5-flash-001",
//!     CreateCachedContentOptions::new()
//!         .display_name("handbook")
//!         .system_instruction("Answer from the handbook only.")
//!         .content("<the whole handbook>")
//!         .ttl(Duration::from_secs(600)),
//! )
//! .await?;
//!
//! cache.update_ttl(Duration::from_secs(1800)).await?;
//! println!("{cache}");
//! cache.delete().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::{default_client, GenAiClient};
use crate::error::{GenAiError, GenAiResult};
use crate::names::creation_model_name;
use crate::pagination::{Page, Pager};
use crate::services::cached_content::{validate_display_name, validate_update_paths};
use crate::services::CachedContentService;
use crate::types::{
    self, CachedContentUsageMetadata, Content, CreateCachedContentRequest, ExpireTime, FieldMask,
    FunctionDeclaration, ListParams, Role, Tool, ToolConfig, Ttl, UpdateCachedContentRequest,
    DEFAULT_TTL,
};

/// Page size used by `list` when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 1;

/// Optional arguments of [`CachedContents::create`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCachedContentOptions {
    /// At most 128 characters.
    pub display_name: Option<String>,
    /// System instruction.
    pub system_instruction: Option<Content>,
    /// Contents to cache. The last one is sent with role `user` unless it
    /// already has a role.
    pub contents: Vec<Content>,
    /// Tools the model may use.
    pub tools: Vec<Tool>,
    /// Configuration for all tools.
    pub tool_config: Option<ToolConfig>,
    /// Lifetime. Exclusive with `expire_time`.
    pub ttl: Option<Ttl>,
    /// Expiry instant. Exclusive with `ttl`.
    pub expire_time: Option<ExpireTime>,
}

impl CreateCachedContentOptions {
    /// No options: one hour TTL, no contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the system instruction; a string becomes a single text part.
    pub fn system_instruction(mut self, instruction: impl Into<Content>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Appends one content.
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }

    /// Appends several contents.
    pub fn contents<I, C>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        self.contents.extend(contents.into_iter().map(Into::into));
        self
    }

    /// Appends a tool.
    pub fn tool(mut self, tool: impl Into<Tool>) -> Self {
        self.tools.push(tool.into());
        self
    }

    /// Adds a function to the function-declaration tool, creating it if
    /// needed.
    pub fn function(mut self, declaration: FunctionDeclaration) -> Self {
        let existing = self
            .tools
            .iter_mut()
            .find_map(|tool| tool.function_declarations.as_mut());
        match existing {
            Some(declarations) => declarations.push(declaration),
            None => self.tools.push(Tool::from(declaration)),
        }
        self
    }

    /// Sets the tool configuration; a [`FunctionCallingMode`](crate::types::FunctionCallingMode)
    /// converts directly.
    pub fn tool_config(mut self, config: impl Into<ToolConfig>) -> Self {
        self.tool_config = Some(config.into());
        self
    }

    /// Sets the lifetime.
    pub fn ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }

    /// Sets the expiry instant.
    pub fn expire_time(mut self, expire_time: impl Into<ExpireTime>) -> Self {
        self.expire_time = Some(expire_time.into());
        self
    }
}

fn exclusive_expiry() -> GenAiError {
    GenAiError::validation(
        "ttl/expire_time",
        "Exclusive arguments: provide either `ttl` or `expire_time`, not both",
    )
}

/// Builds the create request: normalizes the model name, checks the
/// arguments, and falls back to a one hour TTL.
pub fn prepare_create_request(
    model: &str,
    options: CreateCachedContentOptions,
) -> GenAiResult<CreateCachedContentRequest> {
    if options.ttl.is_some() && options.expire_time.is_some() {
        return Err(exclusive_expiry());
    }
    if model.trim().is_empty() {
        return Err(GenAiError::validation("model", "Model is required and must not be empty"));
    }
    if let Some(name) = &options.display_name {
        validate_display_name(name)?;
    }

    let mut contents = options.contents;
    if let Some(last) = contents.last_mut() {
        if last.role.is_none() {
            last.role = Some(Role::User);
        }
    }

    let ttl = match (options.ttl, &options.expire_time) {
        (None, None) => Some(DEFAULT_TTL),
        (ttl, _) => ttl,
    };

    Ok(CreateCachedContentRequest {
        cached_content: types::CachedContent {
            model: Some(creation_model_name(model)),
            display_name: options.display_name,
            system_instruction: options.system_instruction,
            contents,
            tools: options.tools,
            tool_config: options.tool_config,
            ttl,
            expire_time: options.expire_time,
            ..types::CachedContent::default()
        },
    })
}

/// Flattens nested maps into dotted paths, e.g. `{"a": {"b": 1}}` becomes
/// `a.b`. Values under `ttl` and `expire_time` are kept whole since they are
/// leaves even when given as `{"seconds": n}` objects.
pub fn flatten_update_paths(updates: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut flat = Vec::new();
    flatten_into(&mut flat, None, updates);
    flat
}

fn flatten_into(flat: &mut Vec<(String, Value)>, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() && !is_leaf_path(&path) => {
                flatten_into(flat, Some(&path), inner);
            }
            _ => flat.push((path, value.clone())),
        }
    }
}

fn is_leaf_path(path: &str) -> bool {
    matches!(path, "ttl" | "expire_time")
}

/// Entry point for cached content operations on one client.
#[derive(Clone)]
pub struct CachedContents {
    service: Arc<dyn CachedContentService>,
}

impl CachedContents {
    /// Wraps a service.
    pub fn new(service: Arc<dyn CachedContentService>) -> Self {
        Self { service }
    }

    /// Uses `client`'s cached content service.
    pub fn from_client(client: &dyn GenAiClient) -> Self {
        Self::new(client.cached_content())
    }

    /// Uses the default client.
    pub fn from_default_client() -> GenAiResult<Self> {
        Ok(Self::from_client(default_client()?.as_ref()))
    }

    /// Creates cached content for `model`. A model without a `/` is looked
    /// up under `models/`.
    ///
    /// # Errors
    ///
    /// Validation errors (both `ttl` and `expire_time`, a display name over
    /// 128 characters, an empty model) are returned before any request.
    pub async fn create(
        &self,
        model: &str,
        options: CreateCachedContentOptions,
    ) -> GenAiResult<CachedContent> {
        let request = prepare_create_request(model, options)?;
        let proto = self.service.create(request).await?;
        Ok(CachedContent::from_proto(proto, Arc::clone(&self.service)))
    }

    /// Fetches cached content. `test-id` is read as `cachedContents/test-id`.
    pub async fn get(&self, name: &str) -> GenAiResult<CachedContent> {
        let proto = self.service.get(name).await?;
        Ok(CachedContent::from_proto(proto, Arc::clone(&self.service)))
    }

    /// Lazily lists cached content, `page_size` items per request
    /// (default [`DEFAULT_PAGE_SIZE`]).
    pub fn list(&self, page_size: Option<u32>) -> Pager<CachedContent> {
        let service = Arc::clone(&self.service);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        Pager::new(move |page_token| {
            let service = Arc::clone(&service);
            async move {
                let response = service
                    .list(Some(ListParams {
                        page_size: Some(page_size),
                        page_token,
                    }))
                    .await?;
                let items = response
                    .cached_contents
                    .into_iter()
                    .map(|proto| CachedContent::from_proto(proto, Arc::clone(&service)))
                    .collect();
                Ok(Page::new(items, response.next_page_token))
            }
        })
    }

    /// Deletes cached content by name without fetching it first.
    pub async fn delete(&self, name: &str) -> GenAiResult<()> {
        self.service.delete(name).await
    }
}

impl fmt::Debug for CachedContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedContents").finish_non_exhaustive()
    }
}

/// Local snapshot of a cached content resource.
///
/// Reads never touch the network; `update` and `delete` issue one request
/// each.
#[derive(Clone)]
pub struct CachedContent {
    proto: types::CachedContent,
    service: Arc<dyn CachedContentService>,
}

impl CachedContent {
    /// Wraps a record returned by the API.
    pub fn from_proto(proto: types::CachedContent, service: Arc<dyn CachedContentService>) -> Self {
        Self { proto, service }
    }

    /// Creates cached content through the default client.
    pub async fn create(model: &str, options: CreateCachedContentOptions) -> GenAiResult<Self> {
        CachedContents::from_default_client()?.create(model, options).await
    }

    /// Fetches cached content through the default client.
    pub async fn get(name: &str) -> GenAiResult<Self> {
        CachedContents::from_default_client()?.get(name).await
    }

    /// Lists cached content through the default client.
    pub fn list(page_size: Option<u32>) -> GenAiResult<Pager<Self>> {
        Ok(CachedContents::from_default_client()?.list(page_size))
    }

    /// Resource name, `cachedContents/{id}`.
    pub fn name(&self) -> &str {
        self.proto.name.as_deref().unwrap_or_default()
    }

    /// Model the content was created for.
    pub fn model(&self) -> &str {
        self.proto.model.as_deref().unwrap_or_default()
    }

    /// Display name, empty when unset.
    pub fn display_name(&self) -> &str {
        self.proto.display_name.as_deref().unwrap_or_default()
    }

    /// System instruction.
    pub fn system_instruction(&self) -> Option<&Content> {
        self.proto.system_instruction.as_ref()
    }

    /// Cached contents. The API does not echo them back on get or list.
    pub fn contents(&self) -> &[Content] {
        &self.proto.contents
    }

    /// Tools.
    pub fn tools(&self) -> &[Tool] {
        &self.proto.tools
    }

    /// Tool configuration.
    pub fn tool_config(&self) -> Option<&ToolConfig> {
        self.proto.tool_config.as_ref()
    }

    /// Token accounting.
    pub fn usage_metadata(&self) -> CachedContentUsageMetadata {
        self.proto.usage_metadata.unwrap_or_default()
    }

    /// Creation time.
    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.proto.create_time
    }

    /// Last update time.
    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.proto.update_time
    }

    /// Expiry instant.
    pub fn expire_time(&self) -> Option<DateTime<Utc>> {
        self.proto.expire_time.map(Into::into)
    }

    /// Lifetime staged by the last update, until the response replaces it.
    pub fn ttl(&self) -> Option<Ttl> {
        self.proto.ttl
    }

    /// The wire record.
    pub fn as_proto(&self) -> &types::CachedContent {
        &self.proto
    }

    /// Unwraps the wire record.
    pub fn into_proto(self) -> types::CachedContent {
        self.proto
    }

    /// JSON view with the API's field names.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.proto).unwrap_or(Value::Null)
    }

    /// Updates the resource's expiry.
    ///
    /// `updates` maps field paths to values. Nested maps are flattened into
    /// dotted paths. Only `ttl` and `expire_time` are accepted, and not both
    /// at once. Values are coerced as by [`Ttl::from_json`] and
    /// [`ExpireTime::from_json`].
    ///
    /// The staged values are written into this object before the request is
    /// sent; on success the object is replaced by the server's record.
    ///
    /// # Errors
    ///
    /// Any other path, or both paths together, fails validation before a
    /// request is made.
    pub async fn update(&mut self, updates: Map<String, Value>) -> GenAiResult<&mut Self> {
        if updates.contains_key("ttl") && updates.contains_key("expire_time") {
            return Err(exclusive_expiry());
        }

        let flat = flatten_update_paths(&updates);
        let paths: Vec<&str> = flat.iter().map(|(path, _)| path.as_str()).collect();
        validate_update_paths(&paths)?;

        let mut staged = types::CachedContent {
            name: Some(self.name().to_string()),
            ..types::CachedContent::default()
        };
        let mut mask = FieldMask::default();

        for (path, value) in &flat {
            match path.as_str() {
                "ttl" => staged.ttl = Some(Ttl::from_json(value)?),
                "expire_time" => staged.expire_time = Some(ExpireTime::from_json(value)?),
                other => {
                    return Err(GenAiError::validation(
                        other,
                        format!("Bad update name: only `ttl` or `expire_time` can be updated, got `{other}`"),
                    ))
                }
            }
            mask.push(path.as_str());
        }

        if mask.is_empty() {
            return Err(GenAiError::validation(
                "update_mask",
                "At least one of `ttl` or `expire_time` must be updated",
            ));
        }

        if staged.ttl.is_some() {
            self.proto.ttl = staged.ttl;
        }
        if staged.expire_time.is_some() {
            self.proto.expire_time = staged.expire_time;
        }

        let updated = self
            .service
            .update(UpdateCachedContentRequest {
                cached_content: staged,
                update_mask: mask,
            })
            .await?;
        self.proto = updated;

        Ok(self)
    }

    /// Sets a new lifetime, counted from now by the server.
    pub async fn update_ttl(&mut self, ttl: impl Into<Ttl>) -> GenAiResult<&mut Self> {
        let mut updates = Map::new();
        updates.insert("ttl".to_string(), Value::String(ttl.into().to_proto_string()));
        self.update(updates).await
    }

    /// Sets a new expiry instant.
    pub async fn update_expire_time(
        &mut self,
        expire_time: impl Into<ExpireTime>,
    ) -> GenAiResult<&mut Self> {
        let mut updates = Map::new();
        updates.insert(
            "expire_time".to_string(),
            Value::String(expire_time.into().to_rfc3339()),
        );
        self.update(updates).await
    }

    /// Deletes the resource. Deleting twice surfaces the not-found error.
    pub async fn delete(&self) -> GenAiResult<()> {
        self.service.delete(self.name()).await
    }
}

impl fmt::Debug for CachedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedContent").field("proto", &self.proto).finish_non_exhaustive()
    }
}

impl fmt::Display for CachedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::pretty::prettyprint("CachedContent", &self.to_json()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FunctionCallingMode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn options() -> CreateCachedContentOptions {
        CreateCachedContentOptions::new().content("hello")
    }

    #[test]
    fn test_prepare_create_request_defaults() {
        let request = prepare_create_request("gemini-1.5-pro", options()).unwrap();
        let cc = request.cached_content;

        assert_eq!(cc.model.as_deref(), Some("models/gemini-1.5-pro"));
        assert_eq!(cc.ttl, Some(DEFAULT_TTL));
        assert!(cc.expire_time.is_none());
        assert_eq!(cc.contents[0].role, Some(Role::User));
    }

    #[test]
    fn test_prepare_create_request_keeps_expire_time() {
        let expire: ExpireTime = "2030-01-01T00:00:00Z".parse().unwrap();
        let request = prepare_create_request("models/m", options().expire_time(expire)).unwrap();

        assert_eq!(request.cached_content.ttl, None);
        assert_eq!(request.cached_content.expire_time, Some(expire));
    }

    #[test]
    fn test_prepare_create_request_exclusive_expiry() {
        let expire: ExpireTime = "2030-01-01T00:00:00Z".parse().unwrap();
        let err = prepare_create_request("m", options().ttl(60u64).expire_time(expire)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_prepare_create_request_display_name_limit() {
        assert!(prepare_create_request("m", options().display_name("x".repeat(128))).is_ok());
        let err = prepare_create_request("m", options().display_name("x".repeat(129))).unwrap_err();
        assert!(err.to_string().contains("display_name"));
    }

    #[test]
    fn test_last_content_role_only_when_missing() {
        let opts = CreateCachedContentOptions::new()
            .content("first")
            .content(Content::model("second"));
        let request = prepare_create_request("m", opts).unwrap();

        assert_eq!(request.cached_content.contents[0].role, None);
        assert_eq!(request.cached_content.contents[1].role, Some(Role::Model));
    }

    #[test]
    fn test_functions_share_one_tool() {
        let opts = options()
            .function(FunctionDeclaration::new("a", "first"))
            .function(FunctionDeclaration::new("b", "second"))
            .tool_config(FunctionCallingMode::Auto);
        let request = prepare_create_request("m", opts).unwrap();

        assert_eq!(request.cached_content.tools.len(), 1);
        assert_eq!(
            request.cached_content.tools[0].function_declarations.as_ref().map(Vec::len),
            Some(2)
        );
        assert_eq!(request.cached_content.tool_config, Some(ToolConfig::from(FunctionCallingMode::Auto)));
    }

    #[test]
    fn test_flatten_update_paths() {
        let updates = json!({
            "ttl": {"seconds": 10},
            "usage_metadata": {"total_token_count": 5},
            "display_name": "x"
        });
        let flat = flatten_update_paths(updates.as_object().unwrap());
        let paths: Vec<&str> = flat.iter().map(|(p, _)| p.as_str()).collect();

        assert_eq!(paths, vec!["display_name", "ttl", "usage_metadata.total_token_count"]);
        assert_eq!(flat[1].1, json!({"seconds": 10}));
    }
}
