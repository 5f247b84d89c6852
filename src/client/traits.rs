//! Client trait definitions.

use std::sync::Arc;

use crate::services::{CachedContentService, ModelsService};

/// Entry point to every service of the API.
///
/// Services are handed out as `Arc`s so façade objects (a fetched
/// `CachedContent`, a `Pager`) can keep using them after the borrow of the
/// client ends.
pub trait GenAiClient: Send + Sync {
    /// Access the cached content service.
    fn cached_content(&self) -> Arc<dyn CachedContentService>;

    /// Access the models service.
    fn models(&self) -> Arc<dyn ModelsService>;
}
