//! Resource name normalization.
//!
//! The API addresses everything by `collection/id`; callers usually have
//! just the id.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of cached content resource names.
pub const CACHED_CONTENTS_PREFIX: &str = "cachedContents/";

/// Prefix of model resource names.
pub const MODELS_PREFIX: &str = "models/";

// A bare model name with no namespace, e.g. `gemini-pro-001`.
#[allow(clippy::expect_used)]
static BARE_MODEL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+-\w+-\d+$").expect("bare model name pattern is valid"));

/// `test-id` becomes `cachedContents/test-id`; names already containing the
/// collection are returned as-is.
pub fn cached_content_name(name: &str) -> String {
    if name.contains(CACHED_CONTENTS_PREFIX) {
        name.to_string()
    } else {
        format!("{CACHED_CONTENTS_PREFIX}{name}")
    }
}

/// Model name for cached content creation: anything without a `/` is
/// treated as a model id.
pub fn creation_model_name(model: &str) -> String {
    if model.contains('/') {
        model.to_string()
    } else {
        format!("{MODELS_PREFIX}{model}")
    }
}

/// Model name for `models.get`: only bare `word-word-digits` ids are
/// prefixed, everything else passes through.
pub fn model_name(name: &str) -> String {
    if BARE_MODEL_NAME.is_match(name) {
        format!("{MODELS_PREFIX}{name}")
    } else {
        name.to_string()
    }
}
