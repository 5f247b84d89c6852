//! Endpoint paths for the REST API.
//!
//! Paths are relative to `{base_url}/{api_version}/`.

/// Collection path for cached contents.
pub const CACHED_CONTENTS: &str = "cachedContents";

/// Collection path for models.
pub const MODELS: &str = "models";

/// Path for a single resource, given its full resource name.
///
/// ```
/// use integrations_genai::transport::endpoints;
///
/// assert_eq!(endpoints::resource("cachedContents/abc"), "cachedContents/abc");
/// assert_eq!(endpoints::resource("/models/gemini-1.0-pro-001"), "models/gemini-1.0-pro-001");
/// ```
pub fn resource(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}
