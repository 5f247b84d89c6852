//! Local checks run before any cached content request is sent.

use crate::error::{GenAiError, GenAiResult, RequestError, ValidationDetail};
use crate::types::{CreateCachedContentRequest, UpdateCachedContentRequest};

/// Longest accepted `display_name`, in Unicode scalar values.
pub const MAX_DISPLAY_NAME_CHARS: usize = 128;

/// Field paths that `cachedContents.patch` accepts.
pub const UPDATABLE_PATHS: [&str; 2] = ["ttl", "expire_time"];

const EXCLUSIVE_EXPIRY: &str =
    "Exclusive arguments: provide either `ttl` or `expire_time`, not both";

fn detail(field: impl Into<String>, description: impl Into<String>) -> ValidationDetail {
    ValidationDetail {
        field: field.into(),
        description: description.into(),
    }
}

fn fail(message: &str, details: Vec<ValidationDetail>) -> GenAiResult<()> {
    if details.is_empty() {
        return Ok(());
    }
    let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
    Err(GenAiError::Request(RequestError::ValidationError {
        message: format!("{message}: {}", fields.join(", ")),
        details,
    }))
}

/// Validate a create cached content request.
pub fn validate_create_request(request: &CreateCachedContentRequest) -> GenAiResult<()> {
    let cc = &request.cached_content;
    let mut details = Vec::new();

    if cc.model.as_deref().map_or(true, str::is_empty) {
        details.push(detail("model", "Model is required and must not be empty"));
    }

    if let Some(name) = &cc.display_name {
        if let Err(d) = check_display_name(name) {
            details.push(d);
        }
    }

    for (idx, content) in cc.contents.iter().enumerate() {
        if content.parts.is_empty() {
            details.push(detail(
                format!("contents[{idx}].parts"),
                "Content must have at least one part",
            ));
        }
    }

    if cc.ttl.is_some() && cc.expire_time.is_some() {
        details.push(detail("ttl/expire_time", EXCLUSIVE_EXPIRY));
    }

    fail("Invalid create cached content request", details)
}

/// Validate an update cached content request.
pub fn validate_update_request(request: &UpdateCachedContentRequest) -> GenAiResult<()> {
    let cc = &request.cached_content;
    let mut details = Vec::new();

    if cc.name.as_deref().map_or(true, str::is_empty) {
        details.push(detail("name", "Cached content name must not be empty"));
    }

    if request.update_mask.is_empty() {
        details.push(detail("update_mask", "At least one of `ttl` or `expire_time` must be updated"));
    }

    if let Err(GenAiError::Request(RequestError::ValidationError { details: d, .. })) =
        validate_update_paths(request.update_mask.paths())
    {
        details.extend(d);
    }

    if request.update_mask.contains("ttl") && cc.ttl.is_none() {
        details.push(detail("ttl", "Listed in the update mask but not set"));
    }
    if request.update_mask.contains("expire_time") && cc.expire_time.is_none() {
        details.push(detail("expire_time", "Listed in the update mask but not set"));
    }

    fail("Invalid update cached content request", details)
}

/// Rejects any path outside [`UPDATABLE_PATHS`], and `ttl` together with
/// `expire_time`.
pub fn validate_update_paths<S: AsRef<str>>(paths: &[S]) -> GenAiResult<()> {
    let mut details = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !UPDATABLE_PATHS.contains(&path) {
            details.push(detail(
                path,
                format!("Bad update name: only `ttl` or `expire_time` can be updated, got `{path}`"),
            ));
        }
    }

    let has = |p: &str| paths.iter().any(|q| q.as_ref() == p);
    if has("ttl") && has("expire_time") {
        details.push(detail("ttl/expire_time", EXCLUSIVE_EXPIRY));
    }

    fail("Invalid cached content update", details)
}

/// Checks the 128-character limit on display names.
pub fn validate_display_name(display_name: &str) -> GenAiResult<()> {
    match check_display_name(display_name) {
        Ok(()) => Ok(()),
        Err(d) => fail("Invalid display name", vec![d]),
    }
}

fn check_display_name(display_name: &str) -> Result<(), ValidationDetail> {
    let chars = display_name.chars().count();
    if chars > MAX_DISPLAY_NAME_CHARS {
        return Err(detail(
            "display_name",
            format!("must be no more than {MAX_DISPLAY_NAME_CHARS} unicode characters, got {chars}"),
        ));
    }
    Ok(())
}

/// Validate cached content name format.
pub fn validate_cached_content_name(name: &str) -> GenAiResult<()> {
    if name.trim().is_empty() {
        return Err(GenAiError::validation("name", "Cached content name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CachedContent, Content, ExpireTime, FieldMask, Ttl};

    fn create(cc: CachedContent) -> CreateCachedContentRequest {
        CreateCachedContentRequest { cached_content: cc }
    }

    fn base() -> CachedContent {
        CachedContent {
            model: Some("models/gemini-1.5-pro".to_string()),
            contents: vec![Content::user("System context")],
            ..CachedContent::default()
        }
    }

    fn fields(err: GenAiError) -> Vec<String> {
        match err {
            GenAiError::Request(RequestError::ValidationError { details, .. }) => {
                details.into_iter().map(|d| d.field).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_create_request_valid() {
        assert!(validate_create_request(&create(base())).is_ok());

        let with_ttl = CachedContent {
            ttl: Some(Ttl::from_secs(600)),
            ..base()
        };
        assert!(validate_create_request(&create(with_ttl)).is_ok());
    }

    #[test]
    fn test_validate_create_request_missing_model() {
        let cc = CachedContent { model: None, ..base() };
        assert_eq!(fields(validate_create_request(&create(cc)).unwrap_err()), ["model"]);
    }

    #[test]
    fn test_validate_create_request_both_ttl_and_expire_time() {
        let cc = CachedContent {
            ttl: Some(Ttl::from_secs(600)),
            expire_time: Some("2024-12-31T23:59:59Z".parse::<ExpireTime>().unwrap()),
            ..base()
        };
        assert_eq!(
            fields(validate_create_request(&create(cc)).unwrap_err()),
            ["ttl/expire_time"]
        );
    }

    #[test]
    fn test_validate_create_request_empty_parts() {
        let cc = CachedContent {
            contents: vec![Content::user("a"), Content::new(vec![])],
            ..base()
        };
        assert_eq!(
            fields(validate_create_request(&create(cc)).unwrap_err()),
            ["contents[1].parts"]
        );
    }

    #[test]
    fn test_display_name_limit_counts_chars() {
        assert!(validate_display_name(&"a".repeat(128)).is_ok());
        assert!(validate_display_name(&"é".repeat(128)).is_ok());
        assert!(validate_display_name(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_update_paths() {
        assert!(validate_update_paths(&["ttl"]).is_ok());
        assert!(validate_update_paths(&["expire_time"]).is_ok());
        assert_eq!(fields(validate_update_paths(&["display_name"]).unwrap_err()), ["display_name"]);
        assert_eq!(
            fields(validate_update_paths(&["ttl", "expire_time"]).unwrap_err()),
            ["ttl/expire_time"]
        );
    }

    #[test]
    fn test_validate_update_request() {
        let valid = UpdateCachedContentRequest {
            cached_content: CachedContent {
                name: Some("cachedContents/abc".to_string()),
                ttl: Some(Ttl::from_secs(60)),
                ..CachedContent::default()
            },
            update_mask: FieldMask::new(["ttl"]),
        };
        assert!(validate_update_request(&valid).is_ok());

        let unset = UpdateCachedContentRequest {
            update_mask: FieldMask::new(["expire_time"]),
            ..valid.clone()
        };
        assert_eq!(fields(validate_update_request(&unset).unwrap_err()), ["expire_time"]);

        let empty = UpdateCachedContentRequest {
            update_mask: FieldMask::default(),
            ..valid
        };
        assert_eq!(fields(validate_update_request(&empty).unwrap_err()), ["update_mask"]);
    }

    #[test]
    fn test_validate_cached_content_name() {
        assert!(validate_cached_content_name("cachedContents/my-cache-123").is_ok());
        assert!(validate_cached_content_name("my-cache").is_ok());
        assert!(validate_cached_content_name("").unwrap_err().is_validation());
    }
}
