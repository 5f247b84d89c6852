//! End-to-end tests of the reqwest transport against a local HTTP server.

use integrations_genai::caching::CachedContents;
use integrations_genai::client::{GenAiClient, GenAiClientBuilder};
use integrations_genai::config::AuthMethod;
use integrations_genai::models::get_model_with;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer, auth_method: AuthMethod) -> impl GenAiClient {
    GenAiClientBuilder::new()
        .api_key(SecretString::new("wire-key".to_string()))
        .base_url_str(&server.uri())
        .unwrap()
        .auth_method(auth_method)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_cached_content_over_http() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/cachedContents/abc"))
        .and(header("x-goog-api-key", "wire-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "cachedContents/abc",
            "model": "models/gemini-1.5-flash-001",
            "usageMetadata": {"totalTokenCount": 42},
            "expireTime": "2030-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server, AuthMethod::Header);

    // Act
    let cc = CachedContents::from_client(&client).get("abc").await.unwrap();

    // Assert
    assert_eq!(cc.name(), "cachedContents/abc");
    assert_eq!(cc.usage_metadata().total_token_count, 42);
}

#[tokio::test]
async fn test_update_over_http_sends_mask_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/cachedContents/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "cachedContents/abc"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v1beta/cachedContents/abc"))
        .and(query_param("updateMask", "ttl"))
        .and(body_json(json!({"name": "cachedContents/abc", "ttl": "600s"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "cachedContents/abc",
            "expireTime": "2030-01-01T00:10:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server, AuthMethod::Header);

    let mut cc = CachedContents::from_client(&client).get("abc").await.unwrap();
    cc.update_ttl(600u64).await.unwrap();

    assert_eq!(cc.expire_time().unwrap().to_rfc3339(), "2030-01-01T00:10:00+00:00");
}

#[tokio::test]
async fn test_query_param_auth_and_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/models/gemini-gone-001"))
        .and(query_param("key", "wire-key"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Model not found", "status": "NOT_FOUND"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_client(&server, AuthMethod::QueryParam);

    let err = get_model_with(&client, "gemini-gone-001").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Resource error: Model not found: models/gemini-gone-001");
}
