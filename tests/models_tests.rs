//! Integration tests for model metadata.

use integrations_genai::client::{GenAiClient, GenAiClientBuilder};
use integrations_genai::mocks::MockHttpTransport;
use integrations_genai::models::{get_model_with, list_models_with};
use integrations_genai::transport::HttpMethod;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;

/// Helper to create a client over a mock transport.
fn create_test_client(transport: &Arc<MockHttpTransport>) -> impl GenAiClient {
    GenAiClientBuilder::new()
        .api_key(SecretString::new("test-key".to_string()))
        .transport(transport.clone())
        .build()
        .unwrap()
}

fn model_json(name: &str) -> Value {
    json!({
        "name": name,
        "baseModelId": "gemini-1.5-flash",
        "version": "001",
        "displayName": "Gemini 1.5 Flash",
        "description": "Fast and versatile",
        "inputTokenLimit": 1_048_576,
        "outputTokenLimit": 8192,
        "supportedGenerationMethods": ["generateContent", "createCachedContent"],
        "temperature": 1.0,
        "maxTemperature": 2.0,
        "topP": 0.95,
        "topK": 64
    })
}

#[tokio::test]
async fn test_get_model_rewrites_bare_identifier() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &model_json("models/gemini-flash-001"));
    let client = create_test_client(&transport);

    // Act
    let model = get_model_with(&client, "gemini-flash-001").await.unwrap();

    // Assert
    assert_eq!(model.name, "models/gemini-flash-001");
    assert_eq!(model.input_token_limit, Some(1_048_576));
    assert_eq!(model.top_k, Some(64));
    assert!(model.supports("createCachedContent"));
    transport.verify_request(0, HttpMethod::Get, "/v1beta/models/gemini-flash-001");
}

#[tokio::test]
async fn test_get_model_passes_other_names_through() {
    let cases = [
        ("models/gemini-1.5-pro-001", "/v1beta/models/gemini-1.5-pro-001"),
        ("tunedModels/my-model-42", "/v1beta/tunedModels/my-model-42"),
    ];

    for (name, path) in cases {
        let transport = Arc::new(MockHttpTransport::new());
        transport.enqueue_json_response(200, &model_json(name));
        let client = create_test_client(&transport);

        let model = get_model_with(&client, name).await.unwrap();

        assert_eq!(model.name, name);
        assert_eq!(transport.last_request().unwrap().path(), path);
    }
}

#[tokio::test]
async fn test_get_model_not_found() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_api_error(404, "NOT_FOUND", "Model not found");
    let client = create_test_client(&transport);

    let err = get_model_with(&client, "models/gemini-fake-001").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Resource error: Model not found: models/gemini-fake-001");
}

#[tokio::test]
async fn test_get_model_rejects_empty_name() {
    let transport = Arc::new(MockHttpTransport::new());
    let client = create_test_client(&transport);

    let err = get_model_with(&client, "").await.unwrap_err();

    assert!(err.is_validation());
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_list_models_follows_page_tokens() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(
        200,
        &json!({
            "models": [model_json("models/a-b-1"), model_json("models/a-b-2")],
            "nextPageToken": "next"
        }),
    );
    transport.enqueue_json_response(200, &json!({"models": [model_json("models/a-b-3")]}));
    let client = create_test_client(&transport);

    // Act
    let models = list_models_with(&client, Some(2)).collect_all().await.unwrap();

    // Assert
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["models/a-b-1", "models/a-b-2", "models/a-b-3"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path(), "/v1beta/models");
    assert_eq!(requests[0].query_param("pageSize").as_deref(), Some("2"));
    assert_eq!(requests[1].query_param("pageToken").as_deref(), Some("next"));
}

#[tokio::test]
async fn test_list_models_without_page_size() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &json!({}));
    let client = create_test_client(&transport);

    let models = list_models_with(&client, None).collect_all().await.unwrap();

    assert!(models.is_empty());
    assert_eq!(transport.last_request().unwrap().query_param("pageSize"), None);
}

#[tokio::test]
async fn test_model_display() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &json!({"name": "models/a-b-1", "displayName": "A", "topK": 40}));
    let client = create_test_client(&transport);

    let model = get_model_with(&client, "a-b-1").await.unwrap();

    assert_eq!(
        model.to_string(),
        "Model(\n    display_name='A',\n    name='models/a-b-1',\n    top_k=40\n)"
    );
}
