//! Tests for the provider connection check.

mod common;

use common::{API_KEY, mock_api_error, provider_for_mock, setup_mock_server};
use flashgen::{CardProvider, CostEstimator, DeepSeekProvider};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_models(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connection_ok() {
    let server = setup_mock_server().await;
    mock_models(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "list",
            "data": [{"id": "deepseek-chat", "object": "model", "owned_by": "deepseek"}]
        })),
    )
    .await;

    let provider = provider_for_mock(&server);
    assert!(provider.test_connection().await);
}

#[tokio::test]
async fn test_connection_unauthorized() {
    let server = setup_mock_server().await;
    mock_models(&server, mock_api_error(401, "invalid api key")).await;

    let provider = provider_for_mock(&server);
    assert!(!provider.test_connection().await);
}

#[tokio::test]
async fn test_connection_requires_exactly_200() {
    let server = setup_mock_server().await;
    mock_models(&server, ResponseTemplate::new(204)).await;

    let provider = provider_for_mock(&server);
    assert!(!provider.test_connection().await);
}

#[tokio::test]
async fn test_connection_refused() {
    // Use a port that's almost certainly not in use
    let provider = DeepSeekProvider::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:59999")
        .build()
        .unwrap();

    assert!(!provider.test_connection().await);
}

#[tokio::test]
async fn test_generate_connection_refused_never_panics() {
    let provider = DeepSeekProvider::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:59999")
        .build()
        .unwrap();

    let response = provider
        .generate_cards("text", &Default::default(), None)
        .await;

    assert!(!response.success);
    assert!(response.cards.is_empty());
    assert!(response.error.is_some());
}

#[tokio::test]
async fn test_port_digits_do_not_pick_failure_kind() {
    // The port contains "401"; nothing listens on it.
    let provider = DeepSeekProvider::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:4011")
        .build()
        .unwrap();

    let response = provider
        .generate_cards("text", &Default::default(), None)
        .await;

    assert!(!response.success);
    let message = response.error.unwrap();
    assert!(message.starts_with("DeepSeek API error:"), "got {message}");
    assert!(!message.contains("4011"));
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let server = setup_mock_server().await;
    mock_models(&server, ResponseTemplate::new(200)).await;

    let provider: Box<dyn CardProvider> = Box::new(provider_for_mock(&server));
    assert_eq!(provider.name(), "deepseek");
    assert_eq!(provider.model(), "deepseek-chat");
    assert_eq!(provider.estimate_cost(0.0, 0.0), 0.0);
    assert!(provider.test_connection().await);
}
