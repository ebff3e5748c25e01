//! Common test utilities for provider tests.

use std::sync::{Arc, Mutex};

use flashgen::{DeepSeekProvider, GenerationProgress, Stage};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key used by every test provider.
pub const API_KEY: &str = "sk-test";

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a provider pointed at the mock server.
pub fn provider_for_mock(server: &MockServer) -> DeepSeekProvider {
    DeepSeekProvider::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .build()
        .unwrap()
}

/// Create a successful completion whose message is `content`.
#[allow(dead_code)]
pub fn mock_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 80,
            "total_tokens": 200
        }
    }))
}

/// Create an error response in the provider's format.
#[allow(dead_code)] // Not all test files use this
pub fn mock_api_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": {"message": message, "type": "invalid_request_error"}
    }))
}

/// Mount a completion mock (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Records every progress snapshot it receives.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct ProgressLog {
    seen: Arc<Mutex<Vec<GenerationProgress>>>,
}

#[allow(dead_code)]
impl ProgressLog {
    pub fn callback(&self) -> impl Fn(GenerationProgress) + Send + Sync + 'static {
        let seen = Arc::clone(&self.seen);
        move |progress| seen.lock().unwrap().push(progress)
    }

    pub fn snapshots(&self) -> Vec<GenerationProgress> {
        self.seen.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.snapshots().iter().map(|p| p.stage).collect()
    }
}
