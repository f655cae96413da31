//! Gemini provider against a stubbed HTTP upstream.

use gateway_service::services::providers::gemini::GeminiTextProvider;
use gateway_service::services::{GenerationInput, ProviderError, TextProvider};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";
const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn credential() -> Secret<String> {
    Secret::new("secret-key".to_string())
}

#[tokio::test]
async fn sends_key_header_and_extracts_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "secret-key"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text": "Say hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": "!"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2, "totalTokenCount": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiTextProvider::new(server.uri());
    let text = provider
        .generate(
            &credential(),
            MODEL,
            &GenerationInput::Text("Say hello".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(text, "Hello!");
}

#[tokio::test]
async fn user_message_is_sent_with_user_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Question: why?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Because."}]}, "finishReason": "STOP"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiTextProvider::new(server.uri());
    let text = provider
        .generate(
            &credential(),
            MODEL,
            &GenerationInput::UserMessage("Question: why?".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(text, "Because.");
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiTextProvider::new(server.uri());
    let err = provider
        .generate(&credential(), MODEL, &GenerationInput::Text("hi".to_string()))
        .await
        .unwrap_err();

    match err {
        ProviderError::ApiError(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("Internal error encountered."));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn too_many_requests_is_rate_limited_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiTextProvider::new(server.uri());
    let err = provider
        .generate(&credential(), MODEL, &GenerationInput::Text("hi".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::RateLimited("quota exceeded".to_string()));
}

#[tokio::test]
async fn blocked_prompt_is_content_filtered() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let provider = GeminiTextProvider::new(server.uri());
    let err = provider
        .generate(&credential(), MODEL, &GenerationInput::Text("hi".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ContentFiltered(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_a_network_error() {
    // Nothing listens on the discard port.
    let provider = GeminiTextProvider::new("http://127.0.0.1:9");
    let err = provider
        .generate(&credential(), MODEL, &GenerationInput::Text("hi".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "network_error");
}
