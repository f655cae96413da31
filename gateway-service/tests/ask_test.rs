//! `/api/ask`: raw prompt passthrough.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{router_with, send, ASK_MODEL};
use gateway_service::services::providers::mock::MockTextProvider;
use gateway_service::services::{GenerationInput, ProviderError};
use serde_json::json;
use std::sync::Arc;

const KEY: Option<&str> = Some("test-api-key");

#[tokio::test]
async fn valid_prompt_returns_model_text() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(
        router_with(provider.clone(), KEY),
        Method::POST,
        "/api/ask",
        Some(r#"{"prompt": "Say T"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"response": "T"}));
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    assert_eq!(provider.calls(), 1);
    let call = provider.last_call().unwrap();
    assert_eq!(call.model, ASK_MODEL);
    assert_eq!(call.input, GenerationInput::Text("Say T".to_string()));
}

#[tokio::test]
async fn unsupported_methods_return_405_without_calling_upstream() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(router_with(provider.clone(), KEY), method.clone(), "/api/ask", None).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(response.json(), json!({"error": "Method Not Allowed"}));
        assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn options_returns_204_with_cors_headers() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(router_with(provider.clone(), KEY), Method::OPTIONS, "/api/ask", None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "POST, OPTIONS"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type"
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn options_does_not_need_a_credential() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(router_with(provider, None), Method::OPTIONS, "/api/ask", None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_credential_returns_500_without_calling_upstream() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(
        router_with(provider.clone(), None),
        Method::POST,
        "/api/ask",
        Some(r#"{"prompt": "hello"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({"error": "Server configuration error: Missing API Key"})
    );
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn credential_is_checked_before_the_body() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(router_with(provider, None), Method::POST, "/api/ask", Some("{}")).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_or_empty_prompt_returns_400_without_calling_upstream() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    for body in [
        Some("{}"),
        Some(r#"{"prompt": ""}"#),
        Some(r#"{"prompt": null}"#),
        Some("not json"),
        None,
    ] {
        let response = send(router_with(provider.clone(), KEY), Method::POST, "/api/ask", body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(
            response.json(),
            json!({"error": "Missing 'prompt' in request body"})
        );
        assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_returns_500_with_details() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::NetworkError(
        "timeout".to_string(),
    )));

    let response = send(
        router_with(provider.clone(), KEY),
        Method::POST,
        "/api/ask",
        Some(r#"{"prompt": "hello"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(
        body["error"],
        "An error occurred while communicating with the AI service."
    );
    assert!(body["details"].as_str().unwrap().contains("timeout"));
    assert!(body.get("detail").is_none());
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    // No retry
    assert_eq!(provider.calls(), 1);
}

/// Larger than axum's default body limit.
fn oversized_body() -> String {
    format!(r#"{{"prompt": "{}"}}"#, "a".repeat(3 * 1024 * 1024))
}

#[tokio::test]
async fn oversized_body_returns_json_413_without_calling_upstream() {
    let provider = Arc::new(MockTextProvider::replying("T"));
    let body = oversized_body();

    let response = send(
        router_with(provider.clone(), KEY),
        Method::POST,
        "/api/ask",
        Some(body.as_str()),
    )
    .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json(), json!({"error": "Request body too large"}));
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn oversized_body_without_credential_is_a_configuration_error() {
    let provider = Arc::new(MockTextProvider::replying("T"));
    let body = oversized_body();

    let response = send(
        router_with(provider.clone(), None),
        Method::POST,
        "/api/ask",
        Some(body.as_str()),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({"error": "Server configuration error: Missing API Key"})
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let provider = Arc::new(MockTextProvider::replying("T"));

    let response = send(
        router_with(provider, KEY),
        Method::POST,
        "/api/ask",
        Some(r#"{"prompt": "hello"}"#),
    )
    .await;

    assert!(response.headers.contains_key("x-request-id"));
}
