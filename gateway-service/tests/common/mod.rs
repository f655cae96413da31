#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use gateway_service::config::{GatewayConfig, GoogleConfig, ModelConfig};
use gateway_service::services::providers::mock::MockTextProvider;
use gateway_service::services::TextProvider;
use gateway_service::startup::build_router;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const ASK_MODEL: &str = "gemini-ask-test";
pub const CONSULT_MODEL: &str = "gemini-consult-test";

pub fn test_config(api_key: Option<&str>) -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig {
            port: 0,
            log_level: "debug".to_string(),
        },
        google: GoogleConfig {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            api_base: "http://127.0.0.1:9".to_string(),
        },
        models: ModelConfig {
            ask_model: ASK_MODEL.to_string(),
            consult_model: CONSULT_MODEL.to_string(),
        },
        otlp_endpoint: None,
    }
}

/// Router backed by the given mock, with or without a credential.
pub fn router_with(provider: Arc<MockTextProvider>, api_key: Option<&str>) -> Router {
    let provider: Arc<dyn TextProvider> = provider;
    build_router(&test_config(api_key), provider, None)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

pub async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }

    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("Failed to build request");

    let response = router
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
