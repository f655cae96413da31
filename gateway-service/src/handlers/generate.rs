//! The generation endpoint shared by `/api/ask` and `/api/consult`.
//!
//! Flow: method check, credential check, body validation, one upstream call,
//! response. Any failure short-circuits straight to an error response.

use crate::error::GatewayError;
use crate::prompt::PromptStrategy;
use crate::services::metrics::record_provider_call;
use crate::services::TextProvider;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::Secret;
use serde_json::{Map, Value};
use service_core::middleware::cors::preflight_headers;
use std::sync::Arc;
use std::time::Instant;

/// Per-endpoint state: the strategy plus the dependencies every endpoint
/// shares.
pub struct GenerateState<S> {
    pub strategy: Arc<S>,
    pub provider: Arc<dyn TextProvider>,
    pub credential: Option<Secret<String>>,
}

impl<S> GenerateState<S> {
    pub fn new(
        strategy: S,
        provider: Arc<dyn TextProvider>,
        credential: Option<Secret<String>>,
    ) -> Self {
        Self {
            strategy: Arc::new(strategy),
            provider,
            credential,
        }
    }
}

impl<S> Clone for GenerateState<S> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
            provider: Arc::clone(&self.provider),
            credential: self.credential.clone(),
        }
    }
}

/// Mounted with `any(...)` so that unsupported methods get a JSON 405 body
/// instead of axum's empty one. Body buffering failures are surfaced only
/// after the method and credential checks.
#[tracing::instrument(skip_all)]
pub async fn generate<S: PromptStrategy>(
    State(state): State<GenerateState<S>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match handle(&state, method, body).await {
        Ok(response) => response,
        Err(err) => err.with_shape(state.strategy.shape()).into_response(),
    }
}

async fn handle<S: PromptStrategy>(
    state: &GenerateState<S>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let strategy = state.strategy.as_ref();

    if method == Method::OPTIONS {
        return Ok((StatusCode::NO_CONTENT, preflight_headers()).into_response());
    }

    if method != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    let Some(credential) = state.credential.as_ref() else {
        tracing::error!(
            endpoint = strategy.name(),
            "Missing GEMINI_API_KEY in environment variables"
        );
        return Err(GatewayError::Configuration("Missing API Key".to_string()));
    };

    let body = body.map_err(|rejection| {
        tracing::warn!(
            endpoint = strategy.name(),
            error = %rejection.body_text(),
            "Failed to read request body"
        );
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            GatewayError::PayloadTooLarge
        } else {
            GatewayError::Validation(strategy.missing_field_message().to_string())
        }
    })?;

    let input: S::Input = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(endpoint = strategy.name(), error = %e, "Unreadable request body");
        GatewayError::Validation(strategy.missing_field_message().to_string())
    })?;

    let generation_input = strategy.build(input)?;
    let model = strategy.model();

    let started = Instant::now();
    let result = state
        .provider
        .generate(credential, model, &generation_input)
        .await;
    let elapsed = started.elapsed();

    let text = match result {
        Ok(text) => {
            record_provider_call(state.provider.name(), model, "ok", elapsed);
            tracing::info!(
                endpoint = strategy.name(),
                model = %model,
                latency_ms = elapsed.as_millis() as u64,
                response_len = text.len(),
                "Generation completed"
            );
            text
        }
        Err(e) => {
            record_provider_call(state.provider.name(), model, e.kind(), elapsed);
            tracing::error!(
                endpoint = strategy.name(),
                model = %model,
                error = %e,
                "Error calling generative language API"
            );
            return Err(GatewayError::Upstream(e));
        }
    };

    let mut body = Map::new();
    body.insert(strategy.shape().result_field.to_string(), Value::String(text));

    Ok((StatusCode::OK, Json(Value::Object(body))).into_response())
}
