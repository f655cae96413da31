use crate::prompt::ResponseShape;
use crate::services::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;

/// Every way a generation request can fail. All of them are terminal for the
/// request: nothing is retried and no partial result is returned.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("An error occurred while communicating with the AI service.")]
    Upstream(#[source] ProviderError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the endpoint's field naming so the error can be rendered.
    pub fn with_shape(self, shape: ResponseShape) -> ShapedError {
        ShapedError { error: self, shape }
    }
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        GatewayError::Upstream(err)
    }
}

/// A [`GatewayError`] paired with the JSON field names of the endpoint that
/// produced it.
#[derive(Debug)]
pub struct ShapedError {
    pub error: GatewayError,
    pub shape: ResponseShape,
}

impl IntoResponse for ShapedError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.error.to_string()));
        if let GatewayError::Upstream(source) = &self.error {
            body.insert(
                self.shape.detail_field.to_string(),
                Value::String(source.to_string()),
            );
        }

        (status, Json(Value::Object(body))).into_response()
    }
}
