//! Prompt-building strategies.
//!
//! Both endpoints share one request handler; what differs between them is
//! captured by a [`PromptStrategy`]: the request body it accepts, how it turns
//! that body into model input, which model it targets, and the JSON field
//! names of its responses.

pub mod passthrough;
pub mod persona;
pub mod templated;

pub use passthrough::{AskRequest, Passthrough};
pub use persona::{Language, Persona};
pub use templated::{compose_prompt, ConsultRequest, Templated};

use crate::error::GatewayError;
use crate::services::GenerationInput;
use serde::de::DeserializeOwned;

/// JSON field names used by an endpoint's responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    /// Key holding the generated text on success.
    pub result_field: &'static str,
    /// Key holding the upstream error message on failure.
    pub detail_field: &'static str,
}

pub trait PromptStrategy: Send + Sync + 'static {
    /// Request body accepted by the endpoint.
    type Input: DeserializeOwned + Send;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;

    fn shape(&self) -> ResponseShape;

    /// Error message for a body lacking the required text field. Also used when
    /// the body is not a JSON object at all.
    fn missing_field_message(&self) -> &'static str;

    /// Validate the body and produce the model input.
    fn build(&self, input: Self::Input) -> Result<GenerationInput, GatewayError>;
}
