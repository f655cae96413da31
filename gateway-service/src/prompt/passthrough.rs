use super::{PromptStrategy, ResponseShape};
use crate::error::GatewayError;
use crate::services::GenerationInput;
use serde::Deserialize;
use validator::Validate;

const MISSING_PROMPT: &str = "Missing 'prompt' in request body";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(required, length(min = 1))]
    pub prompt: Option<String>,
}

/// Forwards the client's prompt to the model unchanged.
#[derive(Debug, Clone)]
pub struct Passthrough {
    model: String,
}

impl Passthrough {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl PromptStrategy for Passthrough {
    type Input = AskRequest;

    fn name(&self) -> &'static str {
        "ask"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn shape(&self) -> ResponseShape {
        ResponseShape {
            result_field: "response",
            detail_field: "details",
        }
    }

    fn missing_field_message(&self) -> &'static str {
        MISSING_PROMPT
    }

    fn build(&self, input: AskRequest) -> Result<GenerationInput, GatewayError> {
        let missing = || GatewayError::Validation(MISSING_PROMPT.to_string());

        input.validate().map_err(|_| missing())?;
        let prompt = input.prompt.ok_or_else(missing)?;

        Ok(GenerationInput::Text(prompt))
    }
}
