use super::persona::{Language, Persona};
use super::{PromptStrategy, ResponseShape};
use crate::error::GatewayError;
use crate::services::GenerationInput;
use serde::Deserialize;
use validator::Validate;

const MISSING_QUERY: &str = "Missing 'query' in request body";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ConsultRequest {
    #[validate(required, length(min = 1))]
    pub query: Option<String>,
    /// `"zh"` or `"en"`.
    pub language: Option<String>,
    pub persona: Option<String>,
    /// Text extracted from a user attachment.
    pub context: Option<String>,
}

/// Builds a persona-styled prompt around the client's question.
#[derive(Debug, Clone)]
pub struct Templated {
    model: String,
}

impl Templated {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// Rules, role, optional attachment, then the question, separated by blank
/// lines. Empty segments are dropped rather than leaving blank gaps.
pub fn compose_prompt(
    query: &str,
    language: Language,
    persona: Persona,
    context: Option<&str>,
) -> String {
    let segments = [
        Some(language.rules().to_string()),
        Some(persona.role(language).to_string()),
        context
            .filter(|c| !c.is_empty())
            .map(|c| language.context_block(c)),
        Some(language.question_line(query)),
    ];

    segments
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl PromptStrategy for Templated {
    type Input = ConsultRequest;

    fn name(&self) -> &'static str {
        "consult"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn shape(&self) -> ResponseShape {
        ResponseShape {
            result_field: "text",
            detail_field: "detail",
        }
    }

    fn missing_field_message(&self) -> &'static str {
        MISSING_QUERY
    }

    fn build(&self, input: ConsultRequest) -> Result<GenerationInput, GatewayError> {
        let missing = || GatewayError::Validation(MISSING_QUERY.to_string());

        input.validate().map_err(|_| missing())?;
        let query = input.query.as_deref().ok_or_else(missing)?;

        let language = Language::from_code(input.language.as_deref());
        let persona = Persona::from_id(input.persona.as_deref());

        tracing::debug!(
            language = language.code(),
            persona = persona.id(),
            has_context = input.context.as_deref().is_some_and(|c| !c.is_empty()),
            "Composing consult prompt"
        );

        Ok(GenerationInput::UserMessage(compose_prompt(
            query,
            language,
            persona,
            input.context.as_deref(),
        )))
    }
}
