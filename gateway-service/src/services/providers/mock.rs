//! Mock provider implementation for testing.

use super::{GenerationInput, ProviderError, TextProvider};
use async_trait::async_trait;
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock text provider returning a canned outcome and recording each call.
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_call: Mutex<Option<RecordedCall>>,
}

/// Arguments of the most recent `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub input: GenerationInput,
}

impl MockTextProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, ProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Number of times `generate` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.last_call
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        _credential: &Secret<String>,
        model: &str,
        input: &GenerationInput,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut guard) = self.last_call.lock() {
            *guard = Some(RecordedCall {
                model: model.to_string(),
                input: input.clone(),
            });
        }

        self.outcome.clone()
    }
}
