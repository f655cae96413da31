pub mod metrics;
pub mod providers;

pub use providers::{GenerationInput, ProviderError, TextProvider};
