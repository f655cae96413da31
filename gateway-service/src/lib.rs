//! gateway-service: proxies client prompts to the Gemini API.
//!
//! `/api/ask` forwards a raw prompt; `/api/consult` wraps a question in a
//! persona and language template. Both run through the same handler.

pub mod config;
pub mod error;
pub mod handlers;
pub mod prompt;
pub mod services;
pub mod startup;
