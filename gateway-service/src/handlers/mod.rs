//! HTTP handlers for the gateway service.

pub mod generate;
pub mod health;
pub mod metrics;

pub use generate::{generate, GenerateState};
pub use health::{health_check, readiness_check, HealthState};
