use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST endpoint, overridable for tests and regional deployments.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used by both endpoints unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    /// When set, spans are exported over OTLP to this endpoint.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Absent is not a startup failure: every generation request answers 500
    /// until it is configured.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for `/api/ask` (raw prompt passthrough).
    pub ask_model: String,
    /// Model for `/api/consult` (persona-templated prompt).
    pub consult_model: String,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GatewayConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: credential_from(env::var("GEMINI_API_KEY").ok()),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                ask_model: get_env("GATEWAY_ASK_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                consult_model: get_env("GATEWAY_CONSULT_MODEL", Some(DEFAULT_MODEL), is_prod)?,
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|e| !e.is_empty()),
        })
    }

    /// True when a non-empty credential is configured.
    pub fn has_credential(&self) -> bool {
        self.google.api_key.is_some()
    }
}

/// Blank values count as missing.
pub fn credential_from(raw: Option<String>) -> Option<Secret<String>> {
    raw.map(Secret::new)
        .filter(|key| !key.expose_secret().trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET_KEY: &str = "GATEWAY_CONFIG_TEST_NEVER_SET";

    #[test]
    fn get_env_uses_default_outside_prod() {
        let value = get_env(UNSET_KEY, Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env(UNSET_KEY, Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        assert!(get_env(UNSET_KEY, None, false).is_err());
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        assert!(credential_from(None).is_none());
        assert!(credential_from(Some(String::new())).is_none());
        assert!(credential_from(Some("   ".to_string())).is_none());

        let key = credential_from(Some("abc".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "abc");
    }
}
