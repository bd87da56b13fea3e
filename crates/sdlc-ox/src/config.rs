//! Configuration surface for the assistant.
//!
//! Credentials and endpoints come from the environment (or a programmatic
//! builder); nothing is hardcoded. Backend selection is an explicit enum
//! rather than a flag threaded through call sites.

use std::env;
use std::time::Duration;

use bon::Builder;
use thiserror::Error;
use watsonx_ox::{DEFAULT_BASE_URL, DEFAULT_TOKEN_LIFETIME, Model};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Which completion backend the assistant dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// Greedy decoding with a per-kind temperature.
    #[default]
    Direct,
    /// Render-generate-trim pipeline with a fixed sampling profile.
    Chain,
}

#[derive(Debug, Clone, Builder)]
pub struct Config {
    #[builder(into)]
    pub api_key: String,
    #[builder(into)]
    pub project_id: String,
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub base_url: String,
    #[builder(default = Model::Granite33_8bInstruct.to_string(), into)]
    pub model_id: String,
    #[builder(default)]
    pub backend: BackendKind,
    #[builder(default = DEFAULT_TOKEN_LIFETIME)]
    pub token_lifetime: Duration,
}

impl Config {
    /// Load the configuration from the environment.
    ///
    /// `WATSONX_API_KEY` and `WATSONX_PROJECT_ID` are required;
    /// `WATSONX_URL`, `WATSONX_MODEL_ID`, `SDLC_BACKEND` and
    /// `WATSONX_TOKEN_LIFETIME_SECS` override the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingVar`] for absent required variables,
    /// [`ConfigError::InvalidValue`] for unparseable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("WATSONX_API_KEY")
            .map_err(|_| ConfigError::MissingVar("WATSONX_API_KEY"))?;
        let project_id = env::var("WATSONX_PROJECT_ID")
            .map_err(|_| ConfigError::MissingVar("WATSONX_PROJECT_ID"))?;

        let backend = match env::var("SDLC_BACKEND") {
            Ok(raw) => Some(raw.parse::<BackendKind>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: "SDLC_BACKEND",
                    value: raw.clone(),
                }
            })?),
            Err(_) => None,
        };

        let token_lifetime = match env::var("WATSONX_TOKEN_LIFETIME_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: "WATSONX_TOKEN_LIFETIME_SECS",
                    value: raw.clone(),
                }
            })?)),
            Err(_) => None,
        };

        Ok(Self::builder()
            .api_key(api_key)
            .project_id(project_id)
            .maybe_base_url(env::var("WATSONX_URL").ok())
            .maybe_model_id(env::var("WATSONX_MODEL_ID").ok())
            .maybe_backend(backend)
            .maybe_token_lifetime(token_lifetime)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = Config::builder()
            .api_key("key")
            .project_id("project")
            .build();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model_id, "ibm/granite-3-3-8b-instruct");
        assert_eq!(config.backend, BackendKind::Direct);
        assert_eq!(config.token_lifetime, DEFAULT_TOKEN_LIFETIME);
    }

    #[test]
    fn backend_kind_parses_config_strings() {
        assert_eq!("direct".parse::<BackendKind>(), Ok(BackendKind::Direct));
        assert_eq!("chain".parse::<BackendKind>(), Ok(BackendKind::Chain));
        assert!("pipeline".parse::<BackendKind>().is_err());
    }
}
