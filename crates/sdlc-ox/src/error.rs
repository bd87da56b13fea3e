use thiserror::Error;
use watsonx_ox::WatsonxRequestError;

use crate::config::ConfigError;
use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// Errors from the provider client
    #[error(transparent)]
    Request(#[from] WatsonxRequestError),

    /// A prompt template could not be rendered
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The assistant could not be configured
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Render a failure as the human-readable string shown to the user.
///
/// Transport, timeout, and HTTP-status failures each get their own message;
/// the presentation layer never sees a typed error.
#[must_use]
pub fn describe_failure(error: &AssistantError) -> String {
    match error {
        AssistantError::Request(WatsonxRequestError::ReqwestError(e)) if e.is_timeout() => {
            format!("Timeout error: {e} - the generation service took too long to respond")
        }
        AssistantError::Request(WatsonxRequestError::ReqwestError(e)) if e.is_connect() => {
            format!("Connection error: {e} - check the network or the service URL")
        }
        AssistantError::Request(
            error @ (WatsonxRequestError::SerdeError(_)
            | WatsonxRequestError::JsonDeserializationError(_)),
        ) => {
            format!("{error} - could not parse the generation response")
        }
        // InvalidRequestError already renders as "HTTP error {status}: {detail}"
        AssistantError::Request(error) => error.to_string(),
        other => other.to_string(),
    }
}
