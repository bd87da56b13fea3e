use serde::{Deserialize, Serialize};

use crate::WatsonxRequestError;

/// Why the model stopped generating tokens.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// Generation has not finished yet.
    NotFinished,
    /// The configured `max_new_tokens` limit was reached.
    MaxTokens,
    /// An end-of-sequence token was produced.
    EosToken,
    /// The request was cancelled.
    Cancelled,
    /// The service-side time limit was reached.
    TimeLimit,
    /// One of the configured stop sequences matched.
    StopSequence,
    /// The token limit of the model was reached.
    TokenLimit,
    /// Generation stopped because of an error.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub results: Vec<GeneratedText>,
}

impl TextGenerationResponse {
    /// The first result's text, if the service returned any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.results.first().map(|r| r.generated_text.as_str())
    }

    /// Consume the response and return the first result's text.
    ///
    /// # Errors
    ///
    /// [`WatsonxRequestError::UnexpectedResponse`] when the `results` array
    /// is empty.
    pub fn into_text(self) -> Result<String, WatsonxRequestError> {
        self.results
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or_else(|| {
                WatsonxRequestError::UnexpectedResponse(
                    "generation response contained no results".to_string(),
                )
            })
    }
}
