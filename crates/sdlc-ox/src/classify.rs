//! Extraction of the classification JSON from free-form model text.
//!
//! Two explicit stages: locate the candidate object (first `{` to last
//! `}`), then parse it strictly. Any failure becomes a tagged fallback
//! carrying the raw model text instead of failing the whole request.

use serde::Serialize;
use serde_json::{Map, Value};

/// Slice the candidate JSON object out of `text`.
///
/// Returns `None` when there is no `{`, no `}`, or the last `}` precedes
/// the first `{`. No validation happens here; the slice may still fail to
/// parse.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Outcome of a classification request.
///
/// Serializes either as the classified object itself or as
/// `{"error": ..., "raw_response": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassificationResult {
    Parsed(Map<String, Value>),
    Failed { error: String, raw_response: String },
}

impl ClassificationResult {
    /// Parse a model response into a classification outcome.
    pub fn parse(response: &str) -> Self {
        let Some(candidate) = extract_json_object(response) else {
            return Self::Failed {
                error: "No valid JSON found in response".to_string(),
                raw_response: response.to_string(),
            };
        };

        match serde_json::from_str::<Map<String, Value>>(candidate) {
            Ok(object) => Self::Parsed(object),
            Err(e) => {
                log::error!("failed to parse classification response as JSON: {e}");
                Self::Failed {
                    error: format!("Failed to parse classification: {e}"),
                    raw_response: response.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// The classified object, when parsing succeeded.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Parsed(object) => Some(object),
            Self::Failed { .. } => None,
        }
    }
}
