use bon::Builder;
use serde::{Deserialize, Serialize};

/// Decoding strategy for token selection.
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
pub enum DecodingMethod {
    Greedy,
    Sample,
}

/// Decoding parameters sent with a generation request.
///
/// `None` fields are omitted from the wire body so the service applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct TextGenParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoding_method: Option<DecodingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

/// A single text generation call: `{model_id, input, parameters, project_id}`.
#[derive(Debug, Clone, Serialize, Builder)]
pub struct TextGenerationRequest {
    #[builder(into)]
    pub model_id: String,
    #[builder(into)]
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<TextGenParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub project_id: Option<String>,
}

impl TextGenerationRequest {
    /// Scope the request to a project, replacing any previous project ID.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}
