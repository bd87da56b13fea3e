//! Completion backends.
//!
//! The same five-operation contract is served by two interchangeable
//! variants: [`DirectBackend`] mirrors the raw API profile (greedy
//! decoding, per-kind temperature), [`ChainBackend`] runs the
//! render-generate-trim pipeline with a fixed sampling profile. Selection
//! happens once, in configuration, not per call site.

use async_trait::async_trait;
use watsonx_ox::{
    DecodingMethod, TextGenParameters, TextGenerationRequest, Watsonx,
};

use crate::error::AssistantError;
use crate::task::TaskKind;

/// A source of completions for rendered prompts.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, kind: TaskKind) -> Result<String, AssistantError>;
}

/// Greedy-decoding backend with a per-kind temperature.
pub struct DirectBackend {
    client: Watsonx,
    model_id: String,
    max_new_tokens: u32,
}

impl DirectBackend {
    pub fn new(client: Watsonx, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_new_tokens: 1000,
        }
    }

    #[must_use]
    pub fn max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    fn parameters_for(&self, kind: TaskKind) -> TextGenParameters {
        TextGenParameters::builder()
            .decoding_method(DecodingMethod::Greedy)
            .max_new_tokens(self.max_new_tokens)
            .min_new_tokens(1)
            .stop_sequences(Vec::new())
            .temperature(kind.temperature())
            .top_k(50)
            .top_p(1.0)
            .build()
    }

    pub(crate) fn request_for(&self, prompt: &str, kind: TaskKind) -> TextGenerationRequest {
        TextGenerationRequest::builder()
            .model_id(self.model_id.clone())
            .input(prompt)
            .parameters(self.parameters_for(kind))
            .build()
    }
}

#[async_trait]
impl CompletionBackend for DirectBackend {
    async fn complete(&self, prompt: &str, kind: TaskKind) -> Result<String, AssistantError> {
        log::debug!("direct backend dispatching {kind} request");
        let request = self.request_for(prompt, kind);
        let response = self.client.generate(&request).await?;
        Ok(response.into_text()?)
    }
}

/// Sampling-profile backend; the output is whitespace-trimmed the way the
/// pipeline's output parser did.
pub struct ChainBackend {
    client: Watsonx,
    model_id: String,
    parameters: TextGenParameters,
}

impl ChainBackend {
    pub fn new(client: Watsonx, model_id: impl Into<String>) -> Self {
        let parameters = TextGenParameters::builder()
            .decoding_method(DecodingMethod::Sample)
            .max_new_tokens(1000)
            .min_new_tokens(50)
            .temperature(0.7)
            .top_p(0.9)
            .repetition_penalty(1.05)
            .stop_sequences(vec![
                "###".to_string(),
                "---".to_string(),
                "\n\nUser:".to_string(),
                "\n\nHuman:".to_string(),
            ])
            .build();
        Self {
            client,
            model_id: model_id.into(),
            parameters,
        }
    }

    pub(crate) fn request_for(&self, prompt: &str) -> TextGenerationRequest {
        TextGenerationRequest::builder()
            .model_id(self.model_id.clone())
            .input(prompt)
            .parameters(self.parameters.clone())
            .build()
    }
}

#[async_trait]
impl CompletionBackend for ChainBackend {
    async fn complete(&self, prompt: &str, kind: TaskKind) -> Result<String, AssistantError> {
        log::debug!("chain backend dispatching {kind} request");
        let request = self.request_for(prompt);
        let response = self.client.generate(&request).await?;
        Ok(response.into_text()?.trim().to_string())
    }
}
