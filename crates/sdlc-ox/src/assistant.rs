//! The operation facade.
//!
//! One method per operation; every method renders its prompt template,
//! hands the prompt to the configured backend, and reports failures as
//! display strings rather than typed errors (classification falls back to
//! [`ClassificationResult::Failed`] instead).

use core::fmt;

use watsonx_ox::Watsonx;

use crate::backend::{ChainBackend, CompletionBackend, DirectBackend};
use crate::classify::ClassificationResult;
use crate::config::{BackendKind, Config};
use crate::error::{AssistantError, describe_failure};
use crate::prompts;
use crate::task::TaskKind;
use crate::template::PromptTemplate;

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "User"),
            Speaker::Assistant => write!(f, "AI"),
        }
    }
}

/// A single turn of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Format a transcript as `User:`/`AI:` lines for the chat prompt.
#[must_use]
pub fn format_history(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker, turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The last `exchanges` user/assistant pairs, formatted as chat context.
#[must_use]
pub fn recent_context(turns: &[ChatTurn], exchanges: usize) -> String {
    let keep = exchanges.saturating_mul(2);
    let start = turns.len().saturating_sub(keep);
    format_history(&turns[start..])
}

/// Software-development assistant over a configured completion backend.
pub struct Assistant {
    backend: Box<dyn CompletionBackend>,
}

impl Assistant {
    /// Build the provider client and the configured backend variant.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let client = Watsonx::builder()
            .api_key(config.api_key.clone())
            .project_id(config.project_id.clone())
            .base_url(config.base_url.clone())
            .token_lifetime(config.token_lifetime)
            .build();

        let backend: Box<dyn CompletionBackend> = match config.backend {
            BackendKind::Direct => Box::new(DirectBackend::new(client, config.model_id.clone())),
            BackendKind::Chain => Box::new(ChainBackend::new(client, config.model_id.clone())),
        };
        Self { backend }
    }

    /// Use an already-constructed backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    async fn dispatch(
        &self,
        kind: TaskKind,
        template: &str,
        values: &[(&str, &str)],
    ) -> Result<String, AssistantError> {
        let prompt = PromptTemplate::from_template(template).render(values)?;
        self.backend.complete(&prompt, kind).await
    }

    async fn run(&self, kind: TaskKind, template: &str, values: &[(&str, &str)]) -> String {
        match self.dispatch(kind, template, values).await {
            Ok(text) => text,
            Err(error) => {
                log::error!("{kind} request failed: {error}");
                describe_failure(&error)
            }
        }
    }

    /// Generate code for the given requirements in the given language.
    pub async fn generate_code(&self, requirements: &str, language: &str) -> String {
        self.run(
            TaskKind::Code,
            prompts::CODE_GENERATION,
            &[("requirements", requirements), ("language", language)],
        )
        .await
    }

    /// Generate test cases for the given code using the given framework.
    pub async fn generate_tests(&self, code: &str, framework: &str) -> String {
        self.run(
            TaskKind::Test,
            prompts::TEST_GENERATION,
            &[("code", code), ("framework", framework)],
        )
        .await
    }

    /// Fix the described bug in the given code.
    pub async fn fix_bugs(&self, code: &str, error_description: &str) -> String {
        self.run(
            TaskKind::Fix,
            prompts::BUG_FIX,
            &[("code", code), ("error_description", error_description)],
        )
        .await
    }

    /// Summarize and explain the given code.
    pub async fn summarize_code(&self, code: &str) -> String {
        self.run(TaskKind::Summarize, prompts::CODE_SUMMARY, &[("code", code)])
            .await
    }

    /// Classify requirements into structured categories.
    ///
    /// Parse failures do not fail the request; they surface as
    /// [`ClassificationResult::Failed`] with the raw model text attached.
    pub async fn classify_requirements(&self, requirements: &str) -> ClassificationResult {
        match self
            .dispatch(
                TaskKind::Classify,
                prompts::REQUIREMENTS_CLASSIFICATION,
                &[("requirements", requirements)],
            )
            .await
        {
            Ok(text) => ClassificationResult::parse(&text),
            Err(error) => {
                log::error!("classification request failed: {error}");
                ClassificationResult::Failed {
                    error: describe_failure(&error),
                    raw_response: String::new(),
                }
            }
        }
    }

    /// Answer a software-development question, optionally with prior
    /// conversation context (see [`recent_context`]).
    pub async fn chat(&self, query: &str, context: &str) -> String {
        let context_section = if context.is_empty() {
            String::new()
        } else {
            format!("Context: {context}\n")
        };
        self.run(
            TaskKind::Chat,
            prompts::CHAT_ASSISTANT,
            &[
                ("context_section", context_section.as_str()),
                ("query", query),
            ],
        )
        .await
    }
}
