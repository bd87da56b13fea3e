#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

//! Software-development assistant operations on top of watsonx.ai.
//!
//! Six operations - generate code, generate tests, fix bugs, summarize
//! code, classify requirements, chat - rendered through prompt templates
//! and dispatched onto one of two interchangeable completion backends.

pub mod assistant;
pub mod backend;
pub mod classify;
pub mod config;
pub mod error;
pub mod prompts;
pub mod task;
pub mod template;

pub use crate::assistant::{Assistant, ChatTurn, Speaker};
pub use crate::backend::{ChainBackend, CompletionBackend, DirectBackend};
pub use crate::classify::ClassificationResult;
pub use crate::config::{BackendKind, Config, ConfigError};
pub use crate::error::{AssistantError, describe_failure};
pub use crate::task::TaskKind;
pub use crate::template::{PromptTemplate, TemplateError};

// Re-export the provider client for callers that need direct access
pub use watsonx_ox::{Model, Watsonx};
