#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

pub mod generate;
mod internal;
pub mod iam;

// Re-export generation types
pub use crate::generate::request::{DecodingMethod, TextGenParameters, TextGenerationRequest};
pub use crate::generate::response::{GeneratedText, StopReason, TextGenerationResponse};

// Re-export the token session type so callers can inspect expiry
pub use crate::iam::IamSession;

use core::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bon::Builder;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

/// Default regional endpoint for the watsonx.ai API.
pub const DEFAULT_BASE_URL: &str = "https://eu-de.ml.cloud.ibm.com";

/// API version date sent as the `version` query parameter on every call.
pub const DEFAULT_API_VERSION: &str = "2023-05-29";

/// Cached-token lifetime used when the client refreshes a bearer token.
/// Shorter than the one-hour IAM token lifetime on purpose.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3000);

pub(crate) type TokenCache = Arc<Mutex<Option<IamSession>>>;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Model {
    // --- IBM Granite ---
    #[strum(to_string = "ibm/granite-3-3-8b-instruct")]
    Granite33_8bInstruct,
    #[strum(to_string = "ibm/granite-3-2-8b-instruct")]
    Granite32_8bInstruct,
    #[strum(to_string = "ibm/granite-3-8b-instruct")]
    Granite3_8bInstruct,
    #[strum(to_string = "ibm/granite-13b-instruct-v2")]
    Granite13bInstructV2,
    #[strum(to_string = "ibm/granite-20b-code-instruct")]
    Granite20bCodeInstruct,
    #[strum(to_string = "ibm/granite-34b-code-instruct")]
    Granite34bCodeInstruct,

    // --- Meta Llama ---
    #[strum(to_string = "meta-llama/llama-3-3-70b-instruct")]
    Llama33_70bInstruct,
    #[strum(to_string = "meta-llama/llama-3-1-70b-instruct")]
    Llama31_70bInstruct,
    #[strum(to_string = "meta-llama/llama-3-1-8b-instruct")]
    Llama31_8bInstruct,

    // --- Mistral AI ---
    #[strum(to_string = "mistralai/mistral-large")]
    MistralLarge,
    #[strum(to_string = "mistralai/mixtral-8x7b-instruct-v01")]
    Mixtral8x7bInstructV01,

    // --- Google Flan ---
    #[strum(to_string = "google/flan-ul2")]
    FlanUl2,
    #[strum(to_string = "google/flan-t5-xxl")]
    FlanT5Xxl,
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}

/// IBM watsonx.ai client.
///
/// Authenticates either with an IBM Cloud API key (exchanged for a bearer
/// token at the IAM identity endpoint and cached until `token_lifetime`
/// elapses) or with an explicitly provided bearer token.
#[derive(Clone, Builder)]
pub struct Watsonx {
    #[builder(field)]
    pub(crate) token_cache: TokenCache,
    #[builder(into)]
    pub(crate) api_key: Option<String>,
    #[builder(into)]
    pub(crate) bearer_token: Option<String>,
    #[builder(into)]
    pub(crate) project_id: Option<String>,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    #[builder(default = DEFAULT_API_VERSION.to_string(), into)]
    pub(crate) api_version: String,
    #[builder(default = iam::DEFAULT_IAM_URL.to_string(), into)]
    pub(crate) iam_url: String,
    #[builder(default = DEFAULT_TOKEN_LIFETIME)]
    pub(crate) token_lifetime: Duration,
}

impl Watsonx {
    /// Create a new watsonx.ai client with the provided IBM Cloud API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            token_cache: TokenCache::default(),
            api_key: Some(api_key.into()),
            bearer_token: None,
            project_id: None,
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            iam_url: iam::DEFAULT_IAM_URL.to_string(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Create a new client with a pre-acquired bearer token.
    ///
    /// No IAM exchange is performed; the token is sent as-is on every call.
    pub fn with_bearer_token(bearer_token: impl Into<String>) -> Self {
        Self {
            token_cache: TokenCache::default(),
            api_key: None,
            bearer_token: Some(bearer_token.into()),
            project_id: None,
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            iam_url: iam::DEFAULT_IAM_URL.to_string(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("WATSONX_API_KEY")?;
        Ok(Self::builder()
            .api_key(api_key)
            .maybe_project_id(std::env::var("WATSONX_PROJECT_ID").ok())
            .maybe_base_url(std::env::var("WATSONX_URL").ok())
            .build())
    }

    /// Returns the current project ID if available.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a bearer token valid for the next request.
    ///
    /// An explicitly configured bearer token is returned unchanged. With an
    /// API key, a cached [`IamSession`] is reused while it is still valid;
    /// otherwise a new token is fetched from the identity endpoint and the
    /// session is replaced wholesale. The cache lock is not held across the
    /// exchange, so overlapping callers may refresh twice.
    ///
    /// # Errors
    ///
    /// - [`WatsonxRequestError::AuthenticationMissing`] - neither an API key
    ///   nor a bearer token is configured
    /// - [`WatsonxRequestError::AuthenticationFailed`] - the identity
    ///   endpoint is unreachable, returns a non-success status, or returns a
    ///   body without an access token
    pub async fn bearer_token(&self) -> Result<String, WatsonxRequestError> {
        if let Some(token) = &self.bearer_token {
            return Ok(token.clone());
        }
        let Some(api_key) = &self.api_key else {
            return Err(WatsonxRequestError::AuthenticationMissing);
        };

        let now = Instant::now();
        {
            let cache = self.token_cache.lock().await;
            if let Some(session) = cache.as_ref() {
                if session.is_valid_at(now) {
                    log::debug!("reusing cached IAM token");
                    return Ok(session.access_token.clone());
                }
            }
        }

        let access_token = iam::fetch_access_token(&self.client, &self.iam_url, api_key).await?;
        let session = IamSession {
            access_token: access_token.clone(),
            valid_until: now + self.token_lifetime,
        };
        *self.token_cache.lock().await = Some(session);
        log::debug!(
            "acquired new IAM token, cached for {}s",
            self.token_lifetime.as_secs()
        );
        Ok(access_token)
    }

    /// Returns a copy of the cached token session, if one exists.
    ///
    /// The session's `valid_until` field tells callers when the next call
    /// will trigger a refresh.
    pub async fn token_session(&self) -> Option<IamSession> {
        self.token_cache.lock().await.clone()
    }

    /// Send a text generation request.
    ///
    /// The client's project ID is attached when the request does not carry
    /// its own.
    ///
    /// # Errors
    ///
    /// - [`WatsonxRequestError::MissingProjectId`] - neither the request nor
    ///   the client has a project ID
    /// - [`WatsonxRequestError::ReqwestError`] - the HTTP request fails
    /// - [`WatsonxRequestError::RateLimit`] - the API returns HTTP 429
    /// - [`WatsonxRequestError::InvalidRequestError`] - the API returns a
    ///   non-2xx status
    /// - [`WatsonxRequestError::JsonDeserializationError`] - the response
    ///   body cannot be parsed
    pub async fn generate(
        &self,
        request: &TextGenerationRequest,
    ) -> Result<TextGenerationResponse, WatsonxRequestError> {
        let helper = internal::WatsonxRequestHelper::for_generation(self).await?;
        if request.project_id.is_some() {
            helper.send_generation_request(request).await
        } else {
            let Some(project_id) = self.project_id.as_deref() else {
                return Err(WatsonxRequestError::MissingProjectId);
            };
            let scoped = request.clone().with_project_id(project_id);
            helper.send_generation_request(&scoped).await
        }
    }
}

impl fmt::Debug for Watsonx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watsonx")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("iam_url", &self.iam_url)
            .field("token_lifetime", &self.token_lifetime)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct WatsonxApiErrorPayload {
    #[serde(default)]
    errors: Vec<WatsonxApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct WatsonxApiErrorDetail {
    code: Option<String>,
    message: String,
}

#[derive(Debug, Error)]
pub enum WatsonxRequestError {
    /// Errors from the HTTP client
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// JSON deserialization errors with context
    #[error("JSON decode error: {0}")]
    JsonDeserializationError(serde_json::Error),

    /// Non-2xx status from the generation endpoint
    #[error("HTTP error {status_code}: {message}")]
    InvalidRequestError {
        code: Option<String>,
        message: String,
        status_code: u16,
    },

    /// Unexpected response from the API
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// The identity endpoint could not produce a usable token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Authentication is missing (no API key or bearer token provided)
    #[error("Authentication is missing: no API key or bearer token provided")]
    AuthenticationMissing,

    /// Generation was attempted without a project ID
    #[error("No project ID configured on the request or the client")]
    MissingProjectId,
}

/// Parse an error response from the watsonx.ai API.
/// Handles the structured IBM error body and falls back to plain text.
pub(crate) fn parse_error_response(status: reqwest::StatusCode, bytes: bytes::Bytes) -> WatsonxRequestError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return WatsonxRequestError::RateLimit;
    }

    // IBM error bodies look like {"errors":[{"code":...,"message":...}],"trace":...}
    if let Ok(payload) = serde_json::from_slice::<WatsonxApiErrorPayload>(&bytes) {
        if let Some(detail) = payload.errors.into_iter().next() {
            return WatsonxRequestError::InvalidRequestError {
                code: detail.code,
                message: detail.message,
                status_code: status.as_u16(),
            };
        }
    }

    let body = String::from_utf8_lossy(&bytes);
    WatsonxRequestError::InvalidRequestError {
        code: None,
        message: body.trim().to_string(),
        status_code: status.as_u16(),
    }
}
