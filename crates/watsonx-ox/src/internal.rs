use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::generate::request::TextGenerationRequest;
use crate::generate::response::TextGenerationResponse;
use crate::{Watsonx, WatsonxRequestError, parse_error_response};

/// Path of the text generation endpoint, relative to the regional base URL.
const GENERATION_PATH: &str = "ml/v1-beta/generation/text";

/// Timeout for generation calls. Longer than the IAM timeout because model
/// inference dominates the round trip.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Watsonx client helper that owns one resolved bearer token per request.
pub(crate) struct WatsonxRequestHelper {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    bearer: String,
}

impl WatsonxRequestHelper {
    /// Resolve the bearer token (cached or freshly exchanged) and capture
    /// the client's endpoint configuration.
    pub(crate) async fn for_generation(watsonx: &Watsonx) -> Result<Self, WatsonxRequestError> {
        let bearer = watsonx.bearer_token().await?;
        Ok(Self {
            client: watsonx.client.clone(),
            base_url: watsonx.base_url.trim_end_matches('/').to_string(),
            api_version: watsonx.api_version.clone(),
            bearer,
        })
    }

    pub(crate) async fn send_generation_request(
        &self,
        request: &TextGenerationRequest,
    ) -> Result<TextGenerationResponse, WatsonxRequestError> {
        log::debug!(
            "sending generation request for model {} ({} input chars)",
            request.model_id,
            request.input.len()
        );
        self.post_json(GENERATION_PATH, request).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, WatsonxRequestError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .query(&[("version", self.api_version.as_str())])
            .bearer_auth(&self.bearer)
            .header("accept", "application/json")
            .json(body)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            serde_json::from_slice::<T>(&bytes)
                .map_err(WatsonxRequestError::JsonDeserializationError)
        } else {
            log::error!("generation endpoint returned HTTP {}", status.as_u16());
            Err(parse_error_response(status, bytes))
        }
    }
}
