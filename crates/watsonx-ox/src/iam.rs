//! IBM Cloud IAM token exchange.
//!
//! An API key is traded for a short-lived bearer token at the identity
//! endpoint. The resulting [`IamSession`] carries its own expiry instant so
//! callers can see exactly when the client will refresh.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::WatsonxRequestError;

/// Identity endpoint used to exchange an API key for a bearer token.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// OAuth grant type for the IBM Cloud API-key exchange.
pub const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Timeout for calls to the identity endpoint.
const IAM_TIMEOUT: Duration = Duration::from_secs(30);

/// A cached bearer credential together with its expiry instant.
///
/// The session is replaced wholesale on refresh; `valid_until` is the
/// client-side margin, not the token lifetime reported by IAM.
#[derive(Debug, Clone)]
pub struct IamSession {
    pub access_token: String,
    pub valid_until: Instant,
}

impl IamSession {
    /// Whether the session is still usable at `now`. Strict: a session is
    /// invalid from `valid_until` onwards.
    #[must_use]
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.valid_until
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IamTokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
}

/// Exchange an API key for an access token at the identity endpoint.
///
/// Every failure mode collapses into
/// [`WatsonxRequestError::AuthenticationFailed`]: transport errors,
/// non-success statuses, unparseable bodies, and bodies without a token.
pub(crate) async fn fetch_access_token(
    client: &reqwest::Client,
    iam_url: &str,
    api_key: &str,
) -> Result<String, WatsonxRequestError> {
    let response = client
        .post(iam_url)
        .header("accept", "application/json")
        .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", api_key)])
        .timeout(IAM_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            log::error!("failed to reach the identity endpoint: {e}");
            WatsonxRequestError::AuthenticationFailed(format!(
                "identity endpoint unreachable: {e}"
            ))
        })?;

    let status = response.status();
    let bytes = response.bytes().await.map_err(|e| {
        WatsonxRequestError::AuthenticationFailed(format!(
            "failed to read identity response: {e}"
        ))
    })?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes);
        log::error!("identity endpoint returned HTTP {}", status.as_u16());
        return Err(WatsonxRequestError::AuthenticationFailed(format!(
            "identity endpoint returned HTTP {}: {}",
            status.as_u16(),
            body.trim()
        )));
    }

    let token_response: IamTokenResponse = serde_json::from_slice(&bytes).map_err(|e| {
        WatsonxRequestError::AuthenticationFailed(format!(
            "invalid response from the identity endpoint: {e}"
        ))
    })?;

    if let Some(expires_in) = token_response.expires_in {
        // Parsed but deliberately not trusted over the configured lifetime.
        log::debug!("identity endpoint reports expires_in={expires_in}s");
    }

    match token_response.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(WatsonxRequestError::AuthenticationFailed(
            "no access token received from the identity endpoint".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_is_valid_before_expiry() {
        let now = Instant::now();
        let session = IamSession {
            access_token: "token".to_string(),
            valid_until: now + Duration::from_secs(1),
        };
        assert!(session.is_valid_at(now));
    }

    #[test]
    fn session_is_invalid_from_expiry_onwards() {
        let now = Instant::now();
        let session = IamSession {
            access_token: "token".to_string(),
            valid_until: now,
        };
        assert!(!session.is_valid_at(now));
        assert!(!session.is_valid_at(now + Duration::from_secs(1)));
    }

    #[test]
    fn token_response_tolerates_missing_fields() {
        let parsed: IamTokenResponse = serde_json::from_str("{}").expect("parse");
        assert!(parsed.access_token.is_none());
        assert!(parsed.expires_in.is_none());
        assert!(parsed.token_type.is_none());
    }

    #[test]
    fn token_response_reads_the_usual_shape() {
        let parsed: IamTokenResponse = serde_json::from_str(
            r#"{"access_token":"abc","refresh_token":"def","token_type":"Bearer","expires_in":3600,"expiration":1700000000}"#,
        )
        .expect("parse");
        assert_eq!(parsed.access_token.as_deref(), Some("abc"));
        assert_eq!(parsed.expires_in, Some(3600));
        assert_eq!(parsed.token_type.as_deref(), Some("Bearer"));
    }
}
