use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::TokenInfo;

/// Upstream status and raw JSON body, relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: u16,
    pub body: Value,
}

/// Client for the remote intent classification/execution backend. The
/// gateway only attaches the admin credential and echoes payloads; it never
/// transforms requests.
#[derive(Debug, Clone)]
pub struct IntentBackendClient {
    base_url: String,
    admin_api_key: String,
    client: reqwest::Client,
}

impl IntentBackendClient {
    pub fn new(base_url: String, admin_api_key: String) -> Self {
        Self {
            base_url,
            admin_api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST /api/intent on the backend, body `{authToken, prompt}` with the
    /// admin key header attached.
    pub async fn forward_intent(&self, auth_token: &str, prompt: &str) -> Result<ForwardedResponse> {
        let response = self
            .client
            .post(self.endpoint("/api/intent"))
            .header("x-admin-key", &self.admin_api_key)
            .json(&serde_json::json!({
                "authToken": auth_token,
                "prompt": prompt,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        Ok(ForwardedResponse { status, body })
    }

    /// GET /api/tokens on the backend.
    pub async fn forward_tokens(&self) -> Result<ForwardedResponse> {
        let response = self
            .client
            .get(self.endpoint("/api/tokens"))
            .header("x-admin-key", &self.admin_api_key)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        Ok(ForwardedResponse { status, body })
    }

    /// The aggregator's parsed view of the token list. Any failure yields an
    /// empty list so a backend outage never aborts a balance run.
    pub async fn fetch_token_list(&self) -> Vec<TokenInfo> {
        let forwarded = match self.forward_tokens().await {
            Ok(forwarded) if forwarded.status < 400 => forwarded,
            Ok(forwarded) => {
                tracing::warn!("Token list fetch returned status {}", forwarded.status);
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!("Token list fetch failed: {}", err);
                return Vec::new();
            }
        };

        parse_token_list(&forwarded.body)
    }
}

fn parse_token_list(body: &Value) -> Vec<TokenInfo> {
    body.get("data")
        .and_then(|data| data.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
