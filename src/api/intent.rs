use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{require_auth_token, AppState};
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct IntentProxyRequest {
    #[serde(rename = "authToken")]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub prompt: String,
}

/// POST /api/intent
///
/// Pass-through forwarder: require the caller's token, attach the admin
/// credential, relay the backend's status and JSON body verbatim.
pub async fn submit_intent(
    State(state): State<AppState>,
    Json(req): Json<IntentProxyRequest>,
) -> Result<Response> {
    let token = require_auth_token(req.auth_token.as_deref())?;

    let forwarded = state.backend.forward_intent(token, &req.prompt).await?;
    let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(forwarded.body)).into_response())
}
