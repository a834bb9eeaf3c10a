use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::AppState;
use crate::error::Result;

/// GET /api/tokens
///
/// Relays the backend's supported-token list, status and body unchanged.
pub async fn list_tokens(State(state): State<AppState>) -> Result<Response> {
    let forwarded = state.backend.forward_tokens().await?;
    let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(forwarded.body)).into_response())
}
