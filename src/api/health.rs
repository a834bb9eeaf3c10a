use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;
use crate::constants::SEI_CHAIN_ID;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub chain_id: u64,
    pub backend_configured: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        chain_id: SEI_CHAIN_ID,
        backend_configured: !state.config.backend_url.trim().is_empty()
            && !state.config.admin_api_key.trim().is_empty(),
    })
}
