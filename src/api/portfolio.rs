use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::chat;
use crate::error::Result;
use crate::models::{ApiResponse, Balance};

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub address: String,
    pub balances: Vec<Balance>,
    pub total_value: f64,
}

/// GET /api/portfolio/balances/{address}
///
/// Runs the aggregation pipeline now (wallet connect and manual refresh both
/// land here) and mirrors the result into the session, if one exists.
pub async fn get_balances(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<PortfolioResponse>>> {
    let portfolio = state.aggregator.compute_balances(&address).await?;

    {
        let mut sessions = chat::lock(&state.sessions);
        if let Some(session) = sessions.get_mut(&address) {
            session.set_balances(portfolio.balances.clone(), portfolio.total_value);
        }
    }

    Ok(Json(ApiResponse::success(PortfolioResponse {
        address,
        balances: portfolio.balances,
        total_value: portfolio.total_value,
    })))
}
