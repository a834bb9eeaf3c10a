use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{sleep, Duration};

use super::{require_auth_token, AppState};
use crate::chain::evm_client;
use crate::chat::{self, fragment::Fragment, ChatMessage, ChatState};
use crate::constants::BALANCE_REFRESH_DELAY_SECS;
use crate::error::{AppError, Result};
use crate::models::{ApiResponse, Balance};
use crate::services::{render, IntentResponse, RenderContext, RenderOutcome};

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    #[serde(rename = "authToken")]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub message_id: String,
    pub reply: Fragment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    pub refresh_scheduled: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub address: String,
    pub messages: Vec<ChatMessage>,
    pub balances: Vec<Balance>,
    pub total_value: f64,
    pub loading: bool,
}

// The backend envelope is consumed leniently: both fields are optional and a
// non-object body degrades to an unknown intent over a null result.
fn intent_response_from(body: &Value) -> IntentResponse {
    IntentResponse {
        intent: body
            .get("intent")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        result: body.get("result").cloned().unwrap_or(Value::Null),
    }
}

fn upstream_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.as_str())
        .unwrap_or("Server error")
        .to_string()
}

fn connection_error(message: String) -> RenderOutcome {
    RenderOutcome {
        fragment: Fragment::ConnectionError { message },
        transaction_hash: None,
        refresh_balances: false,
    }
}

/// POST /api/chat/message
///
/// One chat turn: append the user message, forward the prompt to the intent
/// backend, render the response into the session transcript. A failed
/// forward renders as a connection-error turn; the chat never surfaces it as
/// a request failure.
pub async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<ApiResponse<ChatTurnResponse>>> {
    let token = require_auth_token(req.auth_token.as_deref())?.to_string();

    let prompt = req.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(AppError::BadRequest("Prompt is empty".to_string()));
    }

    let address = req.wallet_address.trim().to_string();
    evm_client::parse_address(&address)?;

    // One in-flight submission per session; the loading flag is the guard.
    {
        let mut sessions = chat::lock(&state.sessions);
        let session = sessions.entry(address.clone()).or_insert_with(ChatState::new);
        if session.loading {
            return Err(AppError::SessionBusy);
        }
        session.set_loading(true);
        session.append_user_message(&prompt);
    }

    let ctx = RenderContext {
        explorer_url: state.config.explorer_url.clone(),
    };

    let outcome = match state.backend.forward_intent(&token, &prompt).await {
        Ok(forwarded) if forwarded.status < 400 => {
            render(&intent_response_from(&forwarded.body), &ctx)
        }
        Ok(forwarded) => connection_error(upstream_error_message(&forwarded.body)),
        Err(err) => {
            tracing::warn!("Intent forward failed for {}: {}", address, err);
            connection_error("Unable to reach the assistant backend".to_string())
        }
    };

    let message_id = {
        let mut sessions = chat::lock(&state.sessions);
        let session = sessions.entry(address.clone()).or_insert_with(ChatState::new);
        let id = session.append_bot_message(
            outcome.fragment.clone(),
            outcome.transaction_hash.clone(),
        );
        session.set_loading(false);
        id
    };

    if outcome.refresh_balances {
        schedule_balance_refresh(state.clone(), address);
    }

    Ok(Json(ApiResponse::success(ChatTurnResponse {
        message_id,
        reply: outcome.fragment,
        transaction_hash: outcome.transaction_hash,
        refresh_scheduled: outcome.refresh_balances,
    })))
}

/// GET /api/chat/history/{address}
pub async fn get_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<ChatHistoryResponse>>> {
    let sessions = chat::lock(&state.sessions);
    let session = sessions
        .get(&address)
        .ok_or_else(|| AppError::NotFound(format!("No chat session for {}", address)))?;

    Ok(Json(ApiResponse::success(ChatHistoryResponse {
        address: address.clone(),
        messages: session.messages().to_vec(),
        balances: session.balances.clone(),
        total_value: session.total_value,
        loading: session.loading,
    })))
}

// Fire-and-forget: chain state settles for a few seconds, then balances are
// recomputed. Deliberately not synchronized with manual refreshes; the
// recomputation is idempotent and the last writer wins.
fn schedule_balance_refresh(state: AppState, address: String) {
    tokio::spawn(async move {
        sleep(Duration::from_secs(BALANCE_REFRESH_DELAY_SECS)).await;
        match state.aggregator.compute_balances(&address).await {
            Ok(portfolio) => {
                let mut sessions = chat::lock(&state.sessions);
                if let Some(session) = sessions.get_mut(&address) {
                    session.set_balances(portfolio.balances, portfolio.total_value);
                }
            }
            Err(err) => {
                tracing::warn!("Deferred balance refresh for {} failed: {}", address, err);
            }
        }
    });
}
