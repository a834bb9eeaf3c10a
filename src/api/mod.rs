// Re-export the API endpoint modules here
pub mod chat;
pub mod health;
pub mod intent;
pub mod portfolio;
pub mod tokens;

use crate::chain::EvmRpcClient;
use crate::chat::{new_session_store, SessionStore};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::integrations::{IntentBackendClient, PriceOracle};
use crate::services::BalanceAggregator;

// AppState definition
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: IntentBackendClient,
    pub aggregator: BalanceAggregator,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let backend =
            IntentBackendClient::new(config.backend_url.clone(), config.admin_api_key.clone());
        let aggregator = BalanceAggregator::new(
            EvmRpcClient::new(config.sei_rpc_url.clone()),
            PriceOracle::new(config.coingecko_api_url.clone()),
            backend.clone(),
        );
        Self {
            config,
            backend,
            aggregator,
            sessions: new_session_store(),
        }
    }
}

/// Callers must supply a non-empty auth token before anything is forwarded
/// upstream.
pub fn require_auth_token(token: Option<&str>) -> Result<&str> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AppError::MissingAuthToken),
    }
}
