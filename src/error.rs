use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No auth token provided")]
    MissingAuthToken,

    #[error("Blockchain RPC error: {0}")]
    BlockchainRpc(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A message is already being processed for this session")]
    SessionBusy,
}

// The wire contract for gateway-origin failures is a bare `{"error": msg}`
// body; upstream responses are relayed verbatim and never pass through here.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MissingAuthToken => {
                (StatusCode::BAD_REQUEST, "No auth token provided".to_string())
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::SessionBusy => (StatusCode::CONFLICT, self.to_string()),
            AppError::BlockchainRpc(ref e) => {
                tracing::error!("Blockchain RPC failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::ExternalApi(ref e) => {
                tracing::error!("Upstream API failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
