use serde::Deserialize;
use std::env;

use crate::constants::{COINGECKO_API_URL_DEFAULT, SEI_EXPLORER_URL_DEFAULT, SEI_RPC_URL_DEFAULT};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Remote intent backend
    pub backend_url: String,
    pub admin_api_key: String,

    // Blockchain
    pub sei_rpc_url: String,
    pub explorer_url: String,

    // Price oracle
    pub coingecko_api_url: String,

    // Auth provider identifiers (public, consumed by the UI shell)
    pub privy_app_id: Option<String>,
    pub session_signer_id: Option<String>,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            backend_url: env::var("BACKEND_URL")?,
            admin_api_key: env::var("ADMIN_API_KEY")?,

            sei_rpc_url: env::var("SEI_RPC_URL").unwrap_or_else(|_| SEI_RPC_URL_DEFAULT.to_string()),
            explorer_url: env::var("EXPLORER_URL")
                .unwrap_or_else(|_| SEI_EXPLORER_URL_DEFAULT.to_string()),

            coingecko_api_url: env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| COINGECKO_API_URL_DEFAULT.to_string()),

            privy_app_id: env::var("PRIVY_APP_ID").ok(),
            session_signer_id: env::var("SESSION_SIGNER_ID").ok(),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend_url.trim().is_empty() {
            anyhow::bail!("BACKEND_URL is empty");
        }
        if self.admin_api_key.trim().is_empty() {
            anyhow::bail!("ADMIN_API_KEY is empty");
        }
        if self.sei_rpc_url.trim().is_empty() {
            anyhow::bail!("SEI_RPC_URL is empty");
        }

        if self.privy_app_id.as_deref().unwrap_or("").trim().is_empty() {
            tracing::warn!("PRIVY_APP_ID is not set; login shell will not be able to authenticate");
        }
        if self
            .session_signer_id
            .as_deref()
            .unwrap_or("")
            .trim()
            .is_empty()
        {
            tracing::warn!(
                "SESSION_SIGNER_ID is not set; delegated signing cannot be provisioned on login"
            );
        }

        if self.admin_api_key.contains("changeme") || self.admin_api_key.contains("123456") {
            tracing::warn!("Detected dev credentials in config");
        }

        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}
