use std::str::FromStr;

use ethers::types::{Address, U256};
use serde::Deserialize;

use crate::constants::BALANCE_OF_SELECTOR;
use crate::error::{AppError, Result};

fn rpc_request(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    })
}

/// Calldata for `balanceOf(address)`: 4-byte selector followed by the owner
/// address left-padded to 32 bytes.
fn balance_of_calldata(owner: &Address) -> String {
    let padded = format!("{:0>64}", hex::encode(owner.as_bytes()));
    format!("{}{}", BALANCE_OF_SELECTOR, padded)
}

fn parse_hex_quantity(raw: &str) -> Result<U256> {
    let digits = raw.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| AppError::BlockchainRpc(format!("Invalid hex quantity '{}': {}", raw, e)))
}

pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|_| AppError::BadRequest("Invalid EVM address".to_string()))
}

/// Exact fixed-point rendering of a raw chain integer, truncated to six
/// fractional digits. Integer math only; no float path.
pub fn format_units(value: U256, decimals: u32) -> String {
    let divisor = U256::exp10(decimals as usize);
    let whole = value / divisor;
    let frac = value % divisor;
    let frac6 = if decimals >= 6 {
        frac / U256::exp10((decimals - 6) as usize)
    } else {
        frac * U256::exp10((6 - decimals) as usize)
    };
    format!("{}.{:06}", whole, frac6.as_u64())
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Sei EVM JSON-RPC client
#[derive(Debug, Clone)]
pub struct EvmRpcClient {
    rpc_url: String,
    client: reqwest::Client,
}

impl EvmRpcClient {
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc_url,
            client: reqwest::Client::new(),
        }
    }

    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = rpc_request(method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::BlockchainRpc(e.to_string()))?;

        let envelope: RpcEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::BlockchainRpc(e.to_string()))?;

        if let Some(err) = envelope.error {
            return Err(AppError::BlockchainRpc(format!(
                "{} ({})",
                err.message, err.code
            )));
        }

        Ok(envelope.result.unwrap_or(serde_json::Value::Null))
    }

    /// Native balance at the latest block, as the raw wei quantity.
    pub async fn get_native_balance(&self, address: &Address) -> Result<U256> {
        let result = self
            .call(
                "eth_getBalance",
                serde_json::json!([format!("{:#x}", address), "latest"]),
            )
            .await?;

        let raw = result
            .as_str()
            .ok_or_else(|| AppError::BlockchainRpc("eth_getBalance returned no quantity".into()))?;
        parse_hex_quantity(raw)
    }

    /// ERC-20 balance via a raw `eth_call` against the token contract. An
    /// empty or missing result decodes as zero.
    pub async fn get_token_balance(&self, owner: &Address, token: &Address) -> Result<U256> {
        let result = self
            .call(
                "eth_call",
                serde_json::json!([
                    {
                        "to": format!("{:#x}", token),
                        "data": balance_of_calldata(owner),
                    },
                    "latest"
                ]),
            )
            .await?;

        let raw = result.as_str().unwrap_or("0x0");
        parse_hex_quantity(raw)
    }
}
