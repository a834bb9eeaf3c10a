use serde::{Deserialize, Serialize};

// ==================== BALANCES ====================

/// One displayed asset row. `amount` is a decimal string with six fractional
/// digits; `value` is a formatted fiat string such as "$12.34".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub symbol: String,
    pub amount: String,
    pub value: String,
    #[serde(rename = "contractAddress", skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Portfolio {
    pub balances: Vec<Balance>,
    pub total_value: f64,
}

// ==================== BACKEND TOKEN LIST ====================

/// Entry of the backend-supplied token list. Prices are quoted in units of
/// the native asset, not fiat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: String,
    #[serde(rename = "priceInSei", default)]
    pub price_in_sei: f64,
    #[serde(default)]
    pub decimals: Option<u32>,
}

// ==================== RESPONSE ENVELOPE ====================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
