use crate::chain::{evm_client, EvmRpcClient};
use crate::constants::{NATIVE_DECIMALS, NATIVE_SYMBOL, TOKEN_DECIMALS_DEFAULT};
use crate::error::Result;
use crate::integrations::{IntentBackendClient, PriceOracle};
use crate::models::{Balance, Portfolio, TokenInfo};

const ZERO_AMOUNT: &str = "0.000000";

fn parse_amount(amount: &str) -> f64 {
    amount.parse().unwrap_or(0.0)
}

fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

// The display list carries formatted currency strings; the total is produced
// by parsing those strings back.
fn parse_currency(value: &str) -> f64 {
    value
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

fn total_from_entries(balances: &[Balance]) -> f64 {
    balances.iter().map(|b| parse_currency(&b.value)).sum()
}

/// Portfolio valuation pipeline: native balance, native spot price, the
/// backend token list, then one contract read per token. Calls are issued
/// strictly one after another; each asset degrades to zero on failure and
/// never disturbs the rest of the run.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    chain: EvmRpcClient,
    oracle: PriceOracle,
    backend: IntentBackendClient,
}

impl BalanceAggregator {
    pub fn new(chain: EvmRpcClient, oracle: PriceOracle, backend: IntentBackendClient) -> Self {
        Self {
            chain,
            oracle,
            backend,
        }
    }

    pub async fn compute_balances(&self, address: &str) -> Result<Portfolio> {
        let owner = evm_client::parse_address(address)?;

        let mut balances = Vec::new();

        let native_amount = match self.chain.get_native_balance(&owner).await {
            Ok(raw) => evm_client::format_units(raw, NATIVE_DECIMALS),
            Err(err) => {
                tracing::warn!("Native balance fetch failed for {}: {}", address, err);
                ZERO_AMOUNT.to_string()
            }
        };

        let native_price = self.oracle.usd_price(NATIVE_SYMBOL).await;
        let native_value = parse_amount(&native_amount) * native_price;

        // The native entry is always listed, even at zero.
        balances.push(Balance {
            symbol: NATIVE_SYMBOL.to_string(),
            amount: native_amount,
            value: format_usd(native_value),
            contract_address: None,
        });

        let tokens = self.backend.fetch_token_list().await;
        for token in &tokens {
            if let Some(entry) = self.token_entry(&owner, token, native_price).await {
                balances.push(entry);
            }
        }

        let total_value = total_from_entries(&balances);
        Ok(Portfolio {
            balances,
            total_value,
        })
    }

    // One contract read. Any failure zeroes this asset's contribution, which
    // also filters it from the display list.
    async fn token_entry(
        &self,
        owner: &ethers::types::Address,
        token: &TokenInfo,
        native_price: f64,
    ) -> Option<Balance> {
        let contract = match evm_client::parse_address(&token.address) {
            Ok(contract) => contract,
            Err(_) => {
                tracing::warn!(
                    "Token {} has an invalid contract address: {}",
                    token.symbol,
                    token.address
                );
                return None;
            }
        };

        let amount = match self.chain.get_token_balance(owner, &contract).await {
            Ok(raw) => {
                evm_client::format_units(raw, token.decimals.unwrap_or(TOKEN_DECIMALS_DEFAULT))
            }
            Err(err) => {
                tracing::warn!("Balance fetch for {} failed: {}", token.symbol, err);
                ZERO_AMOUNT.to_string()
            }
        };

        let parsed = parse_amount(&amount);
        if parsed <= 0.0 {
            return None;
        }

        // Listed tokens are priced in native units; fiat value couples
        // through the native spot price.
        let token_price = token.price_in_sei * native_price;
        Some(Balance {
            symbol: token.symbol.clone(),
            amount,
            value: format_usd(parsed * token_price),
            contract_address: Some(token.address.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, amount: &str, value: &str) -> Balance {
        Balance {
            symbol: symbol.to_string(),
            amount: amount.to_string(),
            value: value.to_string(),
            contract_address: None,
        }
    }

    #[test]
    fn parse_currency_strips_symbol_and_separators() {
        assert!((parse_currency("$1,234.56") - 1234.56).abs() < 1e-9);
        assert_eq!(parse_currency("$0.00"), 0.0);
        assert_eq!(parse_currency("garbage"), 0.0);
    }

    #[test]
    fn format_usd_keeps_two_decimals() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.345), "$12.35");
    }

    #[test]
    fn total_sums_parsed_currency_strings() {
        let balances = vec![
            entry("SEI", "1.000000", "$10.00"),
            entry("SBC", "2.000000", "$15.50"),
        ];
        assert!((total_from_entries(&balances) - 25.5).abs() < 1e-9);
    }

    #[test]
    fn total_ignores_unparseable_entries() {
        let balances = vec![
            entry("SEI", "1.000000", "$10.00"),
            entry("BAD", "0.000000", "n/a"),
        ];
        assert!((total_from_entries(&balances) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount("not-a-number"), 0.0);
        assert!((parse_amount("1.000000") - 1.0).abs() < f64::EPSILON);
    }
}
