use serde_json::Value;
use url::Url;

/// Symbols this deployment can price. Unknown symbols are worth zero and
/// never hit the network.
fn coin_id_for(symbol: &str) -> Option<&'static str> {
    match symbol.to_ascii_uppercase().as_str() {
        "SEI" => Some("sei-network"),
        _ => None,
    }
}

fn parse_usd_price(payload: &Value, coin_id: &str) -> f64 {
    payload
        .get(coin_id)
        .and_then(|entry| entry.get("usd"))
        .and_then(|price| price.as_f64())
        .unwrap_or(0.0)
}

/// CoinGecko spot price client
#[derive(Debug, Clone)]
pub struct PriceOracle {
    api_url: String,
    client: reqwest::Client,
}

impl PriceOracle {
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            client: reqwest::Client::new(),
        }
    }

    /// USD spot price for a symbol. Every failure path degrades to 0.0 so a
    /// dead oracle only zeroes valuations, never aborts them.
    pub async fn usd_price(&self, symbol: &str) -> f64 {
        let Some(coin_id) = coin_id_for(symbol) else {
            return 0.0;
        };

        let url = match self.price_url(coin_id) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!("Price oracle URL construction failed: {}", err);
                return 0.0;
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Price fetch for {} failed: {}", symbol, err);
                return 0.0;
            }
        };

        match response.json::<Value>().await {
            Ok(payload) => parse_usd_price(&payload, coin_id),
            Err(err) => {
                tracing::warn!("Price payload for {} unreadable: {}", symbol, err);
                0.0
            }
        }
    }

    fn price_url(&self, coin_id: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/api/v3/simple/price",
            self.api_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("ids", coin_id)
            .append_pair("vs_currencies", "usd");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_id_maps_native_symbol() {
        assert_eq!(coin_id_for("SEI"), Some("sei-network"));
        assert_eq!(coin_id_for("sei"), Some("sei-network"));
        assert_eq!(coin_id_for("DOGE"), None);
    }

    #[test]
    fn parse_usd_price_reads_nested_field() {
        let payload = serde_json::json!({"sei-network": {"usd": 0.42}});
        assert!((parse_usd_price(&payload, "sei-network") - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_usd_price_defaults_to_zero() {
        let payload = serde_json::json!({"sei-network": {}});
        assert_eq!(parse_usd_price(&payload, "sei-network"), 0.0);
        assert_eq!(parse_usd_price(&serde_json::json!({}), "sei-network"), 0.0);
    }

    #[test]
    fn price_url_carries_query_parameters() {
        let oracle = PriceOracle::new("https://api.coingecko.com/".to_string());
        let url = oracle.price_url("sei-network").unwrap();
        assert_eq!(url.path(), "/api/v3/simple/price");
        assert!(url.query().unwrap().contains("ids=sei-network"));
        assert!(url.query().unwrap().contains("vs_currencies=usd"));
    }
}
