use serde::Deserialize;
use serde_json::Value;

use crate::chat::fragment::{BalanceLine, Fragment};
use crate::constants::SEI_EXPLORER_CHAIN_SUFFIX;

/// Closed set of intent tags the remote classifier emits. Anything else is
/// carried as `Unknown` and rendered through the fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CryptoSend,
    CryptoLaunchToken,
    CryptoBuy,
    CryptoSell,
    CryptoPrice,
    WalletBalance,
    WalletAddress,
    TransactionHistory,
    GeneralHelp,
    GeneralGreetings,
    Unknown(String),
}

impl Intent {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "crypto.send" => Intent::CryptoSend,
            "crypto.launchToken" => Intent::CryptoLaunchToken,
            "crypto.buy" => Intent::CryptoBuy,
            "crypto.sell" => Intent::CryptoSell,
            "crypto.price" => Intent::CryptoPrice,
            "wallet.balance" => Intent::WalletBalance,
            "wallet.address" => Intent::WalletAddress,
            "transaction.history" => Intent::TransactionHistory,
            "general.help" => Intent::GeneralHelp,
            "general.greetings" => Intent::GeneralGreetings,
            other => Intent::Unknown(other.to_string()),
        }
    }
}

/// The backend's response envelope. `result` is shaped by the intent tag and
/// every field of it is optional from this side of the contract.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentResponse {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub explorer_url: String,
}

impl RenderContext {
    pub fn tx_url(&self, hash: &str) -> String {
        format!(
            "{}/tx/{}?{}",
            self.explorer_url.trim_end_matches('/'),
            hash,
            SEI_EXPLORER_CHAIN_SUFFIX
        )
    }
}

#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub fragment: Fragment,
    /// Hash attached to the chat message, when the turn produced one.
    pub transaction_hash: Option<String>,
    /// True only for a confirmed transfer; the caller owes one delayed
    /// balance refresh.
    pub refresh_balances: bool,
}

impl RenderOutcome {
    fn plain(fragment: Fragment) -> Self {
        Self {
            fragment,
            transaction_hash: None,
            refresh_balances: false,
        }
    }
}

// Non-empty string field of `result`.
fn field_str<'a>(result: &'a Value, key: &str) -> Option<&'a str> {
    result
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

// String-or-number field rendered for display, with a default.
fn field_display(result: &Value, key: &str, default: &str) -> String {
    match result.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

// Thousands-separated rendering of a token supply.
fn format_supply(result: &Value) -> String {
    let parsed = match result.get("supply") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(value) => group_thousands(value),
        None => "0".to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let magnitude = value.abs();
    let whole = magnitude.trunc() as u128;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = magnitude.fract();
    if frac > 0.0 {
        let frac_digits = format!("{:.3}", frac);
        let trimmed = frac_digits
            .split('.')
            .nth(1)
            .unwrap_or("")
            .trim_end_matches('0');
        if !trimmed.is_empty() {
            grouped.push('.');
            grouped.push_str(trimmed);
        }
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Fallback chain for unrecognized or marker-less responses: a `message`
/// field wins, then an `error` field, then a raw dump of the result.
fn fallback(result: &Value) -> Fragment {
    if let Some(message) = field_str(result, "message") {
        return Fragment::Notice {
            message: message.to_string(),
        };
    }
    if let Some(error) = field_str(result, "error") {
        return Fragment::ErrorNotice {
            message: error.to_string(),
        };
    }
    let payload = match result {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    Fragment::RawDump { payload }
}

/// Maps an intent response to its display fragment. Pure: the only effect it
/// signals is the `refresh_balances` flag on a confirmed send.
pub fn render(response: &IntentResponse, ctx: &RenderContext) -> RenderOutcome {
    let result = &response.result;

    match Intent::parse(&response.intent) {
        Intent::CryptoSend => match field_str(result, "hash") {
            Some(hash) => RenderOutcome {
                fragment: Fragment::SendSuccess {
                    amount: field_display(result, "amount", ""),
                    token_symbol: field_display(result, "tokenSymbol", "SEI"),
                    recipient: field_display(result, "recipient", "unknown"),
                    hash: hash.to_string(),
                },
                transaction_hash: Some(hash.to_string()),
                refresh_balances: true,
            },
            None => RenderOutcome::plain(fallback(result)),
        },

        Intent::CryptoLaunchToken => {
            match (field_str(result, "tokenAddress"), field_str(result, "swapAddress")) {
                (Some(token_address), Some(swap_address)) => RenderOutcome {
                    fragment: Fragment::TokenLaunched {
                        name: field_display(result, "name", ""),
                        symbol: field_display(result, "symbol", ""),
                        supply: format_supply(result),
                        price: field_display(result, "price", ""),
                        token_address: token_address.to_string(),
                        swap_address: swap_address.to_string(),
                    },
                    transaction_hash: Some(token_address.to_string()),
                    refresh_balances: false,
                },
                _ => RenderOutcome::plain(fallback(result)),
            }
        }

        Intent::CryptoBuy => match field_str(result, "hash") {
            Some(hash) => RenderOutcome::plain(Fragment::BuySuccess {
                token_symbol: field_display(result, "tokenSymbol", ""),
                sei_amount: field_display(result, "seiAmount", ""),
                explorer_link: ctx.tx_url(hash),
            }),
            None => RenderOutcome::plain(fallback(result)),
        },

        Intent::CryptoSell => match field_str(result, "hash") {
            Some(hash) => RenderOutcome::plain(Fragment::SellSuccess {
                token_amount: field_display(result, "tokenAmount", ""),
                token_symbol: field_display(result, "tokenSymbol", ""),
                explorer_link: ctx.tx_url(hash),
            }),
            None => RenderOutcome::plain(fallback(result)),
        },

        Intent::CryptoPrice => match result.get("data") {
            Some(data) if !data.is_null() => RenderOutcome::plain(Fragment::PriceQuote {
                token_amount: field_display(data, "tokenAmount", ""),
                token_symbol: field_display(data, "tokenSymbol", ""),
                price_in_sei: field_display(data, "priceInSEI", ""),
            }),
            _ => RenderOutcome::plain(fallback(result)),
        },

        Intent::WalletBalance => match result.get("balances").and_then(|b| b.as_object()) {
            Some(balances) => {
                let entries = balances
                    .iter()
                    .map(|(token, balance)| BalanceLine {
                        token: token.clone(),
                        amount: format!("{:.4}", balance.as_f64().unwrap_or(0.0)),
                    })
                    .collect();
                RenderOutcome::plain(Fragment::BalanceSheet {
                    entries,
                    address: field_display(result, "address", ""),
                })
            }
            None => RenderOutcome::plain(fallback(result)),
        },

        Intent::WalletAddress => match field_str(result, "address") {
            Some(address) => RenderOutcome::plain(Fragment::AddressCard {
                address: address.to_string(),
            }),
            None => RenderOutcome::plain(fallback(result)),
        },

        Intent::TransactionHistory => RenderOutcome::plain(Fragment::HistoryNote {
            message: field_display(result, "message", "Transaction history requested"),
            explorer_link: field_str(result, "explorerUrl").map(str::to_string),
            note: field_str(result, "note").map(str::to_string),
        }),

        Intent::GeneralHelp => RenderOutcome::plain(Fragment::HelpCard {
            message: field_display(result, "message", "Here are the available commands..."),
            commands: result
                .get("commands")
                .and_then(|c| c.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
        }),

        Intent::GeneralGreetings => RenderOutcome::plain(Fragment::Greeting {
            message: field_display(result, "message", "Hello! How can I assist you today?"),
            suggestion: field_str(result, "suggestion").map(str::to_string),
        }),

        Intent::Unknown(_) => RenderOutcome::plain(fallback(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RenderContext {
        RenderContext {
            explorer_url: "https://seitrace.com".to_string(),
        }
    }

    fn response(intent: &str, result: Value) -> IntentResponse {
        IntentResponse {
            intent: intent.to_string(),
            result,
        }
    }

    #[test]
    fn parses_every_known_tag() {
        assert_eq!(Intent::parse("crypto.send"), Intent::CryptoSend);
        assert_eq!(Intent::parse("crypto.launchToken"), Intent::CryptoLaunchToken);
        assert_eq!(Intent::parse("crypto.buy"), Intent::CryptoBuy);
        assert_eq!(Intent::parse("crypto.sell"), Intent::CryptoSell);
        assert_eq!(Intent::parse("crypto.price"), Intent::CryptoPrice);
        assert_eq!(Intent::parse("wallet.balance"), Intent::WalletBalance);
        assert_eq!(Intent::parse("wallet.address"), Intent::WalletAddress);
        assert_eq!(
            Intent::parse("transaction.history"),
            Intent::TransactionHistory
        );
        assert_eq!(Intent::parse("general.help"), Intent::GeneralHelp);
        assert_eq!(Intent::parse("general.greetings"), Intent::GeneralGreetings);
        assert_eq!(
            Intent::parse("crypto.stake"),
            Intent::Unknown("crypto.stake".to_string())
        );
    }

    #[test]
    fn send_success_carries_all_fields_and_schedules_refresh() {
        let outcome = render(
            &response(
                "crypto.send",
                json!({"hash": "0xabc", "recipient": "@alice", "tokenSymbol": "SEI", "amount": "0.1"}),
            ),
            &ctx(),
        );
        assert_eq!(
            outcome.fragment,
            Fragment::SendSuccess {
                amount: "0.1".to_string(),
                token_symbol: "SEI".to_string(),
                recipient: "@alice".to_string(),
                hash: "0xabc".to_string(),
            }
        );
        assert_eq!(outcome.transaction_hash.as_deref(), Some("0xabc"));
        assert!(outcome.refresh_balances);
    }

    #[test]
    fn send_defaults_missing_optional_fields() {
        let outcome = render(&response("crypto.send", json!({"hash": "0xabc"})), &ctx());
        assert_eq!(
            outcome.fragment,
            Fragment::SendSuccess {
                amount: "".to_string(),
                token_symbol: "SEI".to_string(),
                recipient: "unknown".to_string(),
                hash: "0xabc".to_string(),
            }
        );
    }

    #[test]
    fn send_without_hash_routes_to_fallback() {
        let outcome = render(
            &response("crypto.send", json!({"message": "insufficient funds"})),
            &ctx(),
        );
        assert_eq!(
            outcome.fragment,
            Fragment::Notice {
                message: "insufficient funds".to_string()
            }
        );
        assert!(!outcome.refresh_balances);
        assert!(outcome.transaction_hash.is_none());
    }

    #[test]
    fn launch_token_requires_both_addresses() {
        let partial = render(
            &response("crypto.launchToken", json!({"tokenAddress": "0x1"})),
            &ctx(),
        );
        assert!(matches!(partial.fragment, Fragment::RawDump { .. }));

        let outcome = render(
            &response(
                "crypto.launchToken",
                json!({
                    "tokenAddress": "0x1",
                    "swapAddress": "0x2",
                    "name": "MyToken",
                    "symbol": "MTK",
                    "supply": 1000000,
                    "price": "0.001"
                }),
            ),
            &ctx(),
        );
        assert_eq!(
            outcome.fragment,
            Fragment::TokenLaunched {
                name: "MyToken".to_string(),
                symbol: "MTK".to_string(),
                supply: "1,000,000".to_string(),
                price: "0.001".to_string(),
                token_address: "0x1".to_string(),
                swap_address: "0x2".to_string(),
            }
        );
        assert_eq!(outcome.transaction_hash.as_deref(), Some("0x1"));
    }

    #[test]
    fn buy_and_sell_link_to_the_explorer() {
        let buy = render(
            &response(
                "crypto.buy",
                json!({"hash": "0xfeed", "tokenSymbol": "SBC", "seiAmount": "2"}),
            ),
            &ctx(),
        );
        match buy.fragment {
            Fragment::BuySuccess { explorer_link, .. } => {
                assert_eq!(explorer_link, "https://seitrace.com/tx/0xfeed?chain=atlantic-2");
            }
            other => panic!("unexpected fragment: {:?}", other),
        }

        let sell = render(
            &response(
                "crypto.sell",
                json!({"hash": "0xdead", "tokenAmount": "5", "tokenSymbol": "SBC"}),
            ),
            &ctx(),
        );
        match sell.fragment {
            Fragment::SellSuccess {
                token_amount,
                explorer_link,
                ..
            } => {
                assert_eq!(token_amount, "5");
                assert!(explorer_link.contains("0xdead"));
            }
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn price_quote_reads_nested_data() {
        let outcome = render(
            &response(
                "crypto.price",
                json!({"data": {"tokenAmount": "10", "tokenSymbol": "SBC", "priceInSEI": 0.5}}),
            ),
            &ctx(),
        );
        assert_eq!(
            outcome.fragment,
            Fragment::PriceQuote {
                token_amount: "10".to_string(),
                token_symbol: "SBC".to_string(),
                price_in_sei: "0.5".to_string(),
            }
        );
    }

    #[test]
    fn balance_sheet_formats_four_decimals() {
        let outcome = render(
            &response(
                "wallet.balance",
                json!({"balances": {"SEI": 1.23456789, "SBC": 2}, "address": "0xme"}),
            ),
            &ctx(),
        );
        match outcome.fragment {
            Fragment::BalanceSheet { entries, address } => {
                assert_eq!(address, "0xme");
                assert!(entries.contains(&BalanceLine {
                    token: "SEI".to_string(),
                    amount: "1.2346".to_string()
                }));
                assert!(entries.contains(&BalanceLine {
                    token: "SBC".to_string(),
                    amount: "2.0000".to_string()
                }));
            }
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn history_help_and_greetings_have_defaults() {
        let history = render(&response("transaction.history", json!({})), &ctx());
        assert_eq!(
            history.fragment,
            Fragment::HistoryNote {
                message: "Transaction history requested".to_string(),
                explorer_link: None,
                note: None,
            }
        );

        let help = render(&response("general.help", json!({})), &ctx());
        assert_eq!(
            help.fragment,
            Fragment::HelpCard {
                message: "Here are the available commands...".to_string(),
                commands: Vec::new(),
            }
        );

        let greetings = render(
            &response("general.greetings", json!({"suggestion": "Try 'Show balance'"})),
            &ctx(),
        );
        assert_eq!(
            greetings.fragment,
            Fragment::Greeting {
                message: "Hello! How can I assist you today?".to_string(),
                suggestion: Some("Try 'Show balance'".to_string()),
            }
        );
    }

    #[test]
    fn unknown_intent_falls_back_in_order() {
        let message_wins = render(
            &response("weird.tag", json!({"message": "m", "error": "e"})),
            &ctx(),
        );
        assert_eq!(
            message_wins.fragment,
            Fragment::Notice {
                message: "m".to_string()
            }
        );

        let error_next = render(&response("weird.tag", json!({"error": "e"})), &ctx());
        assert_eq!(
            error_next.fragment,
            Fragment::ErrorNotice {
                message: "e".to_string()
            }
        );

        let dump_last = render(&response("weird.tag", json!({"other": 1})), &ctx());
        match dump_last.fragment {
            Fragment::RawDump { payload } => assert!(payload.contains("\"other\"")),
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn string_result_dumps_verbatim() {
        let outcome = render(&response("weird.tag", json!("plain answer")), &ctx());
        assert_eq!(
            outcome.fragment,
            Fragment::RawDump {
                payload: "plain answer".to_string()
            }
        );
    }

    #[test]
    fn empty_message_falls_through_to_error() {
        let outcome = render(
            &response("weird.tag", json!({"message": "", "error": "boom"})),
            &ctx(),
        );
        assert_eq!(
            outcome.fragment,
            Fragment::ErrorNotice {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn group_thousands_handles_fractions_and_sign() {
        assert_eq!(group_thousands(1000000.0), "1,000,000");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-42.0), "-42");
        assert_eq!(group_thousands(0.0), "0");
    }
}
