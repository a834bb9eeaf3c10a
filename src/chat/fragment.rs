use serde::Serialize;

/// One line of a rendered wallet-balance sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BalanceLine {
    pub token: String,
    pub amount: String,
}

/// The message-content model: every chat turn is one of these variants, and
/// the renderer is a pure function from an intent response into this type.
/// Serialized with a `kind` tag so any front end can template on it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Fragment {
    /// Plain text turn (user input, seeded greetings).
    Text { value: String },
    /// Confirmed transfer.
    SendSuccess {
        amount: String,
        token_symbol: String,
        recipient: String,
        hash: String,
    },
    /// Token deployment confirmation.
    TokenLaunched {
        name: String,
        symbol: String,
        supply: String,
        price: String,
        token_address: String,
        swap_address: String,
    },
    BuySuccess {
        token_symbol: String,
        sei_amount: String,
        explorer_link: String,
    },
    SellSuccess {
        token_amount: String,
        token_symbol: String,
        explorer_link: String,
    },
    PriceQuote {
        token_amount: String,
        token_symbol: String,
        price_in_sei: String,
    },
    BalanceSheet {
        entries: Vec<BalanceLine>,
        address: String,
    },
    AddressCard { address: String },
    HistoryNote {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        explorer_link: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    HelpCard {
        message: String,
        commands: Vec<String>,
    },
    Greeting {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
    /// Fallback level 1: the backend supplied a human-readable message.
    Notice { message: String },
    /// Fallback level 2: the backend supplied only an error field.
    ErrorNotice { message: String },
    /// Fallback level 3: nothing recognizable, dump the payload.
    RawDump { payload: String },
    /// The submission itself failed in transit.
    ConnectionError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_serialize_with_kind_tag() {
        let fragment = Fragment::SendSuccess {
            amount: "0.1".to_string(),
            token_symbol: "SEI".to_string(),
            recipient: "@alice".to_string(),
            hash: "0xabc".to_string(),
        };
        let json = serde_json::to_value(&fragment).unwrap();
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("sendSuccess"));
        assert_eq!(json.get("tokenSymbol").and_then(|v| v.as_str()), Some("SEI"));
    }

    #[test]
    fn text_fragment_keeps_value_field() {
        let json = serde_json::to_value(Fragment::Text {
            value: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("text"));
        assert_eq!(json.get("value").and_then(|v| v.as_str()), Some("hi"));
    }

    #[test]
    fn history_note_omits_absent_options() {
        let json = serde_json::to_value(Fragment::HistoryNote {
            message: "m".to_string(),
            explorer_link: None,
            note: None,
        })
        .unwrap();
        assert!(json.get("explorerLink").is_none());
        assert!(json.get("note").is_none());
    }
}
