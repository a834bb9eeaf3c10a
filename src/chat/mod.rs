pub mod fragment;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::WELCOME_MESSAGE;
use crate::models::Balance;
use fragment::Fragment;

/// One chat turn. Immutable once appended; lives only in process memory.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: Fragment,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Per-session UI state. Mutated only through the transition methods below;
/// the message list is append-only.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    pub balances: Vec<Balance>,
    pub total_value: f64,
    pub loading: bool,
    next_seq: u64,
}

impl ChatState {
    /// A fresh session opens with the seeded assistant greeting.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.append_bot_message(
            Fragment::Text {
                value: WELCOME_MESSAGE.to_string(),
            },
            None,
        );
        state
    }

    pub fn append_user_message(&mut self, text: &str) -> String {
        let id = self.next_id("user");
        self.messages.push(ChatMessage {
            id: id.clone(),
            content: Fragment::Text {
                value: text.to_string(),
            },
            is_user: true,
            timestamp: Utc::now(),
            transaction_hash: None,
        });
        id
    }

    pub fn append_bot_message(
        &mut self,
        content: Fragment,
        transaction_hash: Option<String>,
    ) -> String {
        let id = self.next_id("bot");
        self.messages.push(ChatMessage {
            id: id.clone(),
            content,
            is_user: false,
            timestamp: Utc::now(),
            transaction_hash,
        });
        id
    }

    /// Balances are replaced wholesale on every refresh; entries have no
    /// identity across refreshes.
    pub fn set_balances(&mut self, balances: Vec<Balance>, total_value: f64) {
        self.balances = balances;
        self.total_value = total_value;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn next_id(&mut self, suffix: &str) -> String {
        self.next_seq += 1;
        format!("{}-{}", self.next_seq, suffix)
    }
}

/// In-memory session registry keyed by wallet address. Nothing survives a
/// restart.
pub type SessionStore = Arc<Mutex<HashMap<String, ChatState>>>;

pub fn new_session_store() -> SessionStore {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Sessions are locked for short, synchronous critical sections only. A
/// poisoned lock recovers the inner map rather than taking the process down.
pub fn lock(store: &SessionStore) -> std::sync::MutexGuard<'_, HashMap<String, ChatState>> {
    store
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
