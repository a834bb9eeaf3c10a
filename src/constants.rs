/// Application constants

// Sei testnet (atlantic-2) chain parameters
pub const SEI_CHAIN_ID: u64 = 1328;
pub const SEI_RPC_URL_DEFAULT: &str = "https://evm-rpc-testnet.sei-apis.com";
pub const SEI_EXPLORER_URL_DEFAULT: &str = "https://seitrace.com";
pub const SEI_EXPLORER_CHAIN_SUFFIX: &str = "chain=atlantic-2";
pub const NATIVE_SYMBOL: &str = "SEI";
pub const NATIVE_DECIMALS: u32 = 18;

// ERC-20 balanceOf(address) 4-byte selector
pub const BALANCE_OF_SELECTOR: &str = "0x70a08231";

// Default decimals for backend-listed tokens that do not declare their own
pub const TOKEN_DECIMALS_DEFAULT: u32 = 18;

// Price oracle
pub const COINGECKO_API_URL_DEFAULT: &str = "https://api.coingecko.com";

// Chain state is given a moment to settle before balances are re-read
// after a confirmed send. Heuristic, not a receipt wait.
pub const BALANCE_REFRESH_DELAY_SECS: u64 = 3;

// First bot turn of every new chat session
pub const WELCOME_MESSAGE: &str = "Welcome to SeiBot! I can help you send funds, check balances, and more. Try typing 'Send 0.1 SEI to @username' or 'Show balance' to get started.";

// API version
pub const API_VERSION: &str = "v1";
