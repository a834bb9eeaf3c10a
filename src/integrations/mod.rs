// External collaborators: the remote intent backend and the price oracle.
pub mod coingecko;
pub mod intent_backend;

pub use coingecko::PriceOracle;
pub use intent_backend::IntentBackendClient;
