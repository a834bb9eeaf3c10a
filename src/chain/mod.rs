pub mod evm_client;

pub use evm_client::EvmRpcClient;
