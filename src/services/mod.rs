// All service modules
pub mod balance_aggregator;
pub mod intent_renderer;

// Re-export for convenience
pub use balance_aggregator::BalanceAggregator;
pub use intent_renderer::{render, Intent, IntentResponse, RenderContext, RenderOutcome};
