//! Configuration types module

pub mod app;
pub mod bulk;
pub mod database;
pub mod durability;
pub mod logging;

// Re-export main types
pub use app::*;
pub use bulk::BulkConfig;
pub use database::DatabaseConfig;
pub use durability::{CircuitBreakerConfig, DurabilityConfig, PolicyConfig, RetryConfig};
pub use logging::LoggingConfig;
