//! Main application configuration

use super::{BulkConfig, DatabaseConfig, DurabilityConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [durability]
/// use_custom_retry_policies = true
///
/// [durability.entity_policies.Order.retry]
/// max_retry_attempts = 8
///
/// [bulk]
/// max_concurrency = 32
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrbitalConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry and circuit-breaker policies
    #[serde(default)]
    pub durability: DurabilityConfig,

    /// Bulk fan-out settings
    #[serde(default)]
    pub bulk: BulkConfig,

    /// Database and container naming
    #[serde(default)]
    pub database: DatabaseConfig,
}
