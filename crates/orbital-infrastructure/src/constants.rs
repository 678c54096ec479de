//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `orbital_domain::constants`.

use std::time::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "orbital.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "orbital";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ORBITAL";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Map fields whose keys are entity type names and keep their case when
/// read from environment variables
pub const CONFIG_CASE_PRESERVING_KEYS: &[&str] = &["entity_policies", "containers"];

/// Default logical database name
pub const DEFAULT_DATABASE_NAME: &str = "orbital";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "ORBITAL_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "orbital";

// ============================================================================
// DURABILITY CONSTANTS
// ============================================================================

/// Pipeline name used when no entity-specific pipeline is registered
pub const DEFAULT_POLICY_NAME: &str = "orbital-custom-policy";

/// Retries after the first attempt
pub const RETRY_DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base delay between attempts
pub const RETRY_DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Upper bound for a single retry delay
pub const RETRY_DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Failure ratio at which the breaker opens
pub const CIRCUIT_BREAKER_DEFAULT_FAILURE_RATIO: f64 = 0.5;

/// Calls that must be observed in a sampling window before it can open
pub const CIRCUIT_BREAKER_DEFAULT_MINIMUM_THROUGHPUT: u32 = 5;

/// Length of the breaker's sampling window
pub const CIRCUIT_BREAKER_DEFAULT_SAMPLING_DURATION: Duration = Duration::from_secs(30);

/// Cap on the default break duration
pub const CIRCUIT_BREAKER_MAX_BREAK_DURATION: Duration = Duration::from_secs(60);
