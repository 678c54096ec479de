//! # Orbital Infrastructure
//!
//! Cross-cutting concerns around the repositories:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | `OrbitalConfig` and its figment loader |
//! | [`logging`] | `tracing-subscriber` setup |
//! | [`resilience`] | Retry + circuit-breaker pipelines and their registry |
//! | [`durability`] | Policy lookup and durable repository decorators |
//! | [`bootstrap`] | `RepositoryFactory`, the explicit composition root |

/// Composition root
pub mod bootstrap;
/// Configuration management
pub mod config;
/// Infrastructure constants
pub mod constants;
/// Durable repository decorators
pub mod durability;
/// Error context helpers
pub mod error_ext;
/// Structured logging
pub mod logging;
/// Resilience pipelines
pub mod resilience;

pub use bootstrap::RepositoryFactory;
pub use config::{ConfigLoader, OrbitalConfig};
pub use durability::{
    DefaultDurabilityPolicyProvider, DurabilityPolicyProvider, DurableBulkRepository,
    DurableRepository, NullDurabilityPolicyProvider,
};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
pub use resilience::{
    CircuitBreakerOptions, ResiliencePipeline, ResiliencePipelineRegistry, RetryOptions,
};
