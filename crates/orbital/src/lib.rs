//! # Orbital
//!
//! Durable repositories over a partitioned document store.
//!
//! Entities are serde documents addressed by id inside a partition. The
//! base repositories translate store outcomes into `Option`/`bool` values;
//! durable decorators wrap them in a named resilience pipeline (retry around
//! a circuit breaker) looked up by entity type.
//!
//! ## Example
//!
//! ```ignore
//! use orbital::{ConfigLoader, PartitionKey, RepositoryFactory, CancellationToken};
//!
//! let config = ConfigLoader::new().load()?;
//! let factory = RepositoryFactory::in_memory(&config)?;
//! let orders = factory.repository::<Order>();
//!
//! let pk = PartitionKey::new("tenant-1");
//! let created = orders.create(&order, &pk, &CancellationToken::new()).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - entity model, errors, store and observer ports, repository contracts
//! - `providers` - base repositories, in-memory store, observers
//! - `infrastructure` - config, logging, resilience pipelines, durable decorators

/// Domain layer - entities, errors, ports and repository contracts
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use orbital_domain::*;
}

/// Provider layer - base repository and store implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use orbital_providers::*;
}

/// Infrastructure layer - configuration, logging and durability
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use orbital_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the composition root and its configuration
pub use infrastructure::{ConfigLoader, OrbitalConfig, RepositoryFactory, init_logging};

// Re-export the in-memory store for tests and local runs
pub use providers::InMemoryDocumentStore;
