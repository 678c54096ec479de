//! Durable repositories
//!
//! Decorators that run every repository call through the resilience
//! pipeline resolved for the entity type. The pipeline is resolved once,
//! when the decorator is built.

pub mod durable_bulk_repository;
pub mod durable_repository;
pub mod policy_provider;

pub use durable_bulk_repository::DurableBulkRepository;
pub use durable_repository::DurableRepository;
pub use policy_provider::{
    DefaultDurabilityPolicyProvider, DurabilityPolicyProvider, NullDurabilityPolicyProvider,
    resolve_policy,
};
