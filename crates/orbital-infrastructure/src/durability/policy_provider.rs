//! Policy lookup for durable repositories

use crate::constants::DEFAULT_POLICY_NAME;
use crate::resilience::{ResiliencePipeline, ResiliencePipelineRegistry};
use orbital_domain::entities::Entity;
use std::sync::Arc;
use tracing::debug;

/// Source of named resilience pipelines
pub trait DurabilityPolicyProvider: Send + Sync {
    /// Pipeline registered under `name`
    fn get_policy(&self, name: &str) -> Option<Arc<ResiliencePipeline>>;
}

/// Provider backed by a [`ResiliencePipelineRegistry`]
pub struct DefaultDurabilityPolicyProvider {
    registry: Arc<ResiliencePipelineRegistry>,
}

impl DefaultDurabilityPolicyProvider {
    /// Create a provider over `registry`
    pub fn new(registry: Arc<ResiliencePipelineRegistry>) -> Self {
        Self { registry }
    }

    /// Backing registry
    pub fn registry(&self) -> &ResiliencePipelineRegistry {
        &self.registry
    }
}

impl DurabilityPolicyProvider for DefaultDurabilityPolicyProvider {
    fn get_policy(&self, name: &str) -> Option<Arc<ResiliencePipeline>> {
        self.registry.get(name)
    }
}

/// Provider with no pipelines; every entity resolves to the empty pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDurabilityPolicyProvider;

impl DurabilityPolicyProvider for NullDurabilityPolicyProvider {
    fn get_policy(&self, _name: &str) -> Option<Arc<ResiliencePipeline>> {
        None
    }
}

/// Pipeline for entities of kind `E`
///
/// Looks up `E::TYPE_NAME`, then the default policy name, and falls back to
/// [`ResiliencePipeline::empty`].
pub fn resolve_policy<E: Entity>(provider: &dyn DurabilityPolicyProvider) -> Arc<ResiliencePipeline> {
    if let Some(pipeline) = provider.get_policy(E::TYPE_NAME) {
        debug!(entity_type = E::TYPE_NAME, pipeline = %pipeline.name(), "Using entity resilience pipeline");
        return pipeline;
    }
    if let Some(pipeline) = provider.get_policy(DEFAULT_POLICY_NAME) {
        debug!(entity_type = E::TYPE_NAME, pipeline = %pipeline.name(), "Using default resilience pipeline");
        return pipeline;
    }
    debug!(entity_type = E::TYPE_NAME, "No resilience pipeline registered, calls run once");
    Arc::new(ResiliencePipeline::empty())
}
