//! Named pipeline registry

use super::pipeline::{ResiliencePipeline, ResiliencePipelineBuilder};
use crate::config::DurabilityConfig;
use crate::constants::DEFAULT_POLICY_NAME;
use crate::error_ext::config_error;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use orbital_domain::entities::Entity;
use orbital_domain::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Pipelines registered once at start-up and shared for the process lifetime
#[derive(Default)]
pub struct ResiliencePipelineRegistry {
    pipelines: DashMap<String, Arc<ResiliencePipeline>>,
}

impl ResiliencePipelineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every pipeline described by `config`
    ///
    /// The default policy goes under the default name and each entity policy
    /// under its entity type name.
    pub fn from_config(config: &DurabilityConfig) -> Result<Self> {
        let registry = Self::new();
        registry.insert(config.default_policy.build_pipeline(DEFAULT_POLICY_NAME))?;
        for (name, policy) in &config.entity_policies {
            registry.insert(policy.build_pipeline(name))?;
        }
        Ok(registry)
    }

    /// Register the pipeline used by entities without their own
    pub fn add_resilience_pipeline<F>(&self, configure: F) -> Result<Arc<ResiliencePipeline>>
    where
        F: FnOnce(ResiliencePipelineBuilder) -> ResiliencePipelineBuilder,
    {
        self.add_named(DEFAULT_POLICY_NAME, configure)
    }

    /// Register the pipeline used by entities of kind `E`
    pub fn add_resilience_pipeline_for_entity<E, F>(
        &self,
        configure: F,
    ) -> Result<Arc<ResiliencePipeline>>
    where
        E: Entity,
        F: FnOnce(ResiliencePipelineBuilder) -> ResiliencePipelineBuilder,
    {
        self.add_named(E::TYPE_NAME, configure)
    }

    /// Register a pipeline under `name`
    pub fn add_named<F>(&self, name: &str, configure: F) -> Result<Arc<ResiliencePipeline>>
    where
        F: FnOnce(ResiliencePipelineBuilder) -> ResiliencePipelineBuilder,
    {
        self.insert(configure(ResiliencePipeline::builder(name)).build())
    }

    /// Register an already built pipeline under its own name
    ///
    /// Names are unique; registering one twice is a configuration error.
    pub fn insert(&self, pipeline: ResiliencePipeline) -> Result<Arc<ResiliencePipeline>> {
        match self.pipelines.entry(pipeline.name().to_string()) {
            Entry::Occupied(slot) => Err(config_error(format!(
                "Resilience pipeline '{}' is already registered",
                slot.key()
            ))),
            Entry::Vacant(slot) => {
                debug!(pipeline = %pipeline.name(), "Registered resilience pipeline");
                let pipeline = Arc::new(pipeline);
                slot.insert(Arc::clone(&pipeline));
                Ok(pipeline)
            }
        }
    }

    /// Pipeline registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<ResiliencePipeline>> {
        self.pipelines.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Registered names
    pub fn names(&self) -> Vec<String> {
        self.pipelines.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of registered pipelines
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}
