//! Composition root
//!
//! Builds repositories explicitly: the base implementation over the
//! document store, optionally wrapped in the durable decorator when a policy
//! provider is configured.
//!
//! ```ignore
//! let config = ConfigLoader::new().load()?;
//! let factory = RepositoryFactory::in_memory(&config)?;
//! let orders: Arc<dyn Repository<Order>> = factory.repository::<Order>();
//! ```

use crate::config::OrbitalConfig;
use crate::durability::{
    DefaultDurabilityPolicyProvider, DurabilityPolicyProvider, DurableBulkRepository,
    DurableRepository,
};
use crate::resilience::ResiliencePipelineRegistry;
use orbital_domain::entities::Entity;
use orbital_domain::error::Result;
use orbital_domain::ports::{DocumentStore, OperationObserver};
use orbital_domain::repositories::{BulkRepository, Repository};
use orbital_providers::{
    DocumentBulkRepository, DocumentRepository, InMemoryDocumentStore, TracingOperationObserver,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Factory for repositories sharing one store setup, observer and policy set
pub struct RepositoryFactory {
    default_store: Arc<dyn DocumentStore>,
    entity_stores: HashMap<String, Arc<dyn DocumentStore>>,
    observer: Arc<dyn OperationObserver>,
    policy_provider: Option<Arc<dyn DurabilityPolicyProvider>>,
    max_concurrency: Option<usize>,
}

impl RepositoryFactory {
    /// Factory over `store` with the tracing observer and no durability
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            default_store: store,
            entity_stores: HashMap::new(),
            observer: Arc::new(TracingOperationObserver::new()),
            policy_provider: None,
            max_concurrency: None,
        }
    }

    /// Factory configured from `config` over `store`
    ///
    /// With `use_custom_retry_policies` set, the configured pipelines are
    /// registered and every repository is wrapped in a durable decorator.
    pub fn from_config(config: &OrbitalConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let mut factory = Self::new(store).with_max_concurrency(config.bulk.max_concurrency);
        if config.durability.use_custom_retry_policies {
            let registry = ResiliencePipelineRegistry::from_config(&config.durability)?;
            info!(pipelines = registry.len(), "Custom retry policies enabled");
            factory = factory.with_policy_provider(Arc::new(
                DefaultDurabilityPolicyProvider::new(Arc::new(registry)),
            ));
        }
        Ok(factory)
    }

    /// Factory over in-memory stores named after the configured database
    /// and containers
    pub fn in_memory(config: &OrbitalConfig) -> Result<Self> {
        let database = &config.database;
        let mut factory = Self::from_config(
            config,
            Arc::new(InMemoryDocumentStore::new(database.database_name.clone())),
        )?;
        for (type_name, container) in &database.containers {
            factory.entity_stores.insert(
                type_name.clone(),
                Arc::new(InMemoryDocumentStore::new(container.clone())),
            );
        }
        Ok(factory)
    }

    /// Replace the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn OperationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Wrap every repository built from now on in durable decorators
    #[must_use]
    pub fn with_policy_provider(mut self, provider: Arc<dyn DurabilityPolicyProvider>) -> Self {
        self.policy_provider = Some(provider);
        self
    }

    /// Cap in-flight per-item calls of bulk repositories
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Use `store` for entities of kind `E`
    #[must_use]
    pub fn with_store_for<E: Entity>(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.entity_stores.insert(E::TYPE_NAME.to_string(), store);
        self
    }

    /// Store serving entities of kind `E`
    pub fn store_for<E: Entity>(&self) -> Arc<dyn DocumentStore> {
        self.entity_stores
            .get(E::TYPE_NAME)
            .map_or_else(|| Arc::clone(&self.default_store), Arc::clone)
    }

    /// True when repositories are wrapped in durable decorators
    pub fn is_durable(&self) -> bool {
        self.policy_provider.is_some()
    }

    /// Single-item repository for `E`
    pub fn repository<E: Entity>(&self) -> Arc<dyn Repository<E>> {
        let base: Arc<dyn Repository<E>> = Arc::new(DocumentRepository::<E>::new(
            self.store_for::<E>(),
            Arc::clone(&self.observer),
        ));
        match &self.policy_provider {
            Some(provider) => Arc::new(DurableRepository::new(base, provider.as_ref())),
            None => base,
        }
    }

    /// Bulk repository for `E`
    pub fn bulk_repository<E: Entity>(&self) -> Arc<dyn BulkRepository<E>> {
        let base: Arc<dyn BulkRepository<E>> = Arc::new(
            DocumentBulkRepository::<E>::new(self.store_for::<E>(), Arc::clone(&self.observer))
                .with_max_concurrency(self.max_concurrency),
        );
        match &self.policy_provider {
            Some(provider) => Arc::new(DurableBulkRepository::new(base, provider.as_ref())),
            None => base,
        }
    }
}
