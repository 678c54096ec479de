//! Pipeline registry and policy resolution tests

use crate::common::{AuditRecord, TestDocument};
use orbital_domain::Entity;
use orbital_infrastructure::config::{DurabilityConfig, PolicyConfig};
use orbital_infrastructure::constants::DEFAULT_POLICY_NAME;
use orbital_infrastructure::durability::{
    DefaultDurabilityPolicyProvider, DurabilityPolicyProvider, NullDurabilityPolicyProvider,
    resolve_policy,
};
use orbital_infrastructure::resilience::{ResiliencePipelineRegistry, RetryOptions};
use std::sync::Arc;

fn provider(registry: ResiliencePipelineRegistry) -> DefaultDurabilityPolicyProvider {
    DefaultDurabilityPolicyProvider::new(Arc::new(registry))
}

#[test]
fn test_entity_policy_takes_precedence_over_default() {
    let registry = ResiliencePipelineRegistry::new();
    registry
        .add_resilience_pipeline(|builder| builder.add_retry(RetryOptions::default()))
        .unwrap();
    registry
        .add_resilience_pipeline_for_entity::<TestDocument, _>(|builder| {
            builder.add_retry(RetryOptions::default().with_max_retry_attempts(8))
        })
        .unwrap();
    let provider = provider(registry);

    let pipeline = resolve_policy::<TestDocument>(&provider);

    assert_eq!(pipeline.name(), TestDocument::TYPE_NAME);
    assert_eq!(pipeline.retry().unwrap().max_retry_attempts, 8);
}

#[test]
fn test_default_policy_used_without_entity_policy() {
    let registry = ResiliencePipelineRegistry::new();
    registry
        .add_resilience_pipeline(|builder| builder.add_retry(RetryOptions::default()))
        .unwrap();
    registry
        .add_resilience_pipeline_for_entity::<TestDocument, _>(|builder| builder)
        .unwrap();
    let provider = provider(registry);

    let pipeline = resolve_policy::<AuditRecord>(&provider);

    assert_eq!(pipeline.name(), DEFAULT_POLICY_NAME);
}

#[test]
fn test_empty_pipeline_when_nothing_registered() {
    let pipeline = resolve_policy::<TestDocument>(&provider(ResiliencePipelineRegistry::new()));
    assert!(pipeline.is_empty());

    let pipeline = resolve_policy::<TestDocument>(&NullDurabilityPolicyProvider);
    assert!(pipeline.is_empty());
}

#[test]
fn test_resolved_pipeline_is_shared() {
    let registry = ResiliencePipelineRegistry::new();
    let registered = registry
        .add_resilience_pipeline(|builder| builder.add_retry(RetryOptions::default()))
        .unwrap();
    let provider = provider(registry);

    let first = resolve_policy::<TestDocument>(&provider);
    let second = resolve_policy::<AuditRecord>(&provider);

    assert!(Arc::ptr_eq(&first, &registered));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let registry = ResiliencePipelineRegistry::new();
    registry.add_resilience_pipeline(|builder| builder).unwrap();

    let err = registry.add_resilience_pipeline(|builder| builder).unwrap_err();

    assert!(err.to_string().contains(DEFAULT_POLICY_NAME));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_get_policy_by_name() {
    let registry = ResiliencePipelineRegistry::new();
    registry.add_named("reports", |builder| builder).unwrap();
    let provider = provider(registry);

    assert!(provider.get_policy("reports").is_some());
    assert!(provider.get_policy("missing").is_none());
    assert_eq!(provider.registry().names(), vec!["reports".to_string()]);
}

#[test]
fn test_registry_from_config() {
    let mut config = DurabilityConfig::default();
    config.entity_policies.insert(
        TestDocument::TYPE_NAME.to_string(),
        PolicyConfig {
            circuit_breaker: None,
            ..PolicyConfig::default()
        },
    );

    let registry = ResiliencePipelineRegistry::from_config(&config).unwrap();

    assert_eq!(registry.len(), 2);
    let default = registry.get(DEFAULT_POLICY_NAME).unwrap();
    assert!(default.retry().is_some());
    assert!(default.circuit_breaker().is_some());
    let entity = registry.get(TestDocument::TYPE_NAME).unwrap();
    assert!(entity.circuit_breaker().is_none());
}
