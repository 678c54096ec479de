//! Tests for the in-memory document store

use orbital_domain::PartitionKey;
use orbital_domain::ports::{DocumentStore, StoreStatus};
use orbital_providers::InMemoryDocumentStore;
use serde_json::json;

fn pk() -> PartitionKey {
    PartitionKey::new("tenant-1")
}

#[tokio::test]
async fn test_create_stamps_etag() {
    let store = InMemoryDocumentStore::new("items");
    let response = store
        .create_item(json!({"id": "a", "value": 1}), &pk())
        .await
        .unwrap();

    assert_eq!(response.status, StoreStatus::Success(201));
    let resource = response.resource.unwrap();
    assert!(resource["_etag"].is_string());
    assert_eq!(
        store.current_etag("a", &pk()).as_deref(),
        resource["_etag"].as_str()
    );
}

#[tokio::test]
async fn test_create_duplicate_conflicts() {
    let store = InMemoryDocumentStore::new("items");
    store.create_item(json!({"id": "a"}), &pk()).await.unwrap();
    let response = store.create_item(json!({"id": "a"}), &pk()).await.unwrap();

    assert_eq!(response.status, StoreStatus::Conflict);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_same_id_in_different_partitions() {
    let store = InMemoryDocumentStore::new("items");
    store.create_item(json!({"id": "a"}), &pk()).await.unwrap();
    let response = store
        .create_item(json!({"id": "a"}), &PartitionKey::new("tenant-2"))
        .await
        .unwrap();

    assert!(response.status.is_success());
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_missing_id_is_bad_request() {
    let store = InMemoryDocumentStore::new("items");
    let response = store.create_item(json!({"value": 1}), &pk()).await.unwrap();

    assert_eq!(response.status, StoreStatus::Other(400));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_upsert_with_stale_etag_fails_precondition() {
    let store = InMemoryDocumentStore::new("items");
    store.create_item(json!({"id": "a"}), &pk()).await.unwrap();
    let before = store.current_etag("a", &pk());

    let response = store
        .upsert_item(json!({"id": "a", "value": 2}), &pk(), Some("stale"))
        .await
        .unwrap();

    assert_eq!(response.status, StoreStatus::PreconditionFailed);
    assert_eq!(store.current_etag("a", &pk()), before);
}

#[tokio::test]
async fn test_upsert_with_current_etag_rotates_it() {
    let store = InMemoryDocumentStore::new("items");
    store.create_item(json!({"id": "a"}), &pk()).await.unwrap();
    let before = store.current_etag("a", &pk()).unwrap();

    let response = store
        .upsert_item(json!({"id": "a", "value": 2}), &pk(), Some(&before))
        .await
        .unwrap();

    assert_eq!(response.status, StoreStatus::Success(200));
    let after = store.current_etag("a", &pk()).unwrap();
    assert_ne!(before, after);
}

#[tokio::test]
async fn test_conditioned_upsert_of_missing_document_is_not_found() {
    let store = InMemoryDocumentStore::new("items");
    let response = store
        .upsert_item(json!({"id": "ghost"}), &pk(), Some("etag"))
        .await
        .unwrap();

    assert_eq!(response.status, StoreStatus::NotFound);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_unconditioned_upsert_inserts() {
    let store = InMemoryDocumentStore::new("items");
    let response = store
        .upsert_item(json!({"id": "a"}), &pk(), None)
        .await
        .unwrap();

    assert_eq!(response.status, StoreStatus::Success(201));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let store = InMemoryDocumentStore::new("items");
    let response = store.delete_item("ghost", &pk()).await.unwrap();
    assert_eq!(response.status, StoreStatus::NotFound);
}

#[tokio::test]
async fn test_read_many_returns_only_present_ids() {
    let store = InMemoryDocumentStore::new("items");
    for id in ["a", "b", "c"] {
        store.create_item(json!({"id": id}), &pk()).await.unwrap();
    }

    let ids = vec!["a".to_string(), "c".to_string(), "zz".to_string()];
    let feed = store.read_many_items(&ids, &pk()).await.unwrap();

    assert!(feed.status.is_success());
    assert_eq!(feed.resources.len(), 2);
}
