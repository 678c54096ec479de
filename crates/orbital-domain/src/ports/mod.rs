//! External collaborator ports
//!
//! Traits the core depends on and providers implement.

/// Provider ports (document store, observer)
pub mod providers;

pub use providers::{
    DocumentStore, FeedResponse, OperationObserver, StoreDiagnostics, StoreResponse, StoreStatus,
};
