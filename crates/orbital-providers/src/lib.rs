//! # Orbital - Provider Implementations
//!
//! Implementations of the ports and repository contracts defined in
//! `orbital-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Repository | `Repository` | [`DocumentRepository`] |
//! | Bulk Repository | `BulkRepository` | [`DocumentBulkRepository`] |
//! | Document Store | `DocumentStore` | [`InMemoryDocumentStore`] |
//! | Observability | `OperationObserver` | [`TracingOperationObserver`], [`NullOperationObserver`] |
//!
//! ## Usage
//!
//! ```ignore
//! use orbital_providers::{DocumentRepository, InMemoryDocumentStore, TracingOperationObserver};
//!
//! let store = Arc::new(InMemoryDocumentStore::new("items"));
//! let repo = DocumentRepository::<SampleItem>::new(store, Arc::new(TracingOperationObserver));
//! ```

pub use orbital_domain::error::{Error, Result};
pub use orbital_domain::ports::{DocumentStore, OperationObserver};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Document store implementations
pub mod document_store;

/// Observer implementations
pub mod observability;

/// Repository implementations over the document store port
pub mod repository;

#[cfg(feature = "store-memory")]
pub use document_store::InMemoryDocumentStore;
pub use observability::{NullOperationObserver, TracingOperationObserver};
pub use repository::{DocumentBulkRepository, DocumentRepository};
