//! Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`DocumentStore`] | Per-item and batched document operations against one container |
//! | [`OperationObserver`] | Fire-and-forget sink for per-operation statistics |

/// Document store port
pub mod document_store;
/// Observability port
pub mod observability;

pub use document_store::{DocumentStore, FeedResponse, StoreDiagnostics, StoreResponse, StoreStatus};
pub use observability::OperationObserver;
