//! Repository implementations
//!
//! Both repositories translate store statuses into the local taxonomy and
//! report every store response to an [`OperationObserver`](orbital_domain::ports::OperationObserver).

mod bulk_repository;
mod document_repository;
mod support;

pub use bulk_repository::DocumentBulkRepository;
pub use document_repository::DocumentRepository;
