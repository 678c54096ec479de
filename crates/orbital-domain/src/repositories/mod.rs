//! Repository Interfaces
//!
//! Contracts callers depend on. Base implementations live in
//! `orbital-providers`; durable decorators in `orbital-infrastructure`
//! implement the same traits, so the two are interchangeable.
//!
//! ## Repositories
//!
//! | Repository | Description |
//! |------------|-------------|
//! | [`Repository`] | Single-item CRUD with optimistic concurrency |
//! | [`BulkRepository`] | Concurrent multi-item writes and batched reads |

/// Bulk repository interface
pub mod bulk_repository;
/// Single-item repository interface
pub mod repository;

pub use bulk_repository::BulkRepository;
pub use repository::Repository;
