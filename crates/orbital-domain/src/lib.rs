//! # Orbital Domain
//!
//! Core types and contracts for the Orbital data-access layer. This crate
//! has no knowledge of how documents are stored or how failures are retried;
//! it only describes the shapes that flow between those layers.
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`entities`] | [`Entity`] capability trait, [`EntityBase`], audit block |
//! | [`value_objects`] | [`PartitionKey`], bulk results, operation statistics |
//! | [`ports`] | Document store and observer ports implemented by providers |
//! | [`repositories`] | [`Repository`] and [`BulkRepository`] contracts |
//! | [`error`] | Error taxonomy shared by every layer |

/// Domain constants
pub mod constants;
/// Domain entities
pub mod entities;
/// Error handling types
pub mod error;
/// External collaborator ports
pub mod ports;
/// Repository contracts
pub mod repositories;
/// Value objects
pub mod value_objects;

pub use entities::{Entity, EntityBase, SystemInformation};
pub use error::{Error, Result};
pub use repositories::{BulkRepository, Repository};
pub use value_objects::{
    BulkOperationError, BulkOperationResult, OperationStatistics, PartitionKey,
    PartitionKeyBuilder,
};

// Re-exported so callers do not need a direct tokio-util dependency
pub use tokio_util::sync::CancellationToken;
