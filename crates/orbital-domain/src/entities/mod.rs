//! Domain entities
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Entity`] | Capability set every stored document exposes |
//! | [`EntityBase`] | Id, etag, discriminator and audit block embedded in each document |
//! | [`SystemInformation`] | Audit block |

/// Audit block
pub mod audit;
/// Entity capability trait and embedded base
pub mod entity;

pub use audit::SystemInformation;
pub use entity::{Entity, EntityBase};
