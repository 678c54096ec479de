//! Document Store Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryDocumentStore`] | Local | Concurrent map, data is lost on restart |

#[cfg(feature = "store-memory")]
pub mod in_memory;

#[cfg(feature = "store-memory")]
pub use in_memory::InMemoryDocumentStore;
