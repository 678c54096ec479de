//! Domain layer constants
//!
//! Document field names shared by the store providers and the entity model.
//! Infrastructure constants live in `orbital_infrastructure::constants`.

/// JSON field holding the document id
pub const DOCUMENT_ID_FIELD: &str = "id";

/// JSON field holding the store-assigned version token
pub const DOCUMENT_ETAG_FIELD: &str = "_etag";

/// Schema version stamped on newly constructed entities
pub const INITIAL_SCHEMA_VERSION: i32 = 1;
