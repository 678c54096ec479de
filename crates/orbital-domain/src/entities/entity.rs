//! Entity capability trait
//!
//! Repositories are generic over anything that has a unique id, an etag and
//! a document type. Concrete documents embed an [`EntityBase`] with
//! `#[serde(flatten)]` and implement [`Entity`] by pointing at it.
//!
//! # Example
//!
//! ```
//! use orbital_domain::{Entity, EntityBase};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct SampleItem {
//!     #[serde(flatten)]
//!     base: EntityBase,
//!     name: String,
//! }
//!
//! impl Entity for SampleItem {
//!     const TYPE_NAME: &'static str = "SampleItem";
//!     const DOCUMENT_TYPE: &'static str = "sample-item";
//!
//!     fn base(&self) -> &EntityBase {
//!         &self.base
//!     }
//! }
//!
//! let item = SampleItem { base: EntityBase::new::<SampleItem>("user"), name: "a".into() };
//! assert_eq!(item.document_type(), "sample-item");
//! assert!(item.etag().is_none());
//! ```

use crate::entities::audit::SystemInformation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Capability set of a stored document
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name used to look up a resilience pipeline for this entity kind
    const TYPE_NAME: &'static str;

    /// Discriminator written into every document of this kind
    const DOCUMENT_TYPE: &'static str;

    /// Embedded id / etag / audit block
    fn base(&self) -> &EntityBase;

    /// Unique document id
    fn id(&self) -> &str {
        self.base().id()
    }

    /// Version token assigned by the store on the last successful write
    fn etag(&self) -> Option<&str> {
        self.base().etag()
    }

    /// Document discriminator as stored
    fn document_type(&self) -> &str {
        self.base().document_type()
    }
}

/// Fields every document carries
///
/// The id is fixed at construction and has no setter. The etag is only ever
/// populated by deserializing a document returned from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBase {
    id: String,
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    document_type: String,
    #[serde(default)]
    system_information: SystemInformation,
}

impl EntityBase {
    /// New base for an entity of kind `E` with a generated id
    pub fn new<E: Entity>(created_by: impl Into<String>) -> Self {
        Self::with_id::<E>(String::new(), created_by)
    }

    /// New base with a caller-chosen id; an empty id is replaced by a generated one
    pub fn with_id<E: Entity>(id: impl Into<String>, created_by: impl Into<String>) -> Self {
        let id = id.into();
        let id = if id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            id
        };

        Self {
            id,
            etag: None,
            document_type: E::DOCUMENT_TYPE.to_string(),
            system_information: SystemInformation::new(created_by),
        }
    }

    /// Document id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Store-assigned version token
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Document discriminator
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Audit block
    pub fn system_information(&self) -> &SystemInformation {
        &self.system_information
    }

    /// Mutable audit block, for stamping updates before a write
    pub fn system_information_mut(&mut self) -> &mut SystemInformation {
        &mut self.system_information
    }
}
