//! Audit block carried by every entity

use crate::constants::INITIAL_SCHEMA_VERSION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created and last touched a document, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInformation {
    /// Creation timestamp (UTC)
    pub created_date: DateTime<Utc>,
    /// Identity that created the document
    pub created_by: String,
    /// Last update timestamp (UTC), unset until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Identity that last updated the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Schema version of the document body
    pub schema_version: i32,
}

impl SystemInformation {
    /// Stamp a new audit block for `created_by`
    pub fn new<S: Into<String>>(created_by: S) -> Self {
        Self {
            created_date: Utc::now(),
            created_by: created_by.into(),
            last_updated: None,
            updated_by: None,
            schema_version: INITIAL_SCHEMA_VERSION,
        }
    }

    /// Record an update made by `updated_by`
    pub fn update<S: Into<String>>(&mut self, updated_by: S) {
        self.updated_by = Some(updated_by.into());
        self.last_updated = Some(Utc::now());
    }
}

impl Default for SystemInformation {
    fn default() -> Self {
        Self::new(String::new())
    }
}
