//! Bulk fan-out configuration

use serde::{Deserialize, Serialize};

/// Bulk repository settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Cap on in-flight per-item calls; unset dispatches every item at once
    pub max_concurrency: Option<usize>,
}
