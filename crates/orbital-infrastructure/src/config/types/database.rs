//! Database configuration types

use crate::constants::DEFAULT_DATABASE_NAME;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Database and container naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Logical database name
    pub database_name: String,

    /// Entity type name to container name
    #[serde(default)]
    pub containers: HashMap<String, String>,
}

impl DatabaseConfig {
    /// Container configured for `type_name`, if any
    pub fn container_for(&self, type_name: &str) -> Option<&str> {
        self.containers.get(type_name).map(String::as_str)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            containers: HashMap::new(),
        }
    }
}
