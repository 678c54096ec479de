//! Partition key value object
//!
//! A partition key is an ordered, non-empty list of string components. The
//! same components, in the same order, have to be supplied for every
//! operation on a document or the operation lands on another partition.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered key identifying the physical partition holding a document
///
/// # Example
///
/// ```
/// use orbital_domain::{PartitionKey, PartitionKeyBuilder};
///
/// let simple = PartitionKey::new("org-1");
/// let hierarchical = PartitionKeyBuilder::new().add("org-1").add("dept-7").build().unwrap();
///
/// assert_eq!(simple.to_string(), r#"["org-1"]"#);
/// assert_eq!(hierarchical.components(), ["org-1", "dept-7"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PartitionKey {
    components: Vec<String>,
}

impl PartitionKey {
    /// Single-component partition key
    pub fn new<S: Into<String>>(component: S) -> Self {
        Self {
            components: vec![component.into()],
        }
    }

    /// Partition key from an ordered list of components
    pub fn from_components<I, S>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        if components.is_empty() {
            return Err(Error::invalid_argument(
                "Partition key requires at least one component",
            ));
        }
        Ok(Self { components })
    }

    /// Components in order
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Whether the key has more than one component
    pub fn is_hierarchical(&self) -> bool {
        self.components.len() > 1
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", serde_json::Value::from(component.as_str()))?;
        }
        write!(f, "]")
    }
}

impl TryFrom<Vec<String>> for PartitionKey {
    type Error = Error;

    fn try_from(components: Vec<String>) -> Result<Self> {
        Self::from_components(components)
    }
}

impl From<PartitionKey> for Vec<String> {
    fn from(key: PartitionKey) -> Self {
        key.components
    }
}

impl From<&str> for PartitionKey {
    fn from(component: &str) -> Self {
        Self::new(component)
    }
}

/// Builder for hierarchical partition keys
#[derive(Debug, Clone, Default)]
pub struct PartitionKeyBuilder {
    components: Vec<String>,
}

impl PartitionKeyBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next component
    #[must_use]
    pub fn add<S: Into<String>>(mut self, component: S) -> Self {
        self.components.push(component.into());
        self
    }

    /// Build the key; fails when no component was added
    pub fn build(self) -> Result<PartitionKey> {
        PartitionKey::from_components(self.components)
    }
}
