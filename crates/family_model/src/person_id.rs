//! Person ID generation and management

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The reserved id of the tree root.
const ROOT_ID: &str = "root";

/// Unique identifier for a person in the family tree.
///
/// Backed by a string so the reserved root id and hand-written fixture ids
/// stay readable; synthetic nodes get a UUID v4 derived id that is stable
/// for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create a PersonId from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved root id
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Create a new random PersonId for a synthetic node
    pub fn generate() -> Self {
        Self(format!("m-{}", Uuid::new_v4()))
    }

    /// Whether this is the reserved root id
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
