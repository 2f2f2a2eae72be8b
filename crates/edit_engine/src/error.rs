//! Error types for editing operations

use family_model::PersonId;
use thiserror::Error;

/// Expected, recoverable policy violations. None of these leave the tree
/// changed, and none of them is fatal: a lookup miss is not an error at
/// all (the operation silently returns the original tree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("The root person cannot be deleted")]
    RootDeletion,

    #[error("{id} is connected to {degree} relationships and cannot be deleted")]
    NodeConnected { id: PersonId, degree: usize },

    #[error("{0} already has a spouse")]
    SpouseExists(PersonId),

    #[error("Only the root person may gain a descendant ({0} is not the root)")]
    NotRoot(PersonId),
}

pub type Result<T> = std::result::Result<T, EditError>;
