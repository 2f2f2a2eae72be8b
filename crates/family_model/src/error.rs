//! Error types for family model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FamilyModelError {
    #[error("Invalid family document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FamilyModelError>;
