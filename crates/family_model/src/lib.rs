//! Family Model - Core ancestor-tree structure and types
//!
//! This crate provides the foundational data model for the family tree
//! editor, implementing a persistent/immutable tree structure with stable
//! person IDs. Edits never mutate in place: every operation rebuilds the
//! path from the edited node to the root and shares everything else.

mod error;
mod expansion;
mod member;
mod person_id;
mod seed;

pub use error::*;
pub use expansion::*;
pub use member::*;
pub use person_id::*;
pub use seed::*;
