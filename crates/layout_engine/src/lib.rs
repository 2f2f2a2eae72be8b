//! Layout Engine - Positions the family tree for rendering
//!
//! Maps the family tree (filtered through the spouse expansion state) to
//! 2D positions: a tidy-tree walk over ancestor edges for the primary
//! hierarchy, the same walk applied recursively to every expanded spouse
//! sub-tree, and a deterministic per-id jitter so the diagram looks
//! hand-placed without ever moving between renders.
//!
//! The whole pass is a pure function of (tree, expansion set, config):
//! identical inputs produce bit-identical coordinates.

mod config;
mod engine;
mod jitter;
mod layout_tree;
mod tidy;

pub use config::*;
pub use engine::*;
pub use jitter::*;
pub use layout_tree::*;
pub use tidy::*;
