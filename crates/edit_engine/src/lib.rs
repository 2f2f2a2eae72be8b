//! Edit Engine - Tree mutation algebra and command execution
//!
//! Every mutation is a pure function from a tree to a new tree: the input
//! is never touched, the path from the edited node to the root is rebuilt,
//! and all untouched subtrees are shared by reference. Structural safety
//! (root protection, the degree gate) lives in the command layer; the pure
//! algebra itself never refuses a well-formed request.

mod command;
mod degree;
mod error;
mod executor;
mod mutation;

pub use command::*;
pub use degree::*;
pub use error::*;
pub use executor::*;
pub use mutation::*;
