//! Session - Owns one family tree and everything the host needs
//!
//! The single-threaded, event-driven boundary toward the editor UI and
//! the windowing host: edits, view-state toggles, resizes, and camera
//! gestures all land here, and every relevant change is answered with a
//! full scene rebuild that reapplies the last captured camera.

mod state;

pub use state::*;
