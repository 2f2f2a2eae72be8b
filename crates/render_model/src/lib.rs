//! Render Model - Scene types and layout-to-render conversion
//!
//! Consumes the positioned hierarchy from the layout engine and produces
//! a flat, serializable scene: circular portraits, name/year labels,
//! connective curves with inline relationship labels, and per-node
//! hover controls. Every rebuild is a full destructive redraw; the
//! caller-owned camera transform is reapplied verbatim so edits never
//! jump the viewport.

mod camera;
mod converter;
mod render_item;
mod viewport;

pub use camera::*;
pub use converter::*;
pub use render_item::*;
pub use viewport::*;
