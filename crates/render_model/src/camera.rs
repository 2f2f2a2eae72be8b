//! Camera (pan/zoom) transform
//!
//! Explicit state owned by the renderer's caller and threaded into each
//! render call: the host captures it on every camera gesture and the
//! scene rebuild reapplies the captured value verbatim. Only the very
//! first render, before any gesture, falls back to the default
//! bottom-centered transform.

use crate::Viewport;
use serde::{Deserialize, Serialize};

/// Pan offset plus uniform zoom mapping world coordinates (origin at the
/// tree root) to screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen x of the world origin
    pub x: f64,
    /// Screen y of the world origin
    pub y: f64,
    /// Zoom factor, positive
    pub k: f64,
}

/// Screen distance kept between the root and the bottom edge by the
/// default camera.
const BOTTOM_MARGIN: f64 = 120.0;

impl Camera {
    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// The default camera for a fresh session: root centered horizontally
    /// near the bottom edge, unzoomed, so ancestors grow up into view.
    pub fn initial(viewport: &Viewport) -> Self {
        Self {
            x: viewport.width / 2.0,
            y: (viewport.height - BOTTOM_MARGIN).max(0.0),
            k: 1.0,
        }
    }

    /// World to screen
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.k + self.x, y * self.k + self.y)
    }

    /// Screen to world
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        // A degenerate zoom would make the inverse blow up.
        let k = self.k.max(1e-6);
        ((x - self.x) / k, (y - self.y) / k)
    }
}
