//! Layout configuration

use serde::{Deserialize, Serialize};

/// Tunable spacing for the layout pass. Horizontal distances inside the
/// tidy walk are measured in abstract "slots" and scaled to pixels by
/// `slot_width` afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical distance between generations, in pixels
    pub level_separation: f64,
    /// Pixels per horizontal layout slot
    pub slot_width: f64,
    /// Minimum separation between siblings sharing a parent, in slots
    pub sibling_separation: f64,
    /// Minimum separation between nodes of different parents, in slots
    pub foreign_separation: f64,
    /// Extra slots reserved beside a node that has a spouse
    pub spouse_separation: f64,
    /// Lateral distance from a node to its spouse portrait, in pixels
    pub spouse_offset: f64,
    /// Maximum horizontal jitter, in pixels
    pub jitter_x: f64,
    /// Maximum vertical jitter, in pixels
    pub jitter_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_separation: 110.0,
            slot_width: 120.0,
            sibling_separation: 1.0,
            foreign_separation: 2.0,
            spouse_separation: 0.8,
            spouse_offset: 130.0,
            jitter_x: 10.0,
            jitter_y: 6.0,
        }
    }
}
