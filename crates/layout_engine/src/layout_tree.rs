//! Positioned layout structures
//!
//! A `TreeLayout` is one independently laid-out unit: the primary tree,
//! or an expanded spouse sub-tree nested inside another layout. All
//! coordinates are relative to the unit's own root, which sits at the
//! origin; the renderer composes nested units by offsetting them to their
//! anchor's resolved position.

use family_model::PersonId;
use serde::{Deserialize, Serialize};

/// A point in layout coordinates (pixels, origin at the unit root)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by another point
    pub fn offset(self, by: LayoutPoint) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// Which side of the unit root's vertical axis a spouse hangs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal sign of the side
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// A spouse hanging laterally off a positioned node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpouseAttachment {
    /// The spouse's id
    pub id: PersonId,
    /// Side the spouse is placed on
    pub side: Side,
    /// Offset from the anchor node to the spouse portrait, jittered by
    /// the spouse's own id independently of the anchor's jitter
    pub offset: LayoutPoint,
    /// The spouse's own sub-tree layout when its id is expanded. Its
    /// origin is the spouse portrait position; its root entry duplicates
    /// the spouse and is skipped during rendering.
    pub expanded: Option<Box<TreeLayout>>,
}

/// One positioned node of a layout unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    pub id: PersonId,
    /// Position relative to the unit root, jitter applied
    pub pos: LayoutPoint,
    /// Generations above the unit root
    pub depth: usize,
    /// Index of the node whose parents list references this node,
    /// `None` for the unit root
    pub referrer: Option<usize>,
    /// Lateral spouse, if any
    pub spouse: Option<SpouseAttachment>,
}

/// One independently laid-out hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    /// Nodes in depth-first order; index 0 is the unit root at the origin
    pub nodes: Vec<NodeBox>,
    /// Leftmost extent, spouse attachments and nested units included
    pub min_x: f64,
    /// Rightmost extent, spouse attachments and nested units included
    pub max_x: f64,
}

impl TreeLayout {
    /// The unit root box
    pub fn root(&self) -> &NodeBox {
        &self.nodes[0]
    }

    /// Root id of this unit
    pub fn root_id(&self) -> &PersonId {
        &self.nodes[0].id
    }

    /// Horizontal extent in pixels, used by the enclosing layout to
    /// reserve separation slots for this unit
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Number of nodes in this unit (nested units not included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
