//! Render item types

use crate::{Camera, Viewport};
use family_model::PersonId;
use serde::{Deserialize, Serialize};

/// A point in world coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<layout_engine::LayoutPoint> for Point {
    fn from(p: layout_engine::LayoutPoint) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Whether a portrait is a tree node or a lateral spouse. Clicking a
/// spouse portrait toggles its sub-tree expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortraitRole {
    Primary,
    Spouse,
}

/// Which label a text item carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelClass {
    Name,
    Year,
}

/// Per-node interactive affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    AddAncestor,
    AddDescendant,
    AddSpouse,
    EditSpouse,
}

/// Kind of connective edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Node to its structural parent
    Lineage,
    /// Node to its spouse
    Marriage,
}

/// A cubic curve whose path always runs left-to-right in screen space,
/// regardless of which side the logical endpoints fall on, so text laid
/// along it is never upside-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CurvePath {
    /// Build the curve between two endpoints, ordering them by x.
    pub fn left_to_right(a: Point, b: Point) -> Self {
        let (start, end) = if a.x <= b.x { (a, b) } else { (b, a) };
        let mid_y = (start.y + end.y) / 2.0;
        Self {
            start,
            control1: Point::new(start.x, mid_y),
            control2: Point::new(end.x, mid_y),
            end,
        }
    }

    /// Point at the middle of the curve (t = 0.5), where the inline
    /// label sits.
    pub fn midpoint(&self) -> Point {
        let blend = |a: f64, c1: f64, c2: f64, b: f64| {
            // Cubic Bezier at t = 0.5.
            0.125 * a + 0.375 * c1 + 0.375 * c2 + 0.125 * b
        };
        Point::new(
            blend(self.start.x, self.control1.x, self.control2.x, self.end.x),
            blend(self.start.y, self.control1.y, self.control2.y, self.end.y),
        )
    }
}

/// One drawable element of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderItem {
    /// Portrait image clipped to a circular frame
    Portrait {
        node_id: PersonId,
        role: PortraitRole,
        center: Point,
        radius: f64,
        image_url: String,
        ring: Color,
    },
    /// A text label anchored below its node
    Label {
        node_id: PersonId,
        class: LabelClass,
        text: String,
        anchor: Point,
        color: Color,
    },
    /// Connective edge with an optional relationship label along it
    Edge {
        edge: EdgeKind,
        target_id: PersonId,
        path: CurvePath,
        label: Option<String>,
        stroke: Color,
    },
    /// Interactive affordance, hidden until pointer hover
    Control {
        node_id: PersonId,
        control: ControlKind,
        center: Point,
        radius: f64,
        hover_only: bool,
    },
}

/// What a pointer position resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Hit {
    Control {
        node_id: PersonId,
        control: ControlKind,
    },
    Portrait {
        node_id: PersonId,
        role: PortraitRole,
    },
}

/// The complete rebuilt scene. A rebuild replaces the previous scene
/// value wholesale, so stale items can never keep handlers alive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    pub viewport: Viewport,
    pub camera: Camera,
    pub items: Vec<RenderItem>,
}

impl RenderScene {
    /// Resolve a screen-space pointer position. Controls win over
    /// portraits so activating an affordance never also triggers the
    /// node underneath it; among equals the most recently drawn (deepest
    /// nested) item wins.
    pub fn hit_test(&self, screen_x: f64, screen_y: f64) -> Option<Hit> {
        let (wx, wy) = self.camera.invert(screen_x, screen_y);
        let world = Point::new(wx, wy);

        for item in self.items.iter().rev() {
            if let RenderItem::Control {
                node_id,
                control,
                center,
                radius,
                ..
            } = item
            {
                if world.distance_to(*center) <= *radius {
                    return Some(Hit::Control {
                        node_id: node_id.clone(),
                        control: *control,
                    });
                }
            }
        }

        for item in self.items.iter().rev() {
            if let RenderItem::Portrait {
                node_id,
                role,
                center,
                radius,
                ..
            } = item
            {
                if world.distance_to(*center) <= *radius {
                    return Some(Hit::Portrait {
                        node_id: node_id.clone(),
                        role: *role,
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_runs_left_to_right() {
        let a = Point::new(120.0, -40.0);
        let b = Point::new(-80.0, -160.0);
        let path = CurvePath::left_to_right(a, b);
        assert!(path.start.x <= path.end.x);
        assert_eq!(path.start, b);
        assert_eq!(path.end, a);

        // Same endpoints in the other order build the same path.
        assert_eq!(path, CurvePath::left_to_right(b, a));
    }

    #[test]
    fn test_curve_midpoint_between_endpoints() {
        let path = CurvePath::left_to_right(Point::new(0.0, 0.0), Point::new(100.0, 200.0));
        let mid = path.midpoint();
        assert!((mid.x - 50.0).abs() < 1e-9);
        assert!((mid.y - 100.0).abs() < 1e-9);
    }
}
