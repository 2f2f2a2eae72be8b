//! Convert a positioned layout into a render scene

use crate::{
    Camera, Color, ControlKind, CurvePath, EdgeKind, LabelClass, Point, PortraitRole, RenderItem,
    RenderScene, Viewport,
};
use family_model::{FamilyMember, PersonId};
use layout_engine::TreeLayout;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Visual constants for scene conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Radius of a tree node portrait
    pub portrait_radius: f64,
    /// Radius of a lateral spouse portrait
    pub spouse_portrait_radius: f64,
    /// Radius of a hover control
    pub control_radius: f64,
    /// Gap between a portrait rim and its controls
    pub control_gap: f64,
    /// Vertical gap between a portrait rim and its name label
    pub label_gap: f64,
    /// Line height between the name and year labels
    pub label_line_height: f64,
    /// Labels longer than this many graphemes are truncated with an
    /// ellipsis
    pub max_label_graphemes: usize,
    /// Edge stroke color
    pub edge_color: Color,
    /// Portrait ring color
    pub ring_color: Color,
    /// Label text color
    pub label_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            portrait_radius: 36.0,
            spouse_portrait_radius: 30.0,
            control_radius: 12.0,
            control_gap: 10.0,
            label_gap: 14.0,
            label_line_height: 16.0,
            max_label_graphemes: 24,
            edge_color: Color::rgb(148, 128, 108),
            ring_color: Color::rgb(92, 70, 52),
            label_color: Color::rgb(54, 42, 32),
        }
    }
}

/// Builds the full scene from the tree and its layout. Every call is a
/// destructive rebuild: the returned scene replaces the previous one
/// entirely, no diffing.
pub struct SceneBuilder {
    config: SceneConfig,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(SceneConfig::default())
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Build the scene. `camera` is the transform captured from the last
    /// camera gesture; `None` means no gesture happened yet and the
    /// default bottom-centered camera applies.
    pub fn build(
        &self,
        tree: &Arc<FamilyMember>,
        layout: &TreeLayout,
        viewport: Viewport,
        camera: Option<Camera>,
    ) -> RenderScene {
        let camera = camera.unwrap_or_else(|| Camera::initial(&viewport));
        let mut items = Vec::new();
        self.emit_unit(&mut items, tree, layout, Point::default(), true);
        tracing::debug!(items = items.len(), "rebuilt render scene");
        RenderScene {
            viewport,
            camera,
            items,
        }
    }

    /// Emit one layout unit at `origin`. For nested units the root entry
    /// is skipped: it is already drawn as the spouse portrait anchored at
    /// the origin. Expanded sub-units recurse with the spouse portrait
    /// position as their new origin.
    fn emit_unit(
        &self,
        items: &mut Vec<RenderItem>,
        tree: &Arc<FamilyMember>,
        unit: &TreeLayout,
        origin: Point,
        is_primary: bool,
    ) {
        let cfg = &self.config;

        for (index, node) in unit.nodes.iter().enumerate() {
            // A since-deleted id can race a stale layout; skip silently.
            let Some(member) = tree.find(&node.id) else {
                continue;
            };
            let center = Self::at(origin, node.pos);

            let draw_node = !(index == 0 && !is_primary);
            if draw_node {
                if let Some(referrer) = node.referrer {
                    let from = Self::at(origin, unit.nodes[referrer].pos);
                    items.push(RenderItem::Edge {
                        edge: EdgeKind::Lineage,
                        target_id: node.id.clone(),
                        path: CurvePath::left_to_right(from, center),
                        label: member.relationship.clone(),
                        stroke: cfg.edge_color,
                    });
                }

                self.emit_portrait(items, member, PortraitRole::Primary, center);
                self.emit_labels(items, member, center, cfg.portrait_radius);
                self.emit_controls(items, member, center, is_primary && index == 0);
            }

            if let Some(attachment) = &node.spouse {
                let spouse_center = Self::at(center, attachment.offset);
                if let Some(spouse) = tree.find(&attachment.id) {
                    items.push(RenderItem::Edge {
                        edge: EdgeKind::Marriage,
                        target_id: attachment.id.clone(),
                        path: CurvePath::left_to_right(center, spouse_center),
                        label: spouse.relationship.clone(),
                        stroke: cfg.edge_color,
                    });
                    self.emit_portrait(items, spouse, PortraitRole::Spouse, spouse_center);
                    self.emit_labels(items, spouse, spouse_center, cfg.spouse_portrait_radius);
                    items.push(RenderItem::Control {
                        node_id: attachment.id.clone(),
                        control: ControlKind::EditSpouse,
                        center: Point::new(
                            spouse_center.x,
                            spouse_center.y
                                - cfg.spouse_portrait_radius
                                - cfg.control_gap
                                - cfg.control_radius,
                        ),
                        radius: cfg.control_radius,
                        hover_only: true,
                    });
                }
                if let Some(sub) = &attachment.expanded {
                    self.emit_unit(items, tree, sub, spouse_center, false);
                }
            }
        }
    }

    /// Resolve a layout-relative position against a unit origin
    fn at(origin: Point, pos: layout_engine::LayoutPoint) -> Point {
        let pos: Point = pos.into();
        Point::new(origin.x + pos.x, origin.y + pos.y)
    }

    fn emit_portrait(
        &self,
        items: &mut Vec<RenderItem>,
        member: &FamilyMember,
        role: PortraitRole,
        center: Point,
    ) {
        let radius = match role {
            PortraitRole::Primary => self.config.portrait_radius,
            PortraitRole::Spouse => self.config.spouse_portrait_radius,
        };
        items.push(RenderItem::Portrait {
            node_id: member.id.clone(),
            role,
            center,
            radius,
            image_url: member.image_url.clone(),
            ring: self.config.ring_color,
        });
    }

    fn emit_labels(
        &self,
        items: &mut Vec<RenderItem>,
        member: &FamilyMember,
        center: Point,
        radius: f64,
    ) {
        let cfg = &self.config;
        items.push(RenderItem::Label {
            node_id: member.id.clone(),
            class: LabelClass::Name,
            text: self.truncate(&member.name),
            anchor: Point::new(center.x, center.y + radius + cfg.label_gap),
            color: cfg.label_color,
        });
        items.push(RenderItem::Label {
            node_id: member.id.clone(),
            class: LabelClass::Year,
            text: self.truncate(&member.year),
            anchor: Point::new(
                center.x,
                center.y + radius + cfg.label_gap + cfg.label_line_height,
            ),
            color: cfg.label_color,
        });
    }

    /// Hover controls around a node portrait: add-ancestor above,
    /// add-descendant below (root only), add-spouse to the side when no
    /// spouse exists yet.
    fn emit_controls(
        &self,
        items: &mut Vec<RenderItem>,
        member: &FamilyMember,
        center: Point,
        is_root: bool,
    ) {
        let cfg = &self.config;
        let reach = cfg.portrait_radius + cfg.control_gap + cfg.control_radius;

        items.push(RenderItem::Control {
            node_id: member.id.clone(),
            control: ControlKind::AddAncestor,
            center: Point::new(center.x, center.y - reach),
            radius: cfg.control_radius,
            hover_only: true,
        });

        if is_root {
            items.push(RenderItem::Control {
                node_id: member.id.clone(),
                control: ControlKind::AddDescendant,
                center: Point::new(center.x, center.y + reach),
                radius: cfg.control_radius,
                hover_only: true,
            });
        }

        if member.spouse.is_none() {
            items.push(RenderItem::Control {
                node_id: member.id.clone(),
                control: ControlKind::AddSpouse,
                center: Point::new(center.x + reach, center.y),
                radius: cfg.control_radius,
                hover_only: true,
            });
        }
    }

    fn truncate(&self, text: &str) -> String {
        let mut graphemes = text.graphemes(true);
        let taken: String = graphemes
            .by_ref()
            .take(self.config.max_label_graphemes)
            .collect();
        if graphemes.next().is_some() {
            format!("{taken}…")
        } else {
            taken
        }
    }
}

/// Count how many items of the scene reference `id`, test helper grade
/// but handy for diagnostics too.
pub fn items_for<'a>(
    scene: &'a RenderScene,
    id: &'a PersonId,
) -> impl Iterator<Item = &'a RenderItem> {
    scene.items.iter().filter(move |item| match item {
        RenderItem::Portrait { node_id, .. }
        | RenderItem::Label { node_id, .. }
        | RenderItem::Control { node_id, .. } => node_id == id,
        RenderItem::Edge { target_id, .. } => target_id == id,
    })
}
