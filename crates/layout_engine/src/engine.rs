//! Layout computation over the family tree

use crate::{
    jitter, run_walk, Axis, LayoutConfig, LayoutPoint, NodeBox, SeparationRule, Side,
    SpouseAttachment, TreeLayout, WalkNode,
};
use family_model::{ExpansionSet, FamilyMember, PersonId};
use std::sync::Arc;

/// Vertical direction a layout unit grows in. The primary tree draws
/// ancestors upward; nested spouse sub-trees mirror the sign, and the
/// mirroring alternates again for units nested deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Up,
    Down,
}

impl Orientation {
    /// Sign applied to the per-generation vertical step
    pub fn sign(self) -> f64 {
        match self {
            Orientation::Up => -1.0,
            Orientation::Down => 1.0,
        }
    }

    /// The mirrored orientation for a nested unit
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Up => Orientation::Down,
            Orientation::Down => Orientation::Up,
        }
    }
}

/// Node metadata gathered before the tidy walk
struct Collected {
    id: PersonId,
    depth: usize,
    referrer: Option<usize>,
    spouse_id: Option<PersonId>,
    spouse_layout: Option<TreeLayout>,
}

/// Computes positioned layouts from the family tree and the expansion
/// state. A fixed (tree, expansion, config) triple always produces
/// bit-identical output.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the whole tree: the primary hierarchy plus a nested unit
    /// for every expanded spouse, recursively.
    pub fn compute(&self, tree: &Arc<FamilyMember>, expansion: &ExpansionSet) -> TreeLayout {
        tracing::debug!(
            nodes = tree.len(),
            expanded = expansion.len(),
            "computing tree layout"
        );
        self.layout_unit(tree, expansion, Orientation::Up)
    }

    /// Lay out one unit: a tidy walk over the unit root's ancestor edges,
    /// with expanded spouse sub-trees already laid out so their widths
    /// can feed the separation.
    fn layout_unit(
        &self,
        unit_root: &Arc<FamilyMember>,
        expansion: &ExpansionSet,
        orientation: Orientation,
    ) -> TreeLayout {
        let cfg = &self.config;

        let mut collected = Vec::new();
        self.collect(unit_root, None, 0, expansion, orientation, &mut collected);

        // Flattened walk input: the children axis is the ancestor edge.
        let mut walk: Vec<WalkNode> = collected
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let mut node = WalkNode::new(index, c.referrer);
                if c.spouse_id.is_some() {
                    node.extra += cfg.spouse_separation;
                }
                if let Some(sub) = &c.spouse_layout {
                    node.extra += sub.width() / cfg.slot_width;
                }
                node
            })
            .collect();
        for index in 1..collected.len() {
            if let Some(parent) = collected[index].referrer {
                let number = walk[parent].children.len();
                walk[index].number = number;
                walk[parent].children.push(index);
            }
        }

        let rule = SeparationRule {
            sibling: cfg.sibling_separation,
            foreign: cfg.foreign_separation,
        };
        let xs = run_walk(&mut walk, &rule);
        let root_x = xs[0];
        let sign = orientation.sign();

        let mut nodes = Vec::with_capacity(collected.len());
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        for (index, c) in collected.into_iter().enumerate() {
            // The unit root stays pinned to the origin: for the primary
            // tree that keeps the absolute root anchored, for nested
            // units the anchor's spouse offset already carries the
            // jitter of this node's id.
            let (jx, jy) = if index == 0 {
                (0.0, 0.0)
            } else {
                (
                    jitter(&c.id, Axis::X) * cfg.jitter_x,
                    jitter(&c.id, Axis::Y) * cfg.jitter_y,
                )
            };
            let pos = LayoutPoint::new(
                (xs[index] - root_x) * cfg.slot_width + jx,
                c.depth as f64 * cfg.level_separation * sign + jy,
            );

            min_x = min_x.min(pos.x);
            max_x = max_x.max(pos.x);

            let spouse = c.spouse_id.map(|spouse_id| {
                let side = if pos.x < 0.0 { Side::Left } else { Side::Right };
                let offset = LayoutPoint::new(
                    side.sign() * cfg.spouse_offset + jitter(&spouse_id, Axis::X) * cfg.jitter_x,
                    jitter(&spouse_id, Axis::Y) * cfg.jitter_y,
                );
                let spouse_x = pos.x + offset.x;
                min_x = min_x.min(spouse_x);
                max_x = max_x.max(spouse_x);
                if let Some(sub) = &c.spouse_layout {
                    min_x = min_x.min(spouse_x + sub.min_x);
                    max_x = max_x.max(spouse_x + sub.max_x);
                }
                SpouseAttachment {
                    id: spouse_id,
                    side,
                    offset,
                    expanded: c.spouse_layout.map(Box::new),
                }
            });

            nodes.push(NodeBox {
                id: c.id,
                pos,
                depth: c.depth,
                referrer: c.referrer,
                spouse,
            });
        }

        // Half a slot of clearance on each side so neighboring units
        // never touch portraits.
        min_x -= cfg.slot_width / 2.0;
        max_x += cfg.slot_width / 2.0;

        TreeLayout {
            nodes,
            min_x,
            max_x,
        }
    }

    /// Flatten a unit in depth-first order along ancestor edges, laying
    /// out expanded spouse sub-trees on the way (with mirrored
    /// orientation) so the walk can reserve room for them.
    fn collect(
        &self,
        member: &Arc<FamilyMember>,
        referrer: Option<usize>,
        depth: usize,
        expansion: &ExpansionSet,
        orientation: Orientation,
        out: &mut Vec<Collected>,
    ) {
        let spouse_layout = member
            .spouse
            .as_ref()
            .filter(|spouse| expansion.contains(&spouse.id))
            .map(|spouse| self.layout_unit(spouse, expansion, orientation.flipped()));

        let index = out.len();
        out.push(Collected {
            id: member.id.clone(),
            depth,
            referrer,
            spouse_id: member.spouse.as_ref().map(|s| s.id.clone()),
            spouse_layout,
        });

        for parent in &member.parents {
            self.collect(parent, Some(index), depth + 1, expansion, orientation, out);
        }
    }
}
