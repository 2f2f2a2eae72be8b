//! The family member node and tree query surface

use crate::PersonId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Portrait used for synthetic nodes until the editor uploads a real one.
pub const DEFAULT_PORTRAIT: &str = "portraits/placeholder.png";

/// One person in the family tree.
///
/// `parents` are the node's ancestors, rendered upward/outward from the
/// root (the root is the most recent descendant). `spouse` is a single
/// optional lateral partner, itself a full recursive node.
///
/// Child links are `Arc`s: pure edit operations rebuild only the path from
/// the edited node up to the root and share every untouched subtree, so an
/// unchanged subtree keeps the same reference (`Arc::ptr_eq`) across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Stable unique id, assigned at creation
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Free-text display year (birth year in the seed data)
    pub year: String,
    /// Portrait image URI or embedded data reference
    pub image_url: String,
    /// Label relative to the node that references this one ("Mother",
    /// "Spouse", ...); absent for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    /// Ordered ancestors of this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<Arc<FamilyMember>>,
    /// At most one symmetric partner node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Arc<FamilyMember>>,
}

impl FamilyMember {
    /// Create a member with no relations
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        year: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            year: year.into(),
            image_url: image_url.into(),
            relationship: None,
            parents: Vec::new(),
            spouse: None,
        }
    }

    /// Set the relationship label (builder style)
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    /// Set the ancestors (builder style)
    pub fn with_parents(mut self, parents: Vec<Arc<FamilyMember>>) -> Self {
        self.parents = parents;
        self
    }

    /// Set the spouse (builder style)
    pub fn with_spouse(mut self, spouse: Arc<FamilyMember>) -> Self {
        self.spouse = Some(spouse);
        self
    }

    /// Find a node by id, searching through spouse and parents edges
    pub fn find(&self, id: &PersonId) -> Option<&FamilyMember> {
        if self.id == *id {
            return Some(self);
        }
        if let Some(spouse) = &self.spouse {
            if let Some(found) = spouse.find(id) {
                return Some(found);
            }
        }
        self.parents.iter().find_map(|parent| parent.find(id))
    }

    /// Whether a node with this id exists anywhere in the structure
    pub fn contains(&self, id: &PersonId) -> bool {
        self.find(id).is_some()
    }

    /// Every id in the structure, in depth-first order
    pub fn collect_ids(&self) -> Vec<PersonId> {
        let mut ids = Vec::new();
        self.visit(&mut |member, _| ids.push(member.id.clone()));
        ids
    }

    /// Total node count, spouse nodes included
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_, _| count += 1);
        count
    }

    /// Always at least the node itself
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Visit every node with its depth along parents edges. Spouses are
    /// visited at their anchor's depth.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&FamilyMember, usize),
    {
        self.visit_at(0, f);
    }

    fn visit_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&FamilyMember, usize),
    {
        f(self, depth);
        if let Some(spouse) = &self.spouse {
            spouse.visit_at(depth, f);
        }
        for parent in &self.parents {
            parent.visit_at(depth + 1, f);
        }
    }

    /// Serialize the tree for diagnostics and fixtures
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a tree from its JSON form
    pub fn from_json(json: &str) -> crate::Result<Arc<FamilyMember>> {
        Ok(Arc::new(serde_json::from_str(json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed_family;

    #[test]
    fn test_find_through_parents_and_spouse() {
        let tree = seed_family();
        assert_eq!(tree.find(&PersonId::new("p3")).unwrap().name, "Father Rigby");
        assert!(tree.find(&PersonId::new("missing")).is_none());

        let spoused = Arc::new(
            FamilyMember::new(PersonId::root(), "A", "1950", DEFAULT_PORTRAIT).with_spouse(
                Arc::new(
                    FamilyMember::new(PersonId::new("s"), "B", "1950", DEFAULT_PORTRAIT)
                        .with_relationship("Spouse"),
                ),
            ),
        );
        assert_eq!(spoused.find(&PersonId::new("s")).unwrap().name, "B");
    }

    #[test]
    fn test_collect_ids_and_len_agree() {
        let tree = seed_family();
        let ids = tree.collect_ids();
        assert_eq!(ids.len(), tree.len());
        assert_eq!(tree.len(), 4);
        assert!(ids.contains(&PersonId::root()));
    }

    #[test]
    fn test_json_round_trip() {
        let tree = seed_family();
        let json = tree.to_json().unwrap();
        let restored = FamilyMember::from_json(&json).unwrap();
        assert_eq!(*restored, *tree);
        assert!(FamilyMember::from_json("not json").is_err());
    }

    #[test]
    fn test_visit_depths_follow_parent_edges() {
        let tree = seed_family();
        let mut depths = Vec::new();
        tree.visit(&mut |member, depth| depths.push((member.id.clone(), depth)));
        assert!(depths.contains(&(PersonId::root(), 0)));
        assert!(depths.contains(&(PersonId::new("p1"), 1)));
        assert!(depths.contains(&(PersonId::new("p3"), 2)));
    }
}
