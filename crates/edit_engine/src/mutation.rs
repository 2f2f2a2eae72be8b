//! Pure copy-on-write mutations over the family tree
//!
//! Each operation takes the current tree by reference and returns a new
//! tree. When the target id is not found the original `Arc` comes back
//! unchanged, so callers (and the renderer) can skip re-processing by
//! comparing references.

use crate::{EditError, Result};
use family_model::{FamilyMember, PersonId, DEFAULT_PORTRAIT};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Years added to a node's year for a synthetic ancestor (negative) or
/// descendant (positive).
const GENERATION_YEARS: i32 = 25;

/// A partial update to a member's editable fields, produced by the editor
/// form. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl FieldPatch {
    /// A patch that changes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the patch has no effect
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.year.is_none()
            && self.image_url.is_none()
            && self.relationship.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    fn apply_to(&self, member: &mut FamilyMember) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(year) = &self.year {
            member.year = year.clone();
        }
        if let Some(image_url) = &self.image_url {
            member.image_url = image_url.clone();
        }
        if let Some(relationship) = &self.relationship {
            member.relationship = Some(relationship.clone());
        }
    }
}

/// Merge `patch` into the node with `id`. Identity when the id is absent
/// or the patch is empty.
pub fn update_fields(
    tree: &Arc<FamilyMember>,
    id: &PersonId,
    patch: &FieldPatch,
) -> Arc<FamilyMember> {
    if patch.is_empty() {
        return Arc::clone(tree);
    }
    rebuild_at(tree, id, &mut |member| {
        patch.apply_to(member);
        Ok(())
    })
    // The closure never fails, so the rebuild cannot either.
    .unwrap_or_else(|_| Arc::clone(tree))
}

/// Remove the node with `id` and everything beneath it, including its own
/// spouse and ancestors. `None` means the tree itself was the target and
/// the caller must unlink it. When nothing beneath the returned node
/// changed, the original `Arc` comes back unchanged.
pub fn delete_subtree(tree: &Arc<FamilyMember>, id: &PersonId) -> Option<Arc<FamilyMember>> {
    if tree.id == *id {
        return None;
    }

    let mut rebuilt: Option<FamilyMember> = None;

    if let Some(spouse) = &tree.spouse {
        match delete_subtree(spouse, id) {
            None => {
                rebuilt.get_or_insert_with(|| (**tree).clone()).spouse = None;
            }
            Some(new_spouse) => {
                if !Arc::ptr_eq(&new_spouse, spouse) {
                    rebuilt.get_or_insert_with(|| (**tree).clone()).spouse = Some(new_spouse);
                }
            }
        }
    }

    for (index, parent) in tree.parents.iter().enumerate() {
        match delete_subtree(parent, id) {
            None => {
                let node = rebuilt.get_or_insert_with(|| (**tree).clone());
                node.parents.retain(|p| p.id != *id);
                // A deleted parent cannot also change a sibling; we can stop.
                break;
            }
            Some(new_parent) => {
                if !Arc::ptr_eq(&new_parent, parent) {
                    rebuilt.get_or_insert_with(|| (**tree).clone()).parents[index] = new_parent;
                    break;
                }
            }
        }
    }

    match rebuilt {
        Some(node) => Some(Arc::new(node)),
        None => Some(Arc::clone(tree)),
    }
}

/// Append a synthetic ancestor to the node with `id`. Repeated calls
/// append rather than replace. Identity when the id is absent.
pub fn add_ancestor(tree: &Arc<FamilyMember>, id: &PersonId) -> Arc<FamilyMember> {
    rebuild_at(tree, id, &mut |member| {
        let ancestor = FamilyMember::new(
            PersonId::generate(),
            "New Ancestor",
            shifted_year(&member.year, -GENERATION_YEARS),
            DEFAULT_PORTRAIT,
        )
        .with_relationship("Parent");
        member.parents.push(Arc::new(ancestor));
        Ok(())
    })
    .unwrap_or_else(|_| Arc::clone(tree))
}

/// Give the node with `id` a synthetic spouse. Refuses when a spouse
/// already exists; identity when the id is absent.
pub fn add_spouse(tree: &Arc<FamilyMember>, id: &PersonId) -> Result<Arc<FamilyMember>> {
    rebuild_at(tree, id, &mut |member| {
        if member.spouse.is_some() {
            return Err(EditError::SpouseExists(member.id.clone()));
        }
        let spouse = FamilyMember::new(
            PersonId::generate(),
            "New Spouse",
            member.year.clone(),
            DEFAULT_PORTRAIT,
        )
        .with_relationship("Spouse");
        member.spouse = Some(Arc::new(spouse));
        Ok(())
    })
}

/// Replace the root with a brand-new synthetic descendant whose single
/// ancestor is the previous root. Legal only when `id` is the current
/// root id, since only the root may gain a younger descendant.
pub fn add_descendant(tree: &Arc<FamilyMember>, id: &PersonId) -> Result<Arc<FamilyMember>> {
    if tree.id != *id {
        return Err(EditError::NotRoot(id.clone()));
    }
    let mut old_root = (**tree).clone();
    old_root.relationship = Some("Parent".to_string());
    let descendant = FamilyMember::new(
        PersonId::generate(),
        "New Descendant",
        shifted_year(&tree.year, GENERATION_YEARS),
        DEFAULT_PORTRAIT,
    )
    .with_parents(vec![Arc::new(old_root)]);
    Ok(Arc::new(descendant))
}

/// Rebuild the path from the node with `id` up to the root, applying `f`
/// to a copy of the found node. Identity when the id is absent; the first
/// error from `f` aborts the rebuild with the tree untouched.
fn rebuild_at(
    tree: &Arc<FamilyMember>,
    id: &PersonId,
    f: &mut dyn FnMut(&mut FamilyMember) -> Result<()>,
) -> Result<Arc<FamilyMember>> {
    if tree.id == *id {
        let mut node = (**tree).clone();
        f(&mut node)?;
        return Ok(Arc::new(node));
    }

    if let Some(spouse) = &tree.spouse {
        let new_spouse = rebuild_at(spouse, id, f)?;
        if !Arc::ptr_eq(&new_spouse, spouse) {
            let mut node = (**tree).clone();
            node.spouse = Some(new_spouse);
            return Ok(Arc::new(node));
        }
    }

    for (index, parent) in tree.parents.iter().enumerate() {
        let new_parent = rebuild_at(parent, id, f)?;
        if !Arc::ptr_eq(&new_parent, parent) {
            let mut node = (**tree).clone();
            node.parents[index] = new_parent;
            return Ok(Arc::new(node));
        }
    }

    Ok(Arc::clone(tree))
}

/// Shift a parseable year by `delta`; free text passes through unchanged.
fn shifted_year(year: &str, delta: i32) -> String {
    year.trim()
        .parse::<i32>()
        .map(|y| (y + delta).to_string())
        .unwrap_or_else(|_| year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use family_model::seed_family;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    #[test]
    fn test_update_fields_changes_exactly_one_node() {
        let tree = seed_family();
        let patch = FieldPatch::default().name("Eleanor Legacy");
        let updated = update_fields(&tree, &id("p1"), &patch);

        assert_eq!(updated.find(&id("p1")).unwrap().name, "Eleanor Legacy");
        // Untouched fields on the edited node survive.
        assert_eq!(updated.find(&id("p1")).unwrap().year, "1925");
        // Every other node is content-identical.
        assert_eq!(updated.find(&id("p2")).unwrap().name, "Arthur Legacy");
        assert_eq!(updated.find(&id("p3")).unwrap().name, "Father Rigby");
        assert_eq!(updated.name, tree.name);
        // The original is untouched.
        assert_eq!(tree.find(&id("p1")).unwrap().name, "Eleanor Rigby");
    }

    #[test]
    fn test_update_fields_shares_untouched_subtrees() {
        let tree = seed_family();
        let updated = update_fields(&tree, &id("p1"), &FieldPatch::default().year("1926"));
        // p2's branch was not on the edit path and keeps its reference.
        assert!(Arc::ptr_eq(&tree.parents[1], &updated.parents[1]));
        // p1's branch was rebuilt.
        assert!(!Arc::ptr_eq(&tree.parents[0], &updated.parents[0]));
        // p3 below p1 was untouched and is still shared.
        assert!(Arc::ptr_eq(
            &tree.parents[0].parents[0],
            &updated.parents[0].parents[0]
        ));
    }

    #[test]
    fn test_update_fields_empty_patch_is_identity() {
        let tree = seed_family();
        let updated = update_fields(&tree, &id("p1"), &FieldPatch::empty());
        assert!(Arc::ptr_eq(&tree, &updated));
    }

    #[test]
    fn test_update_fields_missing_id_is_identity() {
        let tree = seed_family();
        let updated = update_fields(&tree, &id("nobody"), &FieldPatch::default().name("X"));
        assert!(Arc::ptr_eq(&tree, &updated));
    }

    #[test]
    fn test_delete_subtree_cascades_through_ancestors() {
        let tree = seed_family();
        let pruned = delete_subtree(&tree, &id("p1")).expect("root survives");
        assert!(!pruned.contains(&id("p1")));
        assert!(!pruned.contains(&id("p3")));
        assert_eq!(pruned.parents.len(), 1);
        assert_eq!(pruned.parents[0].id, id("p2"));
        // Sibling order preserved, untouched branch shared.
        assert!(Arc::ptr_eq(&tree.parents[1], &pruned.parents[0]));
    }

    #[test]
    fn test_delete_subtree_of_root_yields_absent() {
        let tree = seed_family();
        assert!(delete_subtree(&tree, &PersonId::root()).is_none());
    }

    #[test]
    fn test_delete_subtree_clears_spouse_link() {
        let tree = seed_family();
        let with_spouse = add_spouse(&tree, &id("p2")).unwrap();
        let spouse_id = with_spouse
            .find(&id("p2"))
            .unwrap()
            .spouse
            .as_ref()
            .unwrap()
            .id
            .clone();

        let pruned = delete_subtree(&with_spouse, &spouse_id).expect("root survives");
        assert!(pruned.find(&id("p2")).unwrap().spouse.is_none());
        assert!(!pruned.contains(&spouse_id));
    }

    #[test]
    fn test_delete_subtree_missing_id_returns_same_reference() {
        let tree = seed_family();
        let unchanged = delete_subtree(&tree, &id("nobody")).expect("root survives");
        assert!(Arc::ptr_eq(&tree, &unchanged));
    }

    #[test]
    fn test_add_ancestor_defaults() {
        let tree = seed_family();
        let grown = add_ancestor(&tree, &id("p2"));
        let arthur = grown.find(&id("p2")).unwrap();
        assert_eq!(arthur.parents.len(), 1);
        let ancestor = &arthur.parents[0];
        assert_eq!(ancestor.name, "New Ancestor");
        assert_eq!(ancestor.year, "1903");
        assert_eq!(ancestor.relationship.as_deref(), Some("Parent"));
        assert_eq!(ancestor.image_url, DEFAULT_PORTRAIT);
    }

    #[test]
    fn test_add_ancestor_appends_rather_than_replaces() {
        let tree = seed_family();
        let once = add_ancestor(&tree, &id("p2"));
        let twice = add_ancestor(&once, &id("p2"));
        assert_eq!(twice.find(&id("p2")).unwrap().parents.len(), 2);
    }

    #[test]
    fn test_add_ancestor_keeps_unparseable_year() {
        let tree = seed_family();
        let renamed = update_fields(&tree, &id("p2"), &FieldPatch::default().year("circa 1930"));
        let grown = add_ancestor(&renamed, &id("p2"));
        assert_eq!(
            grown.find(&id("p2")).unwrap().parents[0].year,
            "circa 1930"
        );
    }

    #[test]
    fn test_add_spouse_defaults_and_refusal() {
        let tree = seed_family();
        let with_spouse = add_spouse(&tree, &id("p2")).unwrap();
        let spouse = with_spouse.find(&id("p2")).unwrap().spouse.as_ref().unwrap();
        assert_eq!(spouse.name, "New Spouse");
        assert_eq!(spouse.year, "1928");
        assert_eq!(spouse.relationship.as_deref(), Some("Spouse"));

        let refused = add_spouse(&with_spouse, &id("p2"));
        assert_eq!(refused, Err(EditError::SpouseExists(id("p2"))));
    }

    #[test]
    fn test_add_spouse_missing_id_is_identity() {
        let tree = seed_family();
        let unchanged = add_spouse(&tree, &id("nobody")).unwrap();
        assert!(Arc::ptr_eq(&tree, &unchanged));
    }

    #[test]
    fn test_add_descendant_replaces_root() {
        let tree = seed_family();
        let grown = add_descendant(&tree, &PersonId::root()).unwrap();
        assert_eq!(grown.name, "New Descendant");
        assert_eq!(grown.year, "1980");
        assert!(grown.relationship.is_none());
        assert_eq!(grown.parents.len(), 1);
        let old_root = &grown.parents[0];
        assert_eq!(old_root.name, "Samuel Legacy");
        assert_eq!(old_root.relationship.as_deref(), Some("Parent"));
        // The whole old structure is still reachable.
        assert!(grown.contains(&id("p3")));
    }

    #[test]
    fn test_add_descendant_rejects_non_root() {
        let tree = seed_family();
        let refused = add_descendant(&tree, &id("p1"));
        assert_eq!(refused, Err(EditError::NotRoot(id("p1"))));
    }
}
