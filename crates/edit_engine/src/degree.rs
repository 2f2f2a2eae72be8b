//! Connectivity degree used to gate deletion

use family_model::{FamilyMember, PersonId};
use std::sync::Arc;

/// Count the structural relationships touching the node with `id`: its own
/// outgoing edges (ancestors plus spouse) and one for each other node that
/// references it as a parent or as a spouse. Zero when the id is absent.
///
/// A node with degree above one must not be deleted, because removing it
/// would silently disconnect more than one relationship.
pub fn degree(tree: &Arc<FamilyMember>, id: &PersonId) -> usize {
    let mut count = 0;
    tree.visit(&mut |member, _| {
        if member.id == *id {
            count += member.parents.len();
            if member.spouse.is_some() {
                count += 1;
            }
        } else {
            count += member.parents.iter().filter(|p| p.id == *id).count();
            if member.spouse.as_ref().is_some_and(|s| s.id == *id) {
                count += 1;
            }
        }
    });
    count
}

/// Whether the node may be deleted: never the root, and only when exactly
/// one relationship would be removed along with it.
pub fn can_delete(tree: &Arc<FamilyMember>, id: &PersonId) -> bool {
    *id != tree.id && degree(tree, id) <= 1
}
