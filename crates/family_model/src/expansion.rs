//! Session-local view state for spouse sub-tree visibility

use crate::{FamilyMember, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of spouse ids whose sub-tree is currently rendered.
///
/// Lives for the application session, independent of the data model:
/// data edits leave it untouched except that ids deleted from the tree
/// are pruned so they cannot resurrect later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSet {
    expanded: HashSet<PersonId>,
}

impl ExpansionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the spouse with this id is expanded
    pub fn contains(&self, id: &PersonId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip the expansion state of a spouse id. Returns the new state.
    pub fn toggle(&mut self, id: &PersonId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Drop every id that no longer exists in the tree
    pub fn retain_known(&mut self, tree: &FamilyMember) {
        self.expanded.retain(|id| tree.contains(id));
    }

    /// Number of expanded sub-trees
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing is expanded
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed_family;

    #[test]
    fn test_toggle_flips_state() {
        let mut expansion = ExpansionSet::new();
        let id = PersonId::new("s1");
        assert!(expansion.toggle(&id));
        assert!(expansion.contains(&id));
        assert!(!expansion.toggle(&id));
        assert!(!expansion.contains(&id));
        assert!(expansion.is_empty());
    }

    #[test]
    fn test_retain_known_prunes_deleted_ids() {
        let tree = seed_family();
        let mut expansion = ExpansionSet::new();
        expansion.toggle(&PersonId::new("p1"));
        expansion.toggle(&PersonId::new("gone"));
        expansion.retain_known(&tree);
        assert!(expansion.contains(&PersonId::new("p1")));
        assert!(!expansion.contains(&PersonId::new("gone")));
        assert_eq!(expansion.len(), 1);
    }
}
