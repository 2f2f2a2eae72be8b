//! Command execution engine

use crate::{can_delete, EditCommand, FieldPatch, Result};
use family_model::{ExpansionSet, FamilyMember, PersonId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The editable view of one person handed to the editor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub id: PersonId,
    pub name: String,
    pub year: String,
    pub image_url: String,
    pub relationship: Option<String>,
    /// Whether the delete action may be offered for this person
    pub can_delete: bool,
}

/// Owns the current tree and the spouse expansion view state, and applies
/// commands against them.
pub struct FamilyEngine {
    /// Current family tree
    tree: Arc<FamilyMember>,
    /// Spouse sub-trees currently expanded
    expansion: ExpansionSet,
}

impl FamilyEngine {
    /// Create an engine over an existing tree
    pub fn with_tree(tree: Arc<FamilyMember>) -> Self {
        Self {
            tree,
            expansion: ExpansionSet::new(),
        }
    }

    /// Get the current tree
    pub fn tree(&self) -> &Arc<FamilyMember> {
        &self.tree
    }

    /// Get the current expansion state
    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    /// Execute a command. On success the new tree is swapped in; after a
    /// removal the expansion set is pruned so deleted ids cannot
    /// resurrect. On error the tree and view state are untouched.
    pub fn execute(&mut self, command: EditCommand) -> Result<()> {
        let name = command.display_name();
        let outcome = command.apply(&self.tree)?;
        let changed = !Arc::ptr_eq(&outcome.tree, &self.tree);
        self.tree = outcome.tree;
        if outcome.removed_nodes {
            self.expansion.retain_known(&self.tree);
        }
        tracing::debug!(command = name, changed, "applied edit command");
        Ok(())
    }

    /// Flip the expansion state of a spouse sub-tree. View state only; the
    /// tree is untouched.
    pub fn toggle_spouse(&mut self, id: &PersonId) -> bool {
        let expanded = self.expansion.toggle(id);
        tracing::debug!(%id, expanded, "toggled spouse sub-tree");
        expanded
    }

    /// The editable snapshot for the editor form, or `None` when the id
    /// no longer exists.
    pub fn snapshot(&self, id: &PersonId) -> Option<EditorSnapshot> {
        let member = self.tree.find(id)?;
        Some(EditorSnapshot {
            id: member.id.clone(),
            name: member.name.clone(),
            year: member.year.clone(),
            image_url: member.image_url.clone(),
            relationship: member.relationship.clone(),
            can_delete: can_delete(&self.tree, id),
        })
    }

    /// Editor save callback: merge a field patch into one person
    pub fn save_fields(&mut self, id: &PersonId, patch: FieldPatch) -> Result<()> {
        self.execute(EditCommand::UpdateFields {
            id: id.clone(),
            patch,
        })
    }

    /// Editor delete callback: guarded subtree removal
    pub fn delete(&mut self, id: &PersonId) -> Result<()> {
        self.execute(EditCommand::DeleteSubtree { id: id.clone() })
    }
}

impl Default for FamilyEngine {
    fn default() -> Self {
        Self::with_tree(family_model::seed_family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditError;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    #[test]
    fn test_execute_swaps_tree() {
        let mut engine = FamilyEngine::default();
        engine
            .execute(EditCommand::AddSpouse { id: id("p2") })
            .unwrap();
        assert!(engine.tree().find(&id("p2")).unwrap().spouse.is_some());
    }

    #[test]
    fn test_failed_command_leaves_state_untouched() {
        let mut engine = FamilyEngine::default();
        let before = Arc::clone(engine.tree());
        let result = engine.execute(EditCommand::DeleteSubtree {
            id: PersonId::root(),
        });
        assert_eq!(result.unwrap_err(), EditError::RootDeletion);
        assert!(Arc::ptr_eq(engine.tree(), &before));
    }

    #[test]
    fn test_delete_prunes_expansion_set() {
        let mut engine = FamilyEngine::default();
        engine
            .execute(EditCommand::AddSpouse { id: id("p2") })
            .unwrap();
        let spouse_id = engine
            .tree()
            .find(&id("p2"))
            .unwrap()
            .spouse
            .as_ref()
            .unwrap()
            .id
            .clone();
        engine.toggle_spouse(&spouse_id);
        assert!(engine.expansion().contains(&spouse_id));

        engine.delete(&spouse_id).unwrap();
        assert!(!engine.tree().contains(&spouse_id));
        assert!(!engine.expansion().contains(&spouse_id));
    }

    #[test]
    fn test_toggle_survives_unrelated_edits() {
        let mut engine = FamilyEngine::default();
        engine
            .execute(EditCommand::AddSpouse { id: id("p2") })
            .unwrap();
        let spouse_id = engine
            .tree()
            .find(&id("p2"))
            .unwrap()
            .spouse
            .as_ref()
            .unwrap()
            .id
            .clone();
        engine.toggle_spouse(&spouse_id);

        engine
            .save_fields(&id("p1"), FieldPatch::default().name("Eleanor L."))
            .unwrap();
        assert!(engine.expansion().contains(&spouse_id));
    }

    #[test]
    fn test_snapshot_surface() {
        let engine = FamilyEngine::default();
        let snapshot = engine.snapshot(&id("p1")).unwrap();
        assert_eq!(snapshot.name, "Eleanor Rigby");
        assert_eq!(snapshot.relationship.as_deref(), Some("Mother"));
        // Eleanor carries her own ancestor and is protected.
        assert!(!snapshot.can_delete);

        let root_snapshot = engine.snapshot(&PersonId::root()).unwrap();
        assert!(!root_snapshot.can_delete);

        let arthur = engine.snapshot(&id("p2")).unwrap();
        assert!(arthur.can_delete);

        assert!(engine.snapshot(&id("nobody")).is_none());
    }
}
