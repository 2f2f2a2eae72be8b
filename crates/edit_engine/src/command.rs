//! Command layer over the mutation algebra
//!
//! Commands package the pure mutations together with the structural
//! safety policy: root protection and the degree gate for deletion.

use crate::{
    add_ancestor, add_descendant, add_spouse, degree, delete_subtree, update_fields, EditError,
    FieldPatch, Result,
};
use family_model::{FamilyMember, PersonId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An editing command against the current tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    UpdateFields { id: PersonId, patch: FieldPatch },
    DeleteSubtree { id: PersonId },
    AddAncestor { id: PersonId },
    AddSpouse { id: PersonId },
    AddDescendant { id: PersonId },
}

/// Result of applying a command
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// The new tree after the command
    pub tree: Arc<FamilyMember>,
    /// Whether nodes may have been removed from the structure
    pub removed_nodes: bool,
}

impl EditCommand {
    /// Apply this command to a tree. Policy violations are returned as
    /// typed errors with the tree untouched; a missing target id is a
    /// silent no-op for every command except `AddDescendant`, whose
    /// root-only rule rejects any non-root id.
    pub fn apply(&self, tree: &Arc<FamilyMember>) -> Result<CommandOutcome> {
        match self {
            EditCommand::UpdateFields { id, patch } => Ok(CommandOutcome {
                tree: update_fields(tree, id, patch),
                removed_nodes: false,
            }),
            EditCommand::DeleteSubtree { id } => {
                if *id == tree.id {
                    return Err(EditError::RootDeletion);
                }
                let node_degree = degree(tree, id);
                if node_degree > 1 {
                    return Err(EditError::NodeConnected {
                        id: id.clone(),
                        degree: node_degree,
                    });
                }
                // id != root, so the subtree removal cannot yield an
                // absent tree.
                let tree = delete_subtree(tree, id).unwrap_or_else(|| Arc::clone(tree));
                Ok(CommandOutcome {
                    tree,
                    removed_nodes: true,
                })
            }
            EditCommand::AddAncestor { id } => Ok(CommandOutcome {
                tree: add_ancestor(tree, id),
                removed_nodes: false,
            }),
            EditCommand::AddSpouse { id } => Ok(CommandOutcome {
                tree: add_spouse(tree, id)?,
                removed_nodes: false,
            }),
            EditCommand::AddDescendant { id } => Ok(CommandOutcome {
                tree: add_descendant(tree, id)?,
                removed_nodes: false,
            }),
        }
    }

    /// Display name for logs and notices
    pub fn display_name(&self) -> &'static str {
        match self {
            EditCommand::UpdateFields { .. } => "Update fields",
            EditCommand::DeleteSubtree { .. } => "Delete person",
            EditCommand::AddAncestor { .. } => "Add ancestor",
            EditCommand::AddSpouse { .. } => "Add spouse",
            EditCommand::AddDescendant { .. } => "Add descendant",
        }
    }

    /// The id the command targets
    pub fn target(&self) -> &PersonId {
        match self {
            EditCommand::UpdateFields { id, .. }
            | EditCommand::DeleteSubtree { id }
            | EditCommand::AddAncestor { id }
            | EditCommand::AddSpouse { id }
            | EditCommand::AddDescendant { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use family_model::seed_family;

    fn id(s: &str) -> PersonId {
        PersonId::new(s)
    }

    #[test]
    fn test_delete_root_always_rejected() {
        let tree = seed_family();
        let result = EditCommand::DeleteSubtree {
            id: PersonId::root(),
        }
        .apply(&tree);
        assert_eq!(result.unwrap_err(), EditError::RootDeletion);
    }

    #[test]
    fn test_delete_connected_node_rejected() {
        let tree = seed_family();
        // Eleanor has her own ancestor plus the root's reference.
        let result = EditCommand::DeleteSubtree { id: id("p1") }.apply(&tree);
        assert_eq!(
            result.unwrap_err(),
            EditError::NodeConnected {
                id: id("p1"),
                degree: 2
            }
        );
    }

    #[test]
    fn test_delete_leaf_succeeds() {
        let tree = seed_family();
        let outcome = EditCommand::DeleteSubtree { id: id("p2") }
            .apply(&tree)
            .unwrap();
        assert!(outcome.removed_nodes);
        assert!(!outcome.tree.contains(&id("p2")));
        assert_eq!(outcome.tree.parents.len(), 1);
    }

    #[test]
    fn test_delete_missing_id_is_silent() {
        let tree = seed_family();
        let outcome = EditCommand::DeleteSubtree { id: id("nobody") }
            .apply(&tree)
            .unwrap();
        assert!(Arc::ptr_eq(&outcome.tree, &tree));
    }

    #[test]
    fn test_add_spouse_refusal_keeps_tree() {
        let tree = seed_family();
        let once = EditCommand::AddSpouse { id: id("p2") }.apply(&tree).unwrap();
        let twice = EditCommand::AddSpouse { id: id("p2") }.apply(&once.tree);
        assert_eq!(twice.unwrap_err(), EditError::SpouseExists(id("p2")));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(
            EditCommand::AddAncestor { id: id("p1") }.display_name(),
            "Add ancestor"
        );
        assert_eq!(
            EditCommand::DeleteSubtree { id: id("p1") }.target(),
            &id("p1")
        );
    }
}
