//! # Edit Intents
//!
//! High-level operations the presentation layer asks for. Each one maps to
//! a pure tree transformation in `nodeflow-tree`.
//!
//! ## Mutation Semantics
//!
//! ### Reparent
//! - Atomic relocation of a node to the end of a new parent
//! - Fails if the new parent is the node itself or one of its descendants
//! - Fails if the new parent is a primitive
//!
//! ### UpdateValue / UpdateKey
//! - Atomic replacement
//! - The root cannot be renamed
//! - A missing node is reported as `NodeNotFound`; the document decides
//!   whether that is a no-op
//!
//! ### DeleteNode
//! - Removes node and all descendants
//! - The root can never be deleted

use nodeflow_tree::{
    decode_with_key, delete_node, find_node, insert_child, is_ancestor, reparent_node, update_key,
    update_value, IdGenerator, MutationError, Node, NodeBody, NodeId, Primitive,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Replace the value of a primitive node
    #[serde(rename_all = "camelCase")]
    UpdateValue { node_id: NodeId, value: Primitive },

    /// Rename a node
    #[serde(rename_all = "camelCase")]
    UpdateKey { node_id: NodeId, key: String },

    /// Remove a node and its subtree
    #[serde(rename_all = "camelCase")]
    DeleteNode { node_id: NodeId },

    /// Append a new subtree built from `value`
    #[serde(rename_all = "camelCase")]
    InsertChild {
        parent_id: NodeId,
        key: String,
        value: Value,
    },

    /// Move a node to the end of another container
    #[serde(rename_all = "camelCase")]
    Reparent { node_id: NodeId, new_parent_id: NodeId },
}

impl Mutation {
    /// Apply to `tree`, returning the new tree. `tree` is left untouched.
    pub fn apply(&self, tree: &Node, ids: &mut IdGenerator) -> Result<Node, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::UpdateValue { node_id, value } => update_value(tree, node_id, value.clone()),
            Mutation::UpdateKey { node_id, key } => update_key(tree, node_id, key),
            Mutation::DeleteNode { node_id } => delete_node(tree, node_id),
            Mutation::InsertChild { parent_id, key, value } => {
                // Decode at the final depth so the nesting limit stays absolute.
                let depth = find_node(tree, parent_id).map_or(0, |parent| parent.depth) + 1;
                let child = decode_with_key(value, key, depth, Some(parent_id.clone()), ids)?;
                insert_child(tree, parent_id, child)
            }
            Mutation::Reparent { node_id, new_parent_id } => reparent_node(tree, node_id, new_parent_id),
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &Node) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateValue { node_id, .. } => {
                let node = find_node(tree, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                match node.body {
                    NodeBody::Primitive { .. } => Ok(()),
                    NodeBody::Object { .. } | NodeBody::Array { .. } => {
                        Err(MutationError::NotAPrimitive(node_id.clone()))
                    }
                }
            }

            Mutation::UpdateKey { node_id, .. } => {
                if &tree.id == node_id {
                    return Err(MutationError::CannotRenameRoot);
                }
                find_node(tree, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::DeleteNode { node_id } => {
                if &tree.id == node_id {
                    return Err(MutationError::CannotDeleteRoot);
                }
                find_node(tree, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::InsertChild { parent_id, .. } => {
                let parent =
                    find_node(tree, parent_id).ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                if parent.kind().is_container() {
                    Ok(())
                } else {
                    Err(MutationError::InvalidParentKind(parent_id.clone()))
                }
            }

            Mutation::Reparent { node_id, new_parent_id } => {
                if &tree.id == node_id || node_id == new_parent_id || is_ancestor(tree, node_id, new_parent_id) {
                    return Err(MutationError::InvalidReparent {
                        source_id: node_id.clone(),
                        target_id: new_parent_id.clone(),
                    });
                }

                find_node(tree, node_id).ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let parent = find_node(tree, new_parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.clone()))?;
                if parent.kind().is_container() {
                    Ok(())
                } else {
                    Err(MutationError::InvalidParentKind(new_parent_id.clone()))
                }
            }
        }
    }

    /// Human-readable label used for undo/redo menus
    pub fn description(&self) -> &'static str {
        match self {
            Mutation::UpdateValue { .. } => "Update value",
            Mutation::UpdateKey { .. } => "Rename key",
            Mutation::DeleteNode { .. } => "Delete node",
            Mutation::InsertChild { .. } => "Add child",
            Mutation::Reparent { .. } => "Move node",
        }
    }

    /// Value/key updates on a missing node are treated as no-ops
    pub(crate) fn is_soft_miss(&self, err: &MutationError) -> bool {
        matches!(
            (self, err),
            (Mutation::UpdateValue { .. } | Mutation::UpdateKey { .. }, MutationError::NodeNotFound(_))
        )
    }
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the call
    pub version: u64,

    /// False when the mutation was a no-op and nothing was committed
    pub changed: bool,
}
