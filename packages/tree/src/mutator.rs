//! # Tree Mutations
//!
//! Structural edits on a node tree. Every operation takes the tree by
//! reference and returns a new tree; the input is never modified, so a
//! failed edit leaves the caller's tree exactly as it was.
//!
//! ## Semantics
//!
//! ### Update value / key
//! - Replace one field on one node, everything else untouched
//! - Keys are not checked for uniqueness among siblings
//! - The root is always keyed `"root"` and cannot be renamed
//! - Values can only be set on primitives (a node never changes kind)
//!
//! ### Delete
//! - Removes the node and all descendants
//! - The root cannot be deleted
//!
//! ### Insert
//! - Appends under an object or array
//! - Every id in the inserted subtree must be new to the tree
//! - Array children are always labelled by position
//!
//! ### Reparent
//! - Atomic relocation to the end of a new parent
//! - Fails if the target is inside the moved subtree
//! - Depth of the moved subtree shifts by the new offset

use crate::error::CodecError;
use crate::node::{index_key, Node, NodeBody, NodeKind, Primitive};
use crate::query::{descendant_ids, find_node, find_node_mut, is_ancestor};
use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Cannot delete the root node")]
    CannotDeleteRoot,

    #[error("Cannot rename the root node")]
    CannotRenameRoot,

    #[error("Node id {0} is already in the tree")]
    DuplicateId(NodeId),

    #[error("Node {0} is a primitive and cannot have children")]
    InvalidParentKind(NodeId),

    #[error("Cannot move {source_id} under {target_id}: would create a cycle")]
    InvalidReparent { source_id: NodeId, target_id: NodeId },

    #[error("Node {0} is not a primitive")]
    NotAPrimitive(NodeId),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type MutationResult<T> = Result<T, MutationError>;

/// Replace the scalar value of a primitive node
pub fn update_value(tree: &Node, id: &NodeId, new_value: Primitive) -> MutationResult<Node> {
    let mut next = tree.clone();
    let node = find_node_mut(&mut next, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

    match &mut node.body {
        NodeBody::Primitive { value } => {
            *value = new_value;
            Ok(next)
        }
        NodeBody::Object { .. } | NodeBody::Array { .. } => Err(MutationError::NotAPrimitive(id.clone())),
    }
}

/// Rename a node. Uniqueness among siblings is not enforced.
pub fn update_key(tree: &Node, id: &NodeId, new_key: &str) -> MutationResult<Node> {
    if &tree.id == id {
        return Err(MutationError::CannotRenameRoot);
    }

    let mut next = tree.clone();
    let node = find_node_mut(&mut next, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
    node.key = new_key.to_string();
    Ok(next)
}

/// Remove a node and its subtree
pub fn delete_node(tree: &Node, id: &NodeId) -> MutationResult<Node> {
    if &tree.id == id {
        return Err(MutationError::CannotDeleteRoot);
    }

    let mut next = tree.clone();
    detach(&mut next, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
    Ok(next)
}

/// Append `child` as the last child of `parent_id`
///
/// Depth and parent links of the whole inserted subtree are re-derived; an
/// array parent overrides the child's key with its positional label. Fails
/// with `DuplicateId` if any id in `child` already exists in `tree`.
pub fn insert_child(tree: &Node, parent_id: &NodeId, child: Node) -> MutationResult<Node> {
    let parent = find_node(tree, parent_id).ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
    if !parent.kind().is_container() {
        return Err(MutationError::InvalidParentKind(parent_id.clone()));
    }
    if let Some(existing) = std::iter::once(child.id.clone())
        .chain(descendant_ids(&child))
        .find(|id| find_node(tree, id).is_some())
    {
        return Err(MutationError::DuplicateId(existing));
    }

    let mut next = tree.clone();
    let parent =
        find_node_mut(&mut next, parent_id).ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
    attach(parent, child)?;
    Ok(next)
}

/// Move `source_id` to become the last child of `target_parent_id`
pub fn reparent_node(tree: &Node, source_id: &NodeId, target_parent_id: &NodeId) -> MutationResult<Node> {
    if &tree.id == source_id
        || source_id == target_parent_id
        || is_ancestor(tree, source_id, target_parent_id)
    {
        return Err(MutationError::InvalidReparent {
            source_id: source_id.clone(),
            target_id: target_parent_id.clone(),
        });
    }

    find_node(tree, source_id).ok_or_else(|| MutationError::NodeNotFound(source_id.clone()))?;
    let target = find_node(tree, target_parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(target_parent_id.clone()))?;
    if !target.kind().is_container() {
        return Err(MutationError::InvalidParentKind(target_parent_id.clone()));
    }

    let mut next = tree.clone();
    let moved = detach(&mut next, source_id).ok_or_else(|| MutationError::NodeNotFound(source_id.clone()))?;
    let target = find_node_mut(&mut next, target_parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(target_parent_id.clone()))?;
    attach(target, moved)?;
    Ok(next)
}

/// Append a subtree to a container, fixing its key, depth and parent links
fn attach(parent: &mut Node, mut child: Node) -> MutationResult<()> {
    let kind = parent.kind();
    let depth = parent.depth + 1;
    let parent_id = parent.id.clone();
    let children = parent
        .children_mut()
        .ok_or_else(|| MutationError::InvalidParentKind(parent_id.clone()))?;

    if kind == NodeKind::Array {
        child.key = index_key(children.len());
    }
    child.rebase(depth, Some(parent_id));
    children.push(child);
    Ok(())
}

/// Remove a node from wherever it sits and return it
fn detach(node: &mut Node, target_id: &NodeId) -> Option<Node> {
    let children = node.children_mut()?;

    if let Some(pos) = children.iter().position(|c| &c.id == target_id) {
        let removed = children.remove(pos);
        node.relabel_positions();
        return Some(removed);
    }

    children.iter_mut().find_map(|child| detach(child, target_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, find_by_path, IdGenerator};
    use serde_json::json;

    fn sample(ids: &mut IdGenerator) -> Node {
        decode(&json!({"a": 1, "b": [true, null], "c": {"d": "x"}}), ids).unwrap()
    }

    fn id_at(tree: &Node, path: &[&str]) -> NodeId {
        find_by_path(tree, path).unwrap().id.clone()
    }

    #[test]
    fn test_update_value_leaves_input_untouched() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let a = id_at(&tree, &["a"]);

        let next = update_value(&tree, &a, Primitive::from("changed")).unwrap();

        assert_eq!(encode(&tree), json!({"a": 1, "b": [true, null], "c": {"d": "x"}}));
        assert_eq!(encode(&next), json!({"a": "changed", "b": [true, null], "c": {"d": "x"}}));
        assert_eq!(find_by_path(&next, &["a"]).unwrap().id, a);
    }

    #[test]
    fn test_update_value_on_container_fails() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let b = id_at(&tree, &["b"]);

        assert_eq!(
            update_value(&tree, &b, Primitive::Null),
            Err(MutationError::NotAPrimitive(b))
        );
    }

    #[test]
    fn test_update_missing_node() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let missing = NodeId::new("missing");

        assert_eq!(
            update_key(&tree, &missing, "z"),
            Err(MutationError::NodeNotFound(missing.clone()))
        );
        assert_eq!(
            update_value(&tree, &missing, Primitive::Null),
            Err(MutationError::NodeNotFound(missing))
        );
    }

    #[test]
    fn test_rename_root_fails() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);

        assert_eq!(update_key(&tree, &tree.id, "renamed"), Err(MutationError::CannotRenameRoot));
        assert_eq!(tree.key, "root");
    }

    #[test]
    fn test_update_key_allows_duplicates() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let c = id_at(&tree, &["c"]);

        let next = update_key(&tree, &c, "a").unwrap();
        assert_eq!(next.children()[2].key, "a");
        assert_eq!(encode(&next), json!({"a": {"d": "x"}, "b": [true, null]}));
    }

    #[test]
    fn test_delete_relabels_array() {
        let mut ids = IdGenerator::default();
        let tree = decode(&json!({"list": ["x", "y", "z"]}), &mut ids).unwrap();
        let first = id_at(&tree, &["list", "[0]"]);

        let next = delete_node(&tree, &first).unwrap();
        let list = find_by_path(&next, &["list"]).unwrap();
        let keys: Vec<&str> = list.children().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["[0]", "[1]"]);
        assert_eq!(encode(&next), json!({"list": ["y", "z"]}));
    }

    #[test]
    fn test_delete_root_fails() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        assert_eq!(delete_node(&tree, &tree.id), Err(MutationError::CannotDeleteRoot));
    }

    #[test]
    fn test_insert_under_array_forces_positional_key() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let b = id_at(&tree, &["b"]);

        let child = crate::decode_with_key(&json!({"k": 1}), "ignored", 0, None, &mut ids).unwrap();
        let next = insert_child(&tree, &b, child).unwrap();

        let list = find_by_path(&next, &["b"]).unwrap();
        assert_eq!(list.children().len(), 3);
        let added = &list.children()[2];
        assert_eq!(added.key, "[2]");
        assert_eq!(added.depth, 2);
        assert_eq!(added.parent_id.as_ref(), Some(&b));
        assert_eq!(added.children()[0].depth, 3);
    }

    #[test]
    fn test_insert_rejects_ids_already_in_tree() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let b = id_at(&tree, &["b"]);
        let c = find_by_path(&tree, &["c"]).unwrap().clone();
        let d = id_at(&tree, &["c", "d"]);

        assert_eq!(
            insert_child(&tree, &b, c.clone()),
            Err(MutationError::DuplicateId(c.id.clone()))
        );

        // A fresh root over a reused descendant is caught too.
        let mut wrapper = crate::decode_with_key(&json!({}), "copy", 0, None, &mut ids).unwrap();
        wrapper.children_mut().unwrap().extend(c.children().iter().cloned());
        assert_eq!(insert_child(&tree, &b, wrapper), Err(MutationError::DuplicateId(d)));
    }

    #[test]
    fn test_insert_under_primitive_fails() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let a = id_at(&tree, &["a"]);
        let child = crate::decode_with_key(&json!(1), "n", 0, None, &mut ids).unwrap();

        assert_eq!(
            insert_child(&tree, &a, child),
            Err(MutationError::InvalidParentKind(a))
        );
    }

    #[test]
    fn test_reparent_moves_subtree_and_shifts_depth() {
        let mut ids = IdGenerator::default();
        let tree = decode(&json!({"outer": {"inner": {}}, "list": [{"deep": [1]}]}), &mut ids).unwrap();
        let item = id_at(&tree, &["list", "[0]"]);
        let inner = id_at(&tree, &["outer", "inner"]);

        let next = reparent_node(&tree, &item, &inner).unwrap();

        assert_eq!(
            encode(&next),
            json!({"outer": {"inner": {"[0]": {"deep": [1]}}}, "list": []})
        );
        let moved = find_by_path(&next, &["outer", "inner", "[0]"]).unwrap();
        assert_eq!(moved.depth, 3);
        assert_eq!(moved.parent_id.as_ref(), Some(&inner));
        let one = find_by_path(&next, &["outer", "inner", "[0]", "deep", "[0]"]).unwrap();
        assert_eq!(one.depth, 5);
    }

    #[test]
    fn test_reparent_into_array_relabels() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let c = id_at(&tree, &["c"]);
        let b = id_at(&tree, &["b"]);

        let next = reparent_node(&tree, &c, &b).unwrap();
        assert_eq!(encode(&next), json!({"a": 1, "b": [true, null, {"d": "x"}]}));
        assert_eq!(find_by_path(&next, &["b", "[2]"]).unwrap().id, c);
    }

    #[test]
    fn test_reparent_under_own_descendant_fails() {
        let mut ids = IdGenerator::default();
        let tree = decode(&json!({"a": {"b": {"c": {}}}}), &mut ids).unwrap();
        let a = id_at(&tree, &["a"]);
        let c = id_at(&tree, &["a", "b", "c"]);

        let result = reparent_node(&tree, &a, &c);
        assert!(matches!(result, Err(MutationError::InvalidReparent { .. })));
        assert!(matches!(
            reparent_node(&tree, &a, &a),
            Err(MutationError::InvalidReparent { .. })
        ));
        assert!(matches!(
            reparent_node(&tree, &tree.id, &a),
            Err(MutationError::InvalidReparent { .. })
        ));
    }

    #[test]
    fn test_reparent_onto_primitive_fails() {
        let mut ids = IdGenerator::default();
        let tree = sample(&mut ids);
        let c = id_at(&tree, &["c"]);
        let a = id_at(&tree, &["a"]);

        assert_eq!(
            reparent_node(&tree, &c, &a),
            Err(MutationError::InvalidParentKind(a))
        );
    }
}
