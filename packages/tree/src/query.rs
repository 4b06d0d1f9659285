//! Read-only lookups over a tree. None of these fail; a missing id is `None`.

use crate::node::Node;
use crate::NodeId;

/// Depth-first (pre-order) search for a node by id
pub fn find_node<'a>(root: &'a Node, id: &NodeId) -> Option<&'a Node> {
    if &root.id == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find_node(child, id))
}

pub(crate) fn find_node_mut<'a>(root: &'a mut Node, id: &NodeId) -> Option<&'a mut Node> {
    if &root.id == id {
        return Some(root);
    }
    root.children_mut()?
        .iter_mut()
        .find_map(|child| find_node_mut(child, id))
}

/// Keys from the root (inclusive, so the first entry is `"root"`) down to `id`
pub fn node_path(root: &Node, id: &NodeId) -> Option<Vec<String>> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn collect_path(node: &Node, id: &NodeId, path: &mut Vec<String>) -> bool {
    path.push(node.key.clone());
    if &node.id == id {
        return true;
    }
    for child in node.children() {
        if collect_path(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Ids of every node below `node`, pre-order, excluding `node` itself
pub fn descendant_ids(node: &Node) -> Vec<NodeId> {
    let mut ids = Vec::new();
    for child in node.children() {
        ids.push(child.id.clone());
        ids.extend(descendant_ids(child));
    }
    ids
}

/// True if `descendant` lies strictly inside the subtree of `ancestor`
pub fn is_ancestor(root: &Node, ancestor: &NodeId, descendant: &NodeId) -> bool {
    match find_node(root, ancestor) {
        Some(node) => node
            .children()
            .iter()
            .any(|child| find_node(child, descendant).is_some()),
        None => false,
    }
}

/// Walk member keys (root excluded) down from the root
///
/// Positional segments such as `[2]` index into arrays.
pub fn find_by_path<'a, S: AsRef<str>>(root: &'a Node, path: &[S]) -> Option<&'a Node> {
    let mut current = root;
    for segment in path {
        let segment = segment.as_ref();
        // Last match wins, mirroring how duplicate keys encode.
        current = current
            .children()
            .iter()
            .rev()
            .find(|child| child.key == segment)?;
    }
    Some(current)
}

/// Total number of nodes in the tree
pub fn count_nodes(root: &Node) -> usize {
    root.subtree_size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, IdGenerator};
    use serde_json::json;

    fn sample() -> Node {
        let mut ids = IdGenerator::new("query.json");
        decode(
            &json!({
                "settings": {"zoom": 0.8, "darkMode": true},
                "members": [{"name": "Admin"}, {"name": "Editor"}]
            }),
            &mut ids,
        )
        .unwrap()
    }

    #[test]
    fn test_find_node_and_missing_id() {
        let tree = sample();
        let zoom = &tree.children()[0].children()[0];
        assert_eq!(find_node(&tree, &zoom.id).map(|n| n.key.as_str()), Some("zoom"));
        assert!(find_node(&tree, &NodeId::new("nope")).is_none());
    }

    #[test]
    fn test_node_path_includes_root() {
        let tree = sample();
        let name = find_by_path(&tree, &["members", "[1]", "name"]).unwrap();
        assert_eq!(
            node_path(&tree, &name.id).unwrap(),
            vec!["root", "members", "[1]", "name"]
        );
        assert_eq!(node_path(&tree, &tree.id).unwrap(), vec!["root"]);
        assert!(node_path(&tree, &NodeId::new("nope")).is_none());
    }

    #[test]
    fn test_descendants_and_ancestry() {
        let tree = sample();
        let members = find_by_path(&tree, &["members"]).unwrap();
        let descendants = descendant_ids(members);
        assert_eq!(descendants.len(), 4);

        let leaf = find_by_path(&tree, &["members", "[0]", "name"]).unwrap();
        assert!(is_ancestor(&tree, &members.id, &leaf.id));
        assert!(!is_ancestor(&tree, &leaf.id, &members.id));
        assert!(!is_ancestor(&tree, &members.id, &members.id));
    }

    #[test]
    fn test_count_nodes() {
        assert_eq!(count_nodes(&sample()), 9);
    }
}
