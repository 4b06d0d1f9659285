//! # Node Tree
//!
//! Addressable representation of a JSON document. Every JSON value becomes
//! a [`Node`] with a stable [`NodeId`]; containers own their children, and
//! `parent_id` is only a lookup aid.
//!
//! ```text
//! {"a": 1, "b": [true, null]}
//!
//! root (object)
//! ├── a    (primitive 1)
//! └── b    (array)
//!     ├── [0] (primitive true)
//!     └── [1] (primitive null)
//! ```

use crate::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Key carried by the root node of every tree
pub const ROOT_KEY: &str = "root";

/// Positional label for an array element
pub fn index_key(index: usize) -> String {
    format!("[{}]", index)
}

/// True if the key is a synthesized array label like `[3]`
pub fn is_index_key(key: &str) -> bool {
    key.len() >= 2 && key.starts_with('[') && key.ends_with(']')
}

/// Shape of a node, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    Primitive,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::Primitive => "primitive",
        };
        f.write_str(name)
    }
}

/// Scalar JSON value held by a primitive node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Primitive {
    /// Convert a JSON value to a primitive, or `None` for objects/arrays
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Primitive::Null),
            Value::Bool(b) => Some(Primitive::Bool(*b)),
            Value::Number(n) => Some(Primitive::Number(n.clone())),
            Value::String(s) => Some(Primitive::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Primitive::Null => Value::Null,
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Number(n) => Value::Number(n.clone()),
            Primitive::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::String(s.to_string())
    }
}

impl From<String> for Primitive {
    fn from(s: String) -> Self {
        Primitive::String(s)
    }
}

impl From<i64> for Primitive {
    fn from(n: i64) -> Self {
        Primitive::Number(n.into())
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        p.to_value()
    }
}

/// Contents of a node: children for containers, a scalar for primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeBody {
    Object { children: Vec<Node> },
    Array { children: Vec<Node> },
    Primitive { value: Primitive },
}

/// One JSON value within a tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub key: String,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(flatten)]
    pub body: NodeBody,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match &self.body {
            NodeBody::Object { .. } => NodeKind::Object,
            NodeBody::Array { .. } => NodeKind::Array,
            NodeBody::Primitive { .. } => NodeKind::Primitive,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Scalar value, `None` for containers
    pub fn value(&self) -> Option<&Primitive> {
        match &self.body {
            NodeBody::Primitive { value } => Some(value),
            NodeBody::Object { .. } | NodeBody::Array { .. } => None,
        }
    }

    /// Children in authoritative order; empty for primitives
    pub fn children(&self) -> &[Node] {
        match &self.body {
            NodeBody::Object { children } | NodeBody::Array { children } => children,
            NodeBody::Primitive { .. } => &[],
        }
    }

    /// Mutable children, `None` for primitives
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.body {
            NodeBody::Object { children } | NodeBody::Array { children } => Some(children),
            NodeBody::Primitive { .. } => None,
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_size).sum::<usize>()
    }

    /// Re-stamp depth and parent links for this subtree
    pub(crate) fn rebase(&mut self, depth: usize, parent_id: Option<NodeId>) {
        self.depth = depth;
        self.parent_id = parent_id;
        let id = self.id.clone();
        if let Some(children) = self.children_mut() {
            for child in children {
                child.rebase(depth + 1, Some(id.clone()));
            }
        }
    }

    /// Re-derive `[i]` labels if this is an array
    pub(crate) fn relabel_positions(&mut self) {
        if let NodeBody::Array { children } = &mut self.body {
            for (i, child) in children.iter_mut().enumerate() {
                child.key = index_key(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, key: &str, depth: usize, value: Primitive) -> Node {
        Node {
            id: NodeId::new(id),
            key: key.to_string(),
            depth,
            parent_id: None,
            body: NodeBody::Primitive { value },
        }
    }

    #[test]
    fn test_index_keys() {
        assert_eq!(index_key(3), "[3]");
        assert!(is_index_key("[0]"));
        assert!(is_index_key("[12]"));
        assert!(!is_index_key("name"));
        assert!(!is_index_key("["));
    }

    #[test]
    fn test_primitive_value_conversion() {
        assert_eq!(Primitive::from_value(&Value::Null), Some(Primitive::Null));
        assert_eq!(
            Primitive::from_value(&serde_json::json!("hi")),
            Some(Primitive::String("hi".to_string()))
        );
        assert_eq!(Primitive::from_value(&serde_json::json!([1])), None);
        assert_eq!(Primitive::from(7i64).to_value(), serde_json::json!(7));
    }

    #[test]
    fn test_rebase_updates_whole_subtree() {
        let mut node = Node {
            id: NodeId::new("p"),
            key: "list".to_string(),
            depth: 4,
            parent_id: None,
            body: NodeBody::Array {
                children: vec![leaf("c", "[0]", 5, Primitive::Null)],
            },
        };

        node.rebase(1, Some(NodeId::new("root")));

        assert_eq!(node.depth, 1);
        assert_eq!(node.children()[0].depth, 2);
        assert_eq!(node.children()[0].parent_id, Some(NodeId::new("p")));
    }

    #[test]
    fn test_primitive_has_no_children() {
        let node = leaf("x", "flag", 1, Primitive::Bool(true));
        assert_eq!(node.kind(), NodeKind::Primitive);
        assert!(node.children().is_empty());
        assert_eq!(node.subtree_size(), 1);
    }
}
