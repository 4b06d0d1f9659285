//! # Tree Codec
//!
//! Converts between `serde_json::Value` and the addressable [`Node`] tree.
//!
//! `encode(decode(v)) == v` for every value within [`MAX_DEPTH`].

use crate::error::{CodecError, CodecResult};
use crate::node::{index_key, Node, NodeBody, Primitive, ROOT_KEY};
use crate::{IdGenerator, NodeId};
use serde_json::{Map, Value};

/// Deepest nesting accepted by [`decode`]
pub const MAX_DEPTH: usize = 512;

/// Build a tree from a JSON value; the root is keyed `"root"` at depth 0
pub fn decode(value: &Value, ids: &mut IdGenerator) -> CodecResult<Node> {
    decode_with_key(value, ROOT_KEY, 0, None, ids)
}

/// Build a subtree rooted at `depth` under `parent_id`
pub fn decode_with_key(
    value: &Value,
    key: &str,
    depth: usize,
    parent_id: Option<NodeId>,
    ids: &mut IdGenerator,
) -> CodecResult<Node> {
    if depth > MAX_DEPTH {
        return Err(CodecError::too_deep(MAX_DEPTH, key));
    }

    let id = ids.new_id();

    let body = match value {
        Value::Object(members) => {
            let mut children = Vec::with_capacity(members.len());
            for (member, child) in members {
                children.push(decode_with_key(child, member, depth + 1, Some(id.clone()), ids)?);
            }
            NodeBody::Object { children }
        }
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for (i, child) in items.iter().enumerate() {
                children.push(decode_with_key(child, &index_key(i), depth + 1, Some(id.clone()), ids)?);
            }
            NodeBody::Array { children }
        }
        Value::Null => NodeBody::Primitive { value: Primitive::Null },
        Value::Bool(b) => NodeBody::Primitive { value: Primitive::Bool(*b) },
        Value::Number(n) => NodeBody::Primitive { value: Primitive::Number(n.clone()) },
        Value::String(s) => NodeBody::Primitive { value: Primitive::String(s.clone()) },
    };

    Ok(Node {
        id,
        key: key.to_string(),
        depth,
        parent_id,
        body,
    })
}

/// Convert a tree back to JSON
///
/// Object children sharing a key collapse to one member: the later child's
/// value wins, and the member keeps its first position.
pub fn encode(node: &Node) -> Value {
    match &node.body {
        NodeBody::Primitive { value } => value.to_value(),
        NodeBody::Array { children } => Value::Array(children.iter().map(encode).collect()),
        NodeBody::Object { children } => {
            let mut members = Map::new();
            for child in children {
                members.insert(child.key.clone(), encode(child));
            }
            Value::Object(members)
        }
    }
}

/// Pretty-printed (2-space) text for a tree
pub fn to_pretty_string(node: &Node) -> String {
    crate::printer::render_with_spans(node).text
}
