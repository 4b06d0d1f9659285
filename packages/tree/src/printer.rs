//! # Span-tracking printer
//!
//! Emits the same 2-space pretty JSON as `serde_json::to_string_pretty`
//! over [`encode`](crate::encode), and records where each node landed in
//! the output. Selecting a node's text is then a map lookup instead of a
//! re-search over the text.
//!
//! A span covers the member label (`"key": `) through the end of the value.
//! Array elements and the root have no label, so their span is the value.

use crate::node::{Node, NodeBody};
use crate::NodeId;
use serde_json::Value;
use std::collections::HashMap;
use std::ops::Range;

const INDENT: &str = "  ";

/// Pretty text plus the byte range of every printed node
#[derive(Debug, Clone, Default)]
pub struct RenderedTree {
    pub text: String,
    pub spans: HashMap<NodeId, Range<usize>>,
}

impl RenderedTree {
    pub fn span(&self, id: &NodeId) -> Option<Range<usize>> {
        self.spans.get(id).cloned()
    }

    pub fn slice(&self, id: &NodeId) -> Option<&str> {
        self.spans.get(id).map(|range| &self.text[range.clone()])
    }
}

/// Render a tree, recording spans
pub fn render_with_spans(root: &Node) -> RenderedTree {
    let mut printer = Printer::default();
    printer.write_node(root, 0, 0);
    RenderedTree {
        text: printer.out,
        spans: printer.spans,
    }
}

#[derive(Default)]
struct Printer {
    out: String,
    spans: HashMap<NodeId, Range<usize>>,
}

impl Printer {
    fn write_node(&mut self, node: &Node, level: usize, span_start: usize) {
        match &node.body {
            NodeBody::Primitive { value } => {
                self.out.push_str(&value.to_value().to_string());
            }
            NodeBody::Array { children } => {
                if children.is_empty() {
                    self.out.push_str("[]");
                } else {
                    self.out.push('[');
                    for (i, child) in children.iter().enumerate() {
                        self.begin_entry(i, level + 1);
                        let start = self.out.len();
                        self.write_node(child, level + 1, start);
                    }
                    self.end_container(level, ']');
                }
            }
            NodeBody::Object { children } => {
                let members = effective_members(children);
                if members.is_empty() {
                    self.out.push_str("{}");
                } else {
                    self.out.push('{');
                    for (i, child) in members.into_iter().enumerate() {
                        self.begin_entry(i, level + 1);
                        let start = self.out.len();
                        self.out.push_str(&quote(&child.key));
                        self.out.push_str(": ");
                        self.write_node(child, level + 1, start);
                    }
                    self.end_container(level, '}');
                }
            }
        }

        self.spans.insert(node.id.clone(), span_start..self.out.len());
    }

    fn begin_entry(&mut self, index: usize, level: usize) {
        self.out.push_str(if index == 0 { "\n" } else { ",\n" });
        self.indent(level);
    }

    fn end_container(&mut self, level: usize, close: char) {
        self.out.push('\n');
        self.indent(level);
        self.out.push(close);
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }
}

/// Object members as `encode` sees them: one per key, first position, last value
fn effective_members(children: &[Node]) -> Vec<&Node> {
    let mut members: Vec<&Node> = Vec::with_capacity(children.len());
    for child in children {
        match members.iter_mut().find(|m| m.key == child.key) {
            Some(slot) => *slot = child,
            None => members.push(child),
        }
    }
    members
}

/// JSON string literal for a key, escaped the way serde_json writes it
pub(crate) fn quote(key: &str) -> String {
    Value::String(key.to_string()).to_string()
}
