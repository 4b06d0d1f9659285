//! # Document Handle
//!
//! Keeps one JSON document's node tree, undo history and text buffer in
//! sync.
//!
//! ## Lifecycle
//!
//! ```text
//! Text → Parse → Decode → Edit → Commit → Render
//!  ↓       ↓        ↓       ↓       ↓        ↓
//! JSON   Value    Tree  Mutation History  Text + spans
//! ```
//!
//! The text buffer is normally the canonical rendering of the present tree.
//! While the user is typing text that does not parse, the buffer holds their
//! draft and the parse error; the tree and history stay as they were.

use crate::history::History;
use crate::{EditorError, Mutation, MutationResult};
use nodeflow_tree::{
    decode, encode, find_node, locate_node, render_with_spans, IdGenerator, Node, NodeId, NodeKind, RenderedTree,
    DEFAULT_DOCUMENT_LABEL,
};
use serde_json::Value;
use std::ops::Range;

/// Editable JSON document
#[derive(Debug)]
pub struct Document {
    /// Name used to seed node ids
    pub label: String,

    /// Current version number (increments on each change of the present tree)
    pub version: u64,

    history: History<Node>,
    ids: IdGenerator,
    rendered: RenderedTree,
    draft: Option<Draft>,
}

/// Text typed by the user that did not parse
#[derive(Debug, Clone)]
struct Draft {
    text: String,
    error: EditorError,
}

impl Document {
    /// Create document from JSON text
    pub fn from_source(label: impl Into<String>, source: &str) -> Result<Self, EditorError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(label, &value)
    }

    /// Create document from an already parsed value
    pub fn from_value(label: impl Into<String>, value: &Value) -> Result<Self, EditorError> {
        let label = label.into();
        let mut ids = IdGenerator::new(&label);
        let tree = decode(value, &mut ids)?;
        let rendered = render_with_spans(&tree);

        Ok(Self {
            label,
            version: 0,
            history: History::new(tree),
            ids,
            rendered,
            draft: None,
        })
    }

    /// Empty object document
    pub fn empty() -> Self {
        let mut ids = IdGenerator::new(DEFAULT_DOCUMENT_LABEL);
        let tree = Node {
            id: ids.new_id(),
            key: nodeflow_tree::ROOT_KEY.to_string(),
            depth: 0,
            parent_id: None,
            body: nodeflow_tree::NodeBody::Object { children: Vec::new() },
        };
        let rendered = render_with_spans(&tree);

        Self {
            label: DEFAULT_DOCUMENT_LABEL.to_string(),
            version: 0,
            history: History::new(tree),
            ids,
            rendered,
            draft: None,
        }
    }

    /// Replace the undo limit; existing history is dropped
    pub fn with_history_limit(mut self, max_levels: usize) -> Self {
        self.history = History::with_max_levels(self.tree().clone(), max_levels);
        self
    }

    /// Current tree
    pub fn tree(&self) -> &Node {
        self.history.present()
    }

    pub fn history(&self) -> &History<Node> {
        &self.history
    }

    /// Current text buffer
    pub fn source(&self) -> &str {
        match &self.draft {
            Some(draft) => &draft.text,
            None => &self.rendered.text,
        }
    }

    /// Error from the last text edit that failed to parse, if the draft is still pending
    pub fn last_error(&self) -> Option<&EditorError> {
        self.draft.as_ref().map(|draft| &draft.error)
    }

    /// Current tree as JSON
    pub fn to_value(&self) -> Value {
        encode(self.tree())
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        find_node(self.tree(), id)
    }

    /// Apply a mutation and commit the result
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        self.check_keys(&mutation)?;

        match mutation.apply(self.history.present(), &mut self.ids) {
            Ok(next) => {
                tracing::debug!(
                    "[{}] {}: {:?}",
                    self.label,
                    mutation.description(),
                    mutation
                );
                self.history.commit_with_description(next, mutation.description());
                Ok(self.changed())
            }
            Err(err) if mutation.is_soft_miss(&err) => {
                tracing::debug!("[{}] {} skipped: {}", self.label, mutation.description(), err);
                Ok(MutationResult {
                    version: self.version,
                    changed: false,
                })
            }
            Err(err) => {
                tracing::warn!("[{}] {} rejected: {}", self.label, mutation.description(), err);
                Err(err.into())
            }
        }
    }

    fn check_keys(&self, mutation: &Mutation) -> Result<(), EditorError> {
        match mutation {
            Mutation::UpdateKey { key, .. } if key.is_empty() => Err(EditorError::EmptyKey),
            Mutation::InsertChild { parent_id, key, .. } if key.is_empty() => {
                // Array children are labelled by position, so only objects need a key.
                match self.find(parent_id).map(Node::kind) {
                    Some(NodeKind::Object) => Err(EditorError::EmptyKey),
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    /// Replace the text buffer with user-typed text
    ///
    /// Text that parses becomes the new present tree and the buffer is
    /// regenerated. Text that does not parse is kept as a draft with its
    /// error; the tree and history are untouched.
    pub fn set_source(&mut self, text: impl Into<String>) -> Result<MutationResult, EditorError> {
        let text = text.into();

        let parsed = serde_json::from_str::<Value>(&text)
            .map_err(EditorError::from)
            .and_then(|value| decode(&value, &mut self.ids).map_err(EditorError::from));

        match parsed {
            Ok(tree) => {
                tracing::debug!("[{}] source replaced ({} bytes)", self.label, text.len());
                self.history.commit_with_description(tree, "Edit source");
                Ok(self.changed())
            }
            Err(err) => {
                tracing::warn!("[{}] source edit not applied: {}", self.label, err);
                self.draft = Some(Draft {
                    text,
                    error: err.clone(),
                });
                Err(err)
            }
        }
    }

    /// Undo the most recent change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.changed();
        true
    }

    /// Redo the most recently undone change. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.changed();
        true
    }

    /// Byte range of a node's text in [`source`](Self::source)
    ///
    /// Uses the spans recorded when the text was rendered. While a draft is
    /// pending the spans no longer match, so the label search is used instead.
    pub fn selection_range(&self, id: &NodeId) -> Option<Range<usize>> {
        match &self.draft {
            None => self.rendered.span(id),
            Some(draft) => locate_node(self.tree(), &draft.text, id),
        }
    }

    /// Byte range of a node found by searching the text for its key path
    pub fn locate_node(&self, id: &NodeId) -> Option<Range<usize>> {
        locate_node(self.tree(), self.source(), id)
    }

    /// Re-render after the present tree changed
    fn changed(&mut self) -> MutationResult {
        self.version += 1;
        self.rendered = render_with_spans(self.history.present());
        self.draft = None;

        MutationResult {
            version: self.version,
            changed: true,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeflow_tree::{find_by_path, Primitive};
    use serde_json::json;

    fn sample() -> Document {
        Document::from_source("test.json", r#"{"a": 1, "b": [true, null]}"#).unwrap()
    }

    fn id_at(doc: &Document, path: &[&str]) -> NodeId {
        find_by_path(doc.tree(), path).unwrap().id.clone()
    }

    #[test]
    fn test_create_document_renders_canonical_text() {
        let doc = sample();
        assert_eq!(doc.version, 0);
        assert_eq!(doc.source(), "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}");
        assert!(doc.last_error().is_none());
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_invalid_initial_source() {
        let err = Document::from_source("bad.json", "{\"a\": }").unwrap_err();
        assert!(matches!(err, EditorError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_apply_commits_and_regenerates_text() {
        let mut doc = sample();
        let a = id_at(&doc, &["a"]);

        let result = doc
            .apply(Mutation::UpdateValue {
                node_id: a,
                value: Primitive::from("one"),
            })
            .unwrap();

        assert!(result.changed);
        assert_eq!(result.version, 1);
        assert_eq!(doc.to_value(), json!({"a": "one", "b": [true, null]}));
        assert!(doc.source().contains("\"a\": \"one\""));
        assert_eq!(doc.history().undo_description(), Some("Update value"));
    }

    #[test]
    fn test_missing_node_update_is_noop() {
        let mut doc = sample();

        let result = doc
            .apply(Mutation::UpdateKey {
                node_id: NodeId::new("missing"),
                key: "z".to_string(),
            })
            .unwrap();

        assert!(!result.changed);
        assert_eq!(doc.version, 0);
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_failed_mutation_leaves_history() {
        let mut doc = sample();
        let root = doc.tree().id.clone();
        let before = doc.source().to_string();

        let err = doc.apply(Mutation::DeleteNode { node_id: root }).unwrap_err();

        assert_eq!(err, EditorError::Mutation(nodeflow_tree::MutationError::CannotDeleteRoot));
        assert_eq!(doc.source(), before);
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_empty_keys_rejected() {
        let mut doc = sample();
        let a = id_at(&doc, &["a"]);
        let b = id_at(&doc, &["b"]);
        let root = doc.tree().id.clone();

        assert_eq!(
            doc.apply(Mutation::UpdateKey { node_id: a, key: String::new() }),
            Err(EditorError::EmptyKey)
        );
        assert_eq!(
            doc.apply(Mutation::InsertChild { parent_id: root, key: String::new(), value: json!(1) }),
            Err(EditorError::EmptyKey)
        );

        // Array parents ignore the key entirely.
        let result = doc
            .apply(Mutation::InsertChild { parent_id: b, key: String::new(), value: json!(2) })
            .unwrap();
        assert!(result.changed);
        assert_eq!(doc.to_value(), json!({"a": 1, "b": [true, null, 2]}));
    }

    #[test]
    fn test_rename_root_rejected() {
        let mut doc = sample();
        let root = doc.tree().id.clone();

        let err = doc
            .apply(Mutation::UpdateKey { node_id: root, key: "renamed".into() })
            .unwrap_err();

        assert_eq!(err, EditorError::Mutation(nodeflow_tree::MutationError::CannotRenameRoot));
        assert_eq!(doc.tree().key, "root");
        assert_eq!(doc.version, 0);
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_bad_source_keeps_draft_and_tree() {
        let mut doc = sample();
        let value = doc.to_value();

        let err = doc.set_source("{\"a\": 1,").unwrap_err();

        assert!(matches!(err, EditorError::Parse { .. }));
        assert!(err.to_string().starts_with("JSON Error: "));
        assert_eq!(doc.source(), "{\"a\": 1,");
        assert_eq!(doc.last_error(), Some(&err));
        assert_eq!(doc.to_value(), value);
        assert!(!doc.history().can_undo());
    }

    #[test]
    fn test_good_source_commits_and_normalizes() {
        let mut doc = sample();
        let old_ids = doc.tree().id.clone();

        doc.set_source("{\"x\":[1,2]}").unwrap();

        assert_eq!(doc.source(), "{\n  \"x\": [\n    1,\n    2\n  ]\n}");
        assert!(doc.last_error().is_none());
        assert_ne!(doc.tree().id, old_ids);
        assert!(doc.undo());
        assert_eq!(doc.to_value(), json!({"a": 1, "b": [true, null]}));
    }

    #[test]
    fn test_undo_redo_regenerate_text() {
        let mut doc = sample();
        let a = id_at(&doc, &["a"]);
        doc.apply(Mutation::UpdateKey { node_id: a, key: "z".into() }).unwrap();
        let renamed = doc.source().to_string();

        assert!(doc.undo());
        assert!(doc.source().contains("\"a\": 1"));
        assert!(doc.redo());
        assert_eq!(doc.source(), renamed);
        assert!(!doc.redo());
    }

    #[test]
    fn test_selection_range_uses_spans() {
        let doc = sample();
        let item = id_at(&doc, &["b", "[1]"]);
        let b = id_at(&doc, &["b"]);

        let range = doc.selection_range(&item).unwrap();
        assert_eq!(&doc.source()[range], "null");

        // The label search cannot address array elements and falls back to the array.
        let range = doc.locate_node(&item).unwrap();
        assert_eq!(range, doc.selection_range(&b).unwrap());

        let root = doc.tree().id.clone();
        assert_eq!(doc.selection_range(&root), Some(0..doc.source().len()));
    }

    #[test]
    fn test_selection_while_draft_pending() {
        let mut doc = sample();
        let a = id_at(&doc, &["a"]);
        let _ = doc.set_source("{\n  \"a\": 1, oops");

        let range = doc.selection_range(&a).unwrap();
        assert_eq!(&doc.source()[range], "\"a\": 1");
    }

    #[test]
    fn test_history_limit() {
        let mut doc = sample().with_history_limit(3);
        let a = id_at(&doc, &["a"]);
        for i in 0..5 {
            doc.apply(Mutation::UpdateValue { node_id: a.clone(), value: Primitive::from(i as i64) })
                .unwrap();
        }
        assert_eq!(doc.history().undo_levels(), 3);
        assert_eq!(doc.version, 5);
    }
}
