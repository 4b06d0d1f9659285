//! # Edit Session
//!
//! Per-user editing state around a [`Document`]: the current selection and
//! the pending "create node" dialog. The presentation layer owns one
//! session and routes every gesture through it.

use crate::template::NodeTemplate;
use crate::{Document, EditorError, Mutation, MutationResult};
use nodeflow_tree::{descendant_ids, NodeId, NodeKind, Primitive};
use std::ops::Range;

/// Open "create node" dialog
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCreation {
    pub parent_id: NodeId,
    pub parent_kind: NodeKind,

    /// Kind the dialog should preselect
    pub suggested_kind: Option<NodeKind>,
}

/// Single user's editing session
#[derive(Debug)]
pub struct EditSession {
    /// Document being edited
    pub document: Document,

    /// Current selection (first entry is the primary node)
    pub selected_nodes: Vec<NodeId>,

    pending_creation: Option<PendingCreation>,
}

impl EditSession {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selected_nodes: Vec::new(),
            pending_creation: None,
        }
    }

    /// Update selection
    pub fn set_selection(&mut self, node_ids: Vec<NodeId>) {
        self.selected_nodes = node_ids;
    }

    pub fn select(&mut self, node_id: NodeId) {
        self.selected_nodes = vec![node_id];
    }

    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
    }

    pub fn primary_selection(&self) -> Option<&NodeId> {
        self.selected_nodes.first()
    }

    /// Text range to highlight for the primary selection
    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.document.selection_range(self.primary_selection()?)
    }

    pub fn update_value(&mut self, node_id: NodeId, value: Primitive) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateValue { node_id, value })
    }

    pub fn update_key(&mut self, node_id: NodeId, key: impl Into<String>) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateKey {
            node_id,
            key: key.into(),
        })
    }

    /// Drag-and-drop: move `source` under `target`
    pub fn drop_on(&mut self, source: NodeId, target: NodeId) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::Reparent {
            node_id: source,
            new_parent_id: target,
        })
    }

    /// Delete every selected node as one edit per node
    ///
    /// Nodes already removed along with a selected ancestor are skipped.
    pub fn delete_selection(&mut self) -> Result<usize, EditorError> {
        let selected = std::mem::take(&mut self.selected_nodes);
        let mut deleted = 0;

        for node_id in selected {
            if self.document.find(&node_id).is_none() {
                continue;
            }
            self.document.apply(Mutation::DeleteNode { node_id })?;
            deleted += 1;
        }

        Ok(deleted)
    }

    /// Open the creation dialog for `parent_id`
    pub fn prepare_add_child(
        &mut self,
        parent_id: NodeId,
        suggested_kind: Option<NodeKind>,
    ) -> Option<&PendingCreation> {
        let parent_kind = self.document.find(&parent_id)?.kind();
        self.pending_creation = Some(PendingCreation {
            parent_id,
            parent_kind,
            suggested_kind,
        });
        self.pending_creation.as_ref()
    }

    pub fn pending_creation(&self) -> Option<&PendingCreation> {
        self.pending_creation.as_ref()
    }

    pub fn cancel_add_child(&mut self) {
        self.pending_creation = None;
    }

    /// Create the node described by `template` under the pending parent
    ///
    /// The dialog closes whether or not the insert succeeds.
    pub fn confirm_add_child(&mut self, template: NodeTemplate) -> Result<MutationResult, EditorError> {
        let pending = self.pending_creation.take().ok_or(EditorError::NoPendingCreation)?;
        let value = template.to_value();
        self.apply(Mutation::InsertChild {
            parent_id: pending.parent_id,
            key: template.key,
            value,
        })
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.prune_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.prune_selection();
        }
        redone
    }

    /// Replace the document text with user input
    pub fn edit_source(&mut self, text: impl Into<String>) -> Result<MutationResult, EditorError> {
        let result = self.document.set_source(text)?;
        // Every node was re-created with a new id.
        self.selected_nodes.clear();
        Ok(result)
    }

    fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation)?;
        if result.changed {
            self.prune_selection();
        }
        Ok(result)
    }

    /// Drop selected ids that no longer exist in the present tree
    fn prune_selection(&mut self) {
        let tree = self.document.tree();
        let mut live = descendant_ids(tree);
        live.push(tree.id.clone());
        self.selected_nodes.retain(|id| live.contains(id));
    }
}
