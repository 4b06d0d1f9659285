//! # NodeFlow Editor
//!
//! Editing engine for JSON documents shown as node graphs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ presentation: gestures → Mutation intents   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + history        │
//! │  - Apply mutations with validation          │
//! │  - Commit snapshots for undo/redo           │
//! │  - Keep the JSON text in sync with the tree │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ tree: codec, mutator, printer, locator      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: the text buffer is rendered from it
//! 2. **Pure edits**: a mutation builds a new tree; failures change nothing
//! 3. **Linear history**: every successful edit is one undo step
//!
//! ## Usage
//!
//! ```rust
//! use nodeflow_editor::{Document, Mutation};
//! use nodeflow_tree::find_by_path;
//!
//! let mut doc = Document::from_source("settings.json", r#"{"zoom": 0.8}"#).unwrap();
//! let zoom = find_by_path(doc.tree(), &["zoom"]).unwrap().id.clone();
//!
//! doc.apply(Mutation::UpdateKey { node_id: zoom, key: "scale".to_string() }).unwrap();
//! assert_eq!(doc.source(), "{\n  \"scale\": 0.8\n}");
//!
//! doc.undo();
//! assert_eq!(doc.source(), "{\n  \"zoom\": 0.8\n}");
//! ```

mod document;
mod errors;
mod history;
mod mutations;
mod session;
mod template;

pub use document::Document;
pub use errors::EditorError;
pub use history::{History, HistoryEntry, DEFAULT_MAX_LEVELS};
pub use mutations::{Mutation, MutationResult};
pub use session::{EditSession, PendingCreation};
pub use template::{NodeTemplate, PrimitiveType, TemplateKind};

// Re-export tree types for convenience
pub use nodeflow_tree::{MutationError, Node, NodeId, NodeKind, Primitive};
