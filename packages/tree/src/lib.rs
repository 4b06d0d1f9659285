//! # NodeFlow Tree
//!
//! JSON value ↔ node tree engine behind the NodeFlow graph editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ codec: serde_json::Value ↔ Node tree        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutator: pure tree → tree edits             │
//! │  - update value / rename key                │
//! │  - delete / insert / reparent subtrees      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ printer + locator: tree → text → ranges     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use nodeflow_tree::{decode, encode, find_by_path, update_key, IdGenerator};
//! use serde_json::json;
//!
//! let mut ids = IdGenerator::new("example.json");
//! let tree = decode(&json!({"a": 1, "b": [true, null]}), &mut ids).unwrap();
//!
//! let a = find_by_path(&tree, &["a"]).unwrap().id.clone();
//! let renamed = update_key(&tree, &a, "z").unwrap();
//!
//! assert_eq!(encode(&renamed), json!({"z": 1, "b": [true, null]}));
//! ```

mod codec;
mod error;
mod id_generator;
mod locator;
mod mutator;
mod node;
mod position;
mod printer;
mod query;

pub use codec::{decode, decode_with_key, encode, to_pretty_string, MAX_DEPTH};
pub use error::{CodecError, CodecResult};
pub use id_generator::{get_document_seed, IdGenerator, NodeId, DEFAULT_DOCUMENT_LABEL};
pub use locator::{locate, locate_node};
pub use mutator::{
    delete_node, insert_child, reparent_node, update_key, update_value, MutationError, MutationResult,
};
pub use node::{index_key, is_index_key, Node, NodeBody, NodeKind, Primitive, ROOT_KEY};
pub use position::{byte_offset_to_line_col, line_col_to_byte_offset};
pub use printer::{render_with_spans, RenderedTree};
pub use query::{count_nodes, descendant_ids, find_by_path, find_node, is_ancestor, node_path};
