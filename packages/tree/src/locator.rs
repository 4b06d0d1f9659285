//! # Text Locator
//!
//! Finds the text of a node inside pretty-printed JSON by searching for its
//! member labels. This is a textual heuristic, not a parser: it resolves
//! correctly on 2-space output with unique keys and is best-effort beyond
//! that. Prefer [`render_with_spans`](crate::render_with_spans) when the
//! tree that produced the text is at hand.
//!
//! ```text
//! path ["settings", "zoom"]
//!
//! {
//!   "settings": {          ← cursor moves past this label
//!     "zoom": 0.8,         ← range = "zoom": 0.8
//! ```

use crate::node::{is_index_key, Node};
use crate::printer::quote;
use crate::query::node_path;
use crate::NodeId;
use std::ops::Range;

/// Byte range of the node at `path` (keys below the root) in `text`
///
/// An empty path selects the whole text. Positional segments (`[i]`) are
/// skipped; if the last segment is positional the nearest located ancestor
/// is returned, or the whole text when there is none. A label that cannot
/// be found yields `None`.
pub fn locate<S: AsRef<str>>(text: &str, path: &[S]) -> Option<Range<usize>> {
    let mut cursor = 0;
    let mut nearest: Option<Range<usize>> = None;

    for segment in path {
        let key = segment.as_ref();
        if is_index_key(key) {
            continue;
        }

        let label = format!("{}:", quote(key));
        let found = cursor + text[cursor..].find(&label)?;
        cursor = found + label.len();
        nearest = Some(found..value_end(text, cursor));
    }

    Some(nearest.unwrap_or(0..text.len()))
}

/// Locate a node of `tree` inside `text` by its key path
pub fn locate_node(tree: &Node, text: &str, id: &NodeId) -> Option<Range<usize>> {
    let path = node_path(tree, id)?;
    locate(text, &path[1..])
}

/// End of the value starting at or after `from`
fn value_end(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut start = from;
    while start < bytes.len() && matches!(bytes[start], b' ' | b'\n' | b'\r' | b'\t') {
        start += 1;
    }

    match bytes.get(start).copied() {
        Some(b'{') => matching_close(bytes, start, b'{', b'}'),
        Some(b'[') => matching_close(bytes, start, b'[', b']'),
        Some(b'"') => string_end(bytes, start),
        Some(_) => {
            let rest = &text[start..];
            let stop = rest.find([',', '\n']).unwrap_or(rest.len());
            start + stop
        }
        None => text.len(),
    }
}

/// Index just past the bracket closing the one at `open_at`
fn matching_close(bytes: &[u8], open_at: usize, open: u8, close: u8) -> usize {
    let mut depth = 0usize;
    let mut i = open_at;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i = string_end(bytes, i);
                continue;
            }
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Index just past the closing quote of the string starting at `quote_at`
fn string_end(bytes: &[u8], quote_at: usize) -> usize {
    let mut i = quote_at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
