pub mod edit;
pub mod format;
pub mod locate;
pub mod tree;

pub use edit::{edit, EditArgs};
pub use format::{format, FormatArgs};
pub use locate::{locate, LocateArgs};
pub use tree::{tree, TreeArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use nodeflow_editor::Document;
use std::fs;
use std::path::Path;

/// Read and decode a JSON file with the settings from `nodeflow.config.json`
pub(crate) fn load_document(path: &Path, cwd: &str) -> Result<Document> {
    let config = Config::load(cwd)?;
    let source = fs::read_to_string(path).map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;

    let document = Document::from_source(config.document_label(path), &source)
        .map_err(|e| anyhow!("{}: {}", path.display(), e))?
        .with_history_limit(config.history_limit);

    tracing::debug!("loaded {} as '{}'", path.display(), document.label);
    Ok(document)
}

/// Dotted form of a key path for messages
pub(crate) fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return nodeflow_tree::ROOT_KEY.to_string();
    }
    path.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(".")
}
