//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("JSON Error: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Mutation error: {0}")]
    Mutation(#[from] nodeflow_tree::MutationError),

    #[error("Codec error: {0}")]
    Codec(#[from] nodeflow_tree::CodecError),

    #[error("Keys cannot be empty")]
    EmptyKey,

    #[error("No node-creation dialog is open")]
    NoPendingCreation,
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Parse {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}
