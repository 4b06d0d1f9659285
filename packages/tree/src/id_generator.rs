use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a document has no name of its own
pub const DEFAULT_DOCUMENT_LABEL: &str = "untitled";

/// Opaque node identifier, unique within the lifetime of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derive a document seed from its label using CRC32
pub fn get_document_seed(label: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for tree nodes within a document
///
/// IDs are never reused: re-decoding a document from edited text keeps
/// counting from where the previous tree left off.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(label: &str) -> Self {
        Self {
            seed: get_document_seed(label),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of IDs handed out so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_LABEL)
    }
}
