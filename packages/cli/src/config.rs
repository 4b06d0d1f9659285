use nodeflow_editor::DEFAULT_MAX_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "nodeflow.config.json";

/// NodeFlow configuration file format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Maximum number of undo levels kept per document (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Label used to seed node ids instead of the file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_LEVELS
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", DEFAULT_CONFIG_NAME, e))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Label for a document loaded from `path`
    pub fn document_label(&self, path: &Path) -> String {
        match &self.id_seed {
            Some(seed) => seed.clone(),
            None => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| nodeflow_tree::DEFAULT_DOCUMENT_LABEL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            id_seed: None,
        }
    }
}
