//! Model registry settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the model artifact comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Hub model repository id
    #[serde(default = "default_repo_id")]
    pub repo_id: String,

    /// Artifact file inside the repository
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Branch, tag or commit
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Override for the hf-hub cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Load this local file or directory instead of contacting the registry
    #[serde(default)]
    pub local_path: Option<PathBuf>,
}

fn default_repo_id() -> String {
    "cktai/tourism-wellness-rf-model".to_string()
}

fn default_filename() -> String {
    "model.json".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            repo_id: default_repo_id(),
            filename: default_filename(),
            revision: default_revision(),
            cache_dir: None,
            local_path: None,
        }
    }
}

impl RegistryConfig {
    /// Human readable artifact location, for logs
    pub fn location(&self) -> String {
        match &self.local_path {
            Some(path) => path.display().to_string(),
            None => format!("{}@{}/{}", self.repo_id, self.revision, self.filename),
        }
    }
}
