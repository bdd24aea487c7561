//! Hosting Space and Hub API settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Hugging Face Hub API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Hub base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Access token, taken from the environment only
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_endpoint() -> String {
    "https://huggingface.co".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
        }
    }
}

/// One entry of the deployment file list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployFile {
    /// Local file or directory, relative to `root_dir`
    pub local: PathBuf,

    /// Destination inside the Space (defaults to `local`)
    #[serde(default)]
    pub path_in_repo: Option<String>,

    /// Skip the entry when the local path does not exist
    #[serde(default)]
    pub optional: bool,
}

impl DeployFile {
    pub fn new(local: impl Into<PathBuf>, path_in_repo: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            path_in_repo: Some(path_in_repo.into()),
            optional: false,
        }
    }

    /// Mark the entry as skippable when missing
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Destination path, with forward slashes
    pub fn destination(&self) -> String {
        match &self.path_in_repo {
            Some(path) => path.trim_matches('/').to_string(),
            None => self
                .local
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

/// Target Space for `tourism publish`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// `namespace/name` of the Space
    #[serde(default = "default_space_id")]
    pub repo_id: String,

    /// Space SDK
    #[serde(default = "default_sdk")]
    pub sdk: String,

    #[serde(default = "default_revision")]
    pub revision: String,

    /// Create the Space as private
    #[serde(default)]
    pub private: bool,

    /// Base directory for `files`
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Files uploaded on every publish
    #[serde(default = "default_files")]
    pub files: Vec<DeployFile>,

    /// Largest file accepted for an inline commit
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_space_id() -> String {
    "cktai/tourism-wellness-predictor".to_string()
}

fn default_sdk() -> String {
    "docker".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_files() -> Vec<DeployFile> {
    vec![
        DeployFile::new("deployment/Dockerfile", "Dockerfile"),
        DeployFile::new("deployment/tourism.yaml", "tourism.yaml"),
        DeployFile::new("Cargo.toml", "Cargo.toml"),
        DeployFile::new("Cargo.lock", "Cargo.lock").optional(),
        DeployFile::new("src", "src"),
    ]
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            repo_id: default_space_id(),
            sdk: default_sdk(),
            revision: default_revision(),
            private: false,
            root_dir: default_root_dir(),
            files: default_files(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination() {
        assert_eq!(DeployFile::new("a/b.txt", "/c/b.txt/").destination(), "c/b.txt");

        let file = DeployFile {
            local: PathBuf::from("deployment").join("Dockerfile"),
            path_in_repo: None,
            optional: false,
        };
        assert_eq!(file.destination(), "deployment/Dockerfile");
    }
}
