//! Configuration system for tourism
//!
//! `AppConfig` gathers the model registry, HTTP server, Hub API and
//! publishing settings. Every field has a default, so an empty file is a
//! valid configuration. Values are layered as defaults, then the config file,
//! then environment variables, then command line flags.

mod registry;
mod server;
mod space;

pub use registry::RegistryConfig;
pub use server::ServerConfig;
pub use space::{DeployFile, HubConfig, SpaceConfig};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tourism configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model artifact source
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Server settings (only for `tourism serve`)
    #[serde(default)]
    pub server: ServerConfig,

    /// Hub API endpoint and credentials
    #[serde(default)]
    pub hub: HubConfig,

    /// Publishing target (only for `tourism publish`)
    #[serde(default)]
    pub space: SpaceConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the optional config file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
                let loaded = if is_json {
                    Self::from_json(path)
                } else {
                    Self::from_yaml(path)
                };
                loaded.with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    ///
    /// - `TOURISM_MODEL_PATH`: local artifact instead of the registry
    /// - `HF_ENDPOINT`: Hub base URL
    /// - `HF_TOKEN` (or `HUGGING_FACE_HUB_TOKEN`): Hub access token
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty("TOURISM_MODEL_PATH") {
            self.registry.local_path = Some(PathBuf::from(path));
        }
        if let Some(endpoint) = non_empty("HF_ENDPOINT") {
            self.hub.endpoint = endpoint;
        }
        if let Some(token) = non_empty("HF_TOKEN").or_else(|| non_empty("HUGGING_FACE_HUB_TOKEN")) {
            self.hub.token = Some(token.trim().to_string());
        }
    }
}
