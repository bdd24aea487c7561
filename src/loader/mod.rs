//! Model loading utilities
//!
//! This module turns a registry reference or a local path into a
//! [`LoadedModel`]:
//! - Registry artifacts are fetched through the Hugging Face Hub cache
//! - Local artifacts are detected by path (file or directory)
//!
//! Loading happens once at startup; any failure is fatal to the caller.

mod detect;
mod forest;
mod registry;

pub use detect::detect_artifact;
pub use forest::{ForestArtifact, ModelSummary, RandomForest, TreeArrays, FORMAT_VERSION};
pub use registry::resolve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::RegistryConfig;
use crate::engine::Predictor;

/// Immutable handle to the deserialized classifier
#[derive(Clone)]
pub struct LoadedModel {
    path: PathBuf,
    summary: ModelSummary,
    predictor: Arc<dyn Predictor>,
}

impl LoadedModel {
    /// Artifact file the model was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    pub fn predictor(&self) -> Arc<dyn Predictor> {
        Arc::clone(&self.predictor)
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("path", &self.path)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Find the artifact file for a configuration, downloading it if needed
///
/// Blocking; prefer [`load_model`] from async code.
pub fn resolve_artifact(config: &RegistryConfig, token: Option<String>) -> Result<PathBuf> {
    match config.local_path {
        Some(ref path) => detect_artifact(path),
        None => registry::resolve(config, token),
    }
}

/// Load a model from a local artifact path (file or directory)
pub fn load_model_from_path<P: AsRef<Path>>(path: P) -> Result<LoadedModel> {
    let path = detect_artifact(path)?;
    let forest = RandomForest::from_file(&path)?;
    let summary = forest.summary();

    tracing::info!(
        model = %summary.name,
        path = %path.display(),
        trees = summary.trees,
        nodes = summary.nodes,
        max_depth = summary.max_depth,
        "Model loaded successfully"
    );

    Ok(LoadedModel {
        path,
        summary,
        predictor: Arc::new(forest),
    })
}

/// Resolve and load the configured model
///
/// The registry download and deserialization run on the blocking pool.
pub async fn load_model(config: &RegistryConfig, token: Option<String>) -> Result<LoadedModel> {
    let config = config.clone();
    let location = config.location();

    tokio::task::spawn_blocking(move || {
        let path = resolve_artifact(&config, token)?;
        load_model_from_path(path)
    })
    .await
    .context("Model loading task panicked")?
    .with_context(|| format!("Failed to load model from {}", location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerRecord, FeatureRow};

    fn write_artifact() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tourism-loader-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let json = serde_json::to_string(&forest::tests::stump_artifact()).unwrap();
        std::fs::write(dir.join("model.json"), json).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_local_model() {
        let dir = write_artifact();
        let config = RegistryConfig {
            local_path: Some(dir.clone()),
            ..Default::default()
        };

        let model = load_model(&config, None).await.unwrap();
        assert_eq!(model.path(), dir.join("model.json"));
        assert_eq!(model.summary().trees, 2);

        let row = FeatureRow::from_record(&CustomerRecord::default());
        let p = model.predictor().predict_probability(&row).unwrap();
        assert!((0.0..=1.0).contains(&p));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let dir = write_artifact();
        std::fs::write(dir.join("model.json"), "{\"format_version\": 1}").unwrap();
        let config = RegistryConfig {
            local_path: Some(dir.clone()),
            ..Default::default()
        };

        let err = load_model(&config, None).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load model"));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
