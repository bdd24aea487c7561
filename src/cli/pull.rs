//! Pull the model artifact from HuggingFace Hub

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::loader::{resolve, RandomForest};

/// Download the configured artifact and copy it to `output`
pub async fn pull(
    mut config: AppConfig,
    repo: Option<String>,
    file: Option<String>,
    revision: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(repo) = repo {
        config.registry.repo_id = repo;
    }
    if let Some(file) = file {
        config.registry.filename = file;
    }
    if let Some(revision) = revision {
        config.registry.revision = revision;
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from("./models"));
    std::fs::create_dir_all(&output_dir)?;

    println!(
        "Downloading from: {}@{}",
        config.registry.repo_id, config.registry.revision
    );
    println!("Downloading file: {}", config.registry.filename);

    let registry = config.registry.clone();
    let token = config.hub.token.clone();
    let cached = tokio::task::spawn_blocking(move || resolve(&registry, token))
        .await
        .context("Download task panicked")??;

    // Refuse to keep an artifact the server would reject at startup
    let forest = RandomForest::from_file(&cached)?;

    let filename = cached
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("model.json"));
    let dest = output_dir.join(filename);
    std::fs::copy(&cached, &dest)
        .with_context(|| format!("Failed to copy artifact to {}", dest.display()))?;

    println!("Downloaded to: {}", dest.display());
    println!("  Trees: {}", forest.summary().trees);

    Ok(())
}
