//! Model registry access (Hugging Face Hub)

use std::path::PathBuf;

use anyhow::{Context, Result};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};

use crate::config::RegistryConfig;

/// Resolve the configured artifact to a local file
///
/// Returns the cached copy when present, downloading it otherwise. This is a
/// blocking call.
pub fn resolve(config: &RegistryConfig, token: Option<String>) -> Result<PathBuf> {
    let mut builder = ApiBuilder::new().with_progress(false).with_token(token);
    if let Some(ref cache_dir) = config.cache_dir {
        builder = builder.with_cache_dir(cache_dir.clone());
    }
    let api = builder
        .build()
        .context("Failed to initialize Hugging Face Hub client")?;

    let repo = api.repo(Repo::with_revision(
        config.repo_id.clone(),
        RepoType::Model,
        config.revision.clone(),
    ));

    tracing::info!(
        repo = %config.repo_id,
        revision = %config.revision,
        file = %config.filename,
        "Resolving model artifact"
    );

    repo.get(&config.filename).with_context(|| {
        format!(
            "Failed to fetch {} from {}@{}",
            config.filename, config.repo_id, config.revision
        )
    })
}
