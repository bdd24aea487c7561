//! Publishing deployment files to a Hugging Face Space
//!
//! The whole file list is resolved and checked locally before the Hub is
//! contacted. Uploads then run in order, one commit per file, and the first
//! failure stops the run.

mod hub;

pub use hub::{HubClient, SpaceStatus};

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::config::{DeployFile, HubConfig, SpaceConfig};

/// A local file and its destination in the Space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub local: PathBuf,
    pub path_in_repo: String,
    pub size: u64,
}

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub repo_id: String,
    pub status: SpaceStatus,
    pub uploaded: Vec<String>,
}

/// Expand the configured file list into concrete uploads
///
/// Directories expand to every file below them, sorted by path.
pub fn resolve_files(space: &SpaceConfig) -> Result<Vec<UploadFile>> {
    let mut uploads = Vec::new();

    for entry in &space.files {
        let local = space.root_dir.join(&entry.local);
        if local.is_dir() {
            uploads.extend(expand_dir(&local, entry, space.max_file_bytes)?);
        } else if local.is_file() {
            uploads.push(upload_file(local, entry.destination(), space.max_file_bytes)?);
        } else if entry.optional {
            tracing::warn!(file = %local.display(), "Optional deployment file missing, skipped");
        } else {
            bail!("Deployment file not found: {}", local.display());
        }
    }

    if uploads.is_empty() {
        bail!("Nothing to publish: the file list is empty");
    }
    Ok(uploads)
}

fn expand_dir(dir: &Path, entry: &DeployFile, max_bytes: u64) -> Result<Vec<UploadFile>> {
    let pattern = dir.join("**").join("*");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| anyhow!("Non UTF-8 path: {}", dir.display()))?;

    let mut files = Vec::new();
    for path in glob::glob(pattern).context("Invalid directory pattern")? {
        let path = path?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let prefix = entry.destination();
    files
        .into_iter()
        .map(|path| {
            let relative = path
                .strip_prefix(dir)
                .with_context(|| format!("{} is outside {}", path.display(), dir.display()))?
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let destination = if prefix.is_empty() {
                relative
            } else {
                format!("{}/{}", prefix, relative)
            };
            upload_file(path, destination, max_bytes)
        })
        .collect()
}

fn upload_file(local: PathBuf, path_in_repo: String, max_bytes: u64) -> Result<UploadFile> {
    let size = std::fs::metadata(&local)
        .with_context(|| format!("Failed to read {}", local.display()))?
        .len();
    if size > max_bytes {
        bail!(
            "{} is {} bytes, above the {} byte limit for inline uploads",
            local.display(),
            size,
            max_bytes
        );
    }

    Ok(UploadFile {
        local,
        path_in_repo,
        size,
    })
}

/// Create or reuse the Space and upload every configured file
pub async fn publish(space: &SpaceConfig, hub: &HubConfig) -> Result<PublishReport> {
    let token = hub
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow!("HF_TOKEN is not set; a write token is required to publish"))?;

    let uploads = resolve_files(space)?;
    let client = HubClient::new(&hub.endpoint, token)?;

    println!("Publishing to Space: {}", space.repo_id);

    let status = client
        .create_space(&space.repo_id, &space.sdk, space.private)
        .await?;
    match status {
        SpaceStatus::Created => println!("Created Space: {}", space.repo_id),
        SpaceStatus::Existing => println!("Using existing Space: {}", space.repo_id),
    }
    tracing::info!(space = %space.repo_id, ?status, files = uploads.len(), "Space ready");

    let mut uploaded = Vec::with_capacity(uploads.len());
    for file in &uploads {
        let content = tokio::fs::read(&file.local)
            .await
            .with_context(|| format!("Failed to read {}", file.local.display()))?;

        client
            .upload_file(&space.repo_id, &space.revision, &file.path_in_repo, &content)
            .await
            .map_err(|e| {
                tracing::error!(file = %file.path_in_repo, error = %e, "Upload failed");
                e
            })?;

        println!("  Uploaded: {} ({} bytes)", file.path_in_repo, file.size);
        uploaded.push(file.path_in_repo.clone());
    }

    tracing::info!(space = %space.repo_id, files = uploaded.len(), "Publish complete");

    Ok(PublishReport {
        repo_id: space.repo_id.clone(),
        status,
        uploaded,
    })
}
