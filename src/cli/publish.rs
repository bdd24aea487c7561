//! Publish command

use std::path::PathBuf;

use anyhow::Result;

use crate::config::AppConfig;

/// Upload the deployment files to the configured Space
pub async fn publish(
    mut config: AppConfig,
    space: Option<String>,
    root_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(space) = space {
        config.space.repo_id = space;
    }
    if let Some(root_dir) = root_dir {
        config.space.root_dir = root_dir;
    }

    let report = crate::publish::publish(&config.space, &config.hub).await?;

    println!(
        "\nPublished {} files to {}/spaces/{}",
        report.uploaded.len(),
        config.hub.endpoint.trim_end_matches('/'),
        report.repo_id
    );

    Ok(())
}
