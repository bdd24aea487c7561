//! Local artifact detection

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Artifact file names tried when a directory is given
const ARTIFACT_NAMES: [&str; 2] = ["model.json", "forest.json"];

/// Resolve a local path to a model artifact file
///
/// The path can be:
/// - A direct path to a `.json` artifact
/// - A directory containing `model.json` (or `forest.json`, or a single `*.json`)
pub fn detect_artifact<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    if path.is_file() {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "json" => Ok(path.to_path_buf()),
            _ => Err(anyhow!("Unsupported model artifact format: .{}", ext)),
        }
    } else if path.is_dir() {
        find_artifact_in_directory(path)
    } else {
        Err(anyhow!("Model path does not exist: {}", path.display()))
    }
}

fn find_artifact_in_directory(dir: &Path) -> Result<PathBuf> {
    for name in &ARTIFACT_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let pattern = dir.join("*.json");
    let mut matches: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map(|paths| paths.filter_map(|r| r.ok()).collect())
        .unwrap_or_default();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(anyhow!(
            "No model artifact found in directory: {}",
            dir.display()
        )),
        n => Err(anyhow!(
            "{} JSON files in {}, name the artifact explicitly",
            n,
            dir.display()
        )),
    }
}
