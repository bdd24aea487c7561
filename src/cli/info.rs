//! Model info command

use std::path::PathBuf;

use anyhow::Result;

use crate::config::AppConfig;
use crate::loader::load_model;
use crate::model::{fields, FieldKind};

/// Show model information
pub async fn info(mut config: AppConfig, model: Option<PathBuf>) -> Result<()> {
    if let Some(model) = model {
        config.registry.local_path = Some(model);
    }

    let model = load_model(&config.registry, config.hub.token.clone()).await?;
    let summary = model.summary();

    println!("Model: {}\n", summary.name);
    println!("Path: {}", model.path().display());
    println!("Format: JSON random forest\n");

    println!("Forest:");
    println!("  Trees: {}", summary.trees);
    println!("  Nodes: {}", summary.nodes);
    println!("  Max depth: {}", summary.max_depth);

    println!("\nInput columns:");
    for spec in fields::FIELDS.iter() {
        match spec.kind {
            FieldKind::Number { min, max, .. } => {
                println!("  {:<26} number [{}, {}]", spec.name, min, max)
            }
            FieldKind::Choice { options, .. } => {
                println!("  {:<26} one of {}", spec.name, options.join(" | "))
            }
        }
    }

    if let Ok(metadata) = std::fs::metadata(model.path()) {
        let size_kb = metadata.len() as f64 / 1024.0;
        println!("\nFile size: {:.1} KB", size_kb);
    }

    Ok(())
}
