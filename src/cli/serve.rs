//! HTTP server command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::engine::PredictionService;
use crate::loader::load_model;
use crate::server::{self, AppState};

/// Load the model, then start the prediction server
///
/// The listener is only bound once the model has loaded.
pub async fn serve(
    mut config: AppConfig,
    model: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    if let Some(model) = model {
        config.registry.local_path = Some(model);
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    tracing::info!("Loading model: {}", config.registry.location());
    let model = load_model(&config.registry, config.hub.token.clone()).await?;

    let service = PredictionService::new(model.predictor());
    let state = Arc::new(AppState::new(service, model.summary().name.clone()));

    tracing::info!("Starting server at http://{}", config.server.addr());
    server::start(state, config.server).await?;

    Ok(())
}
