//! HTTP server for prediction
//!
//! Serves the JSON API and the interactive form from one router.

mod form;
mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use form::escape_html;
pub use handlers::{
    ApiError, AppState, ErrorDetail, ErrorResponse, PredictResponse, RootResponse, ROOT_MESSAGE,
};
pub use routes::{api_routes, form_routes};

/// Build the application router with its middleware stack
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .merge(api_routes())
        .merge(form_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TimeoutLayer::new(config.request_timeout()));

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    if config.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    // `Router::layer` wraps each route on its own; the limit must span all of them
    let limited = ConcurrencyLimit::new(
        app.with_state(state),
        config.max_concurrent_requests.max(1),
    );
    Router::new().fallback_service(limited)
}

/// Start the HTTP prediction server
pub async fn start(state: Arc<AppState>, config: ServerConfig) -> Result<()> {
    let app = router(state, &config);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /        - Service info");
    tracing::info!("  GET  /health  - Health check");
    tracing::info!("  POST /predict - Predict package purchase");
    tracing::info!("  GET  /form    - Interactive form");

    axum::serve(listener, app).await?;

    Ok(())
}
