//! Route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{form_page, form_submit, health, predict, root, AppState};

/// Create the REST API router
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
}

/// Create the interactive form router
pub fn form_routes() -> Router<Arc<AppState>> {
    Router::new().route("/form", get(form_page).post(form_submit))
}
